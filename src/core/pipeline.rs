//! Job entry point
//!
//! `acquire -> assemble -> export -> cleanup -> notify`, strictly in that
//! order and on the calling thread. Item-level failures end up in the
//! [`JobReport`]; only job-level errors are returned as `Err`.

use std::time::Duration;

use crate::core::acquisition::{AcquisitionReport, Acquirer, AudioFetcher, SelectionSet};
use crate::core::assembler::{Assembler, AssemblyOutcome};
use crate::core::cleanup::{self, CleanupStats};
use crate::core::decoder::AudioDecoder;
use crate::core::exporter::{ConfirmOverwrite, ExportOutcome, Exporter, OverwritePolicy};
use crate::core::normalizer::SearchSession;
use crate::core::notifier::Notifier;
use crate::error::{MashupError, Result};

/// Everything needed to build one mashup from a search session
#[derive(Debug, Clone)]
pub struct MashupJob {
    pub selection: SelectionSet,
    pub target_duration: Duration,
    pub output_name: String,
    pub retain_intermediates: bool,
    pub overwrite: OverwritePolicy,
    pub recipient: Option<String>,
}

impl MashupJob {
    pub fn new(selection: SelectionSet, target_secs: u64, output_name: impl Into<String>) -> Self {
        Self {
            selection,
            target_duration: Duration::from_secs(target_secs),
            output_name: output_name.into(),
            retain_intermediates: false,
            overwrite: OverwritePolicy::AskCaller,
            recipient: None,
        }
    }

    pub fn retain(mut self, retain: bool) -> Self {
        self.retain_intermediates = retain;
        self
    }

    pub fn overwrite(mut self, policy: OverwritePolicy) -> Self {
        self.overwrite = policy;
        self
    }

    pub fn recipient(mut self, recipient: Option<String>) -> Self {
        self.recipient = recipient;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_duration.is_zero() {
            return Err(MashupError::invalid_duration(
                "clip duration must be greater than zero",
            ));
        }
        if self.output_name.trim().is_empty() {
            return Err(MashupError::export("output name cannot be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct JobReport {
    pub acquisition: AcquisitionReport,
    pub assembly: AssemblyOutcome,
    pub export: ExportOutcome,
    pub cleanup: CleanupStats,
    pub notified: bool,
}

pub struct MashupPipeline<F: AudioFetcher, D: AudioDecoder> {
    acquirer: Acquirer<F>,
    assembler: Assembler<D>,
    exporter: Exporter,
    notifier: Option<Box<dyn Notifier>>,
}

impl<F: AudioFetcher, D: AudioDecoder> MashupPipeline<F, D> {
    pub fn new(acquirer: Acquirer<F>, assembler: Assembler<D>, exporter: Exporter) -> Self {
        Self {
            acquirer,
            assembler,
            exporter,
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    /// Run one job against `session`.
    ///
    /// # Arguments
    /// * `confirm` - Asked before replacing an existing output when the job's policy is `AskCaller`
    /// * `on_progress` - Assembly progress as (processed, total)
    pub fn run<P>(
        &self,
        session: &SearchSession,
        job: MashupJob,
        confirm: &dyn ConfirmOverwrite,
        on_progress: P,
    ) -> Result<JobReport>
    where
        P: Fn(usize, usize),
    {
        job.validate()?;

        let acquisition = self.acquirer.acquire(session, &job.selection)?;
        let materialized = acquisition.materialized();

        log::info!("Generating mashup from {} clips...", materialized.len());
        let assembly = self
            .assembler
            .assemble(&materialized, job.target_duration, on_progress);

        let export = self
            .exporter
            .export(&assembly.buffer, &job.output_name, job.overwrite, confirm);

        let cleanup = cleanup::cleanup(&acquisition.items, job.retain_intermediates);

        let export = export?;

        let notified = match (&job.recipient, &self.notifier, &export) {
            (Some(recipient), Some(notifier), ExportOutcome::Written(path)) => {
                match notifier.notify(recipient, path) {
                    Ok(()) => true,
                    Err(e) => {
                        log::warn!("Could not notify {}: {:#}", recipient, e);
                        false
                    }
                }
            }
            _ => false,
        };

        Ok(JobReport {
            acquisition,
            assembly,
            export,
            cleanup,
            notified,
        })
    }
}
