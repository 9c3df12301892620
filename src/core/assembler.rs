//! Mashup assembler
//!
//! Folds acquired files into one running buffer: decode, trim, append.
//! A failure in any step drops that item and the fold continues, so the
//! result is always an in-order subsequence of the input where each item
//! contributes exactly the target duration.

use std::time::Duration;

use crate::core::acquisition::AcquiredItem;
use crate::core::audio::AudioClip;
use crate::core::decoder::AudioDecoder;
use crate::core::trimmer;
use crate::error::ItemError;

#[derive(Debug, Clone, Default)]
pub struct AssemblyOutcome {
    pub buffer: AudioClip,
    /// Items that made it into the buffer, in buffer order
    pub included: Vec<AcquiredItem>,
    pub failures: Vec<(AcquiredItem, ItemError)>,
}

pub struct Assembler<D: AudioDecoder> {
    decoder: D,
}

impl<D: AudioDecoder> Assembler<D> {
    pub fn new(decoder: D) -> Self {
        Self { decoder }
    }

    /// Build the mashup from `items` in the order given.
    ///
    /// # Arguments
    /// * `items` - Acquired items; anything not materialized is skipped
    /// * `target` - Length every clip is trimmed to
    /// * `on_progress` - Called with (processed, total) after each item
    pub fn assemble<F>(&self, items: &[AcquiredItem], target: Duration, on_progress: F) -> AssemblyOutcome
    where
        F: Fn(usize, usize),
    {
        let mut outcome = AssemblyOutcome::default();
        let total = items.len();

        for (processed, item) in items.iter().enumerate() {
            match self.process(item, target, &mut outcome.buffer) {
                Ok(()) => outcome.included.push(item.clone()),
                Err(reason) => {
                    log::warn!(
                        "Error while processing {}. Skipping... ({})",
                        item.local_path.display(),
                        reason
                    );
                    outcome.failures.push((item.clone(), reason));
                }
            }
            on_progress(processed + 1, total);
        }

        log::info!(
            "Assembled {} of {} clips ({:.1}s)",
            outcome.included.len(),
            total,
            outcome.buffer.duration().as_secs_f64()
        );

        outcome
    }

    fn process(&self, item: &AcquiredItem, target: Duration, buffer: &mut AudioClip) -> Result<(), ItemError> {
        if !item.status.is_materialized() {
            return Err(ItemError::NotMaterialized);
        }

        let audio = self.decoder.decode_prefix(&item.local_path, target)?;
        let clip = trimmer::trim(&audio, target)?;
        buffer.append(&clip)
    }
}
