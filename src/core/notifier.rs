//! Delivery of the finished mashup to a recipient

use anyhow::Result;
use std::path::Path;

pub trait Notifier {
    fn notify(&self, recipient: &str, file: &Path) -> Result<()>;
}

/// Records the recipient in the log; no message leaves the machine
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, recipient: &str, file: &Path) -> Result<()> {
        log::info!("Mashup {} ready for {}", file.display(), recipient);
        Ok(())
    }
}
