//! Removal of intermediate downloads
//!
//! # Examples
//!
//! ```no_run
//! use mashup::core::cache::MediaCache;
//! use mashup::core::cleanup::clear_cache;
//!
//! let cache = MediaCache::new("/tmp/mashup-downloads");
//!
//! // Dry run: report what would go
//! let stats = clear_cache(&cache, true, |processed, total| {
//!     println!("Progress: {}/{}", processed, total);
//! });
//! println!("{} files ({} bytes)", stats.total_files, stats.total_size);
//! ```

use std::fs;
use std::io;
use std::path::Path;

use crate::core::acquisition::AcquiredItem;
use crate::core::cache::MediaCache;

/// Statistics from cleanup operations
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupStats {
    pub total_files: usize,
    pub total_size: u64,
    pub deleted_files: usize,
    pub deleted_size: u64,
    pub failed_files: usize,
    /// Set when nothing was touched because retention was requested
    pub retained: bool,
}

/// Delete the local file of every item unless `retain` is set.
///
/// Failed items are included: a partial download may sit at their path.
/// Files that do not exist are not counted as failures.
pub fn cleanup(items: &[AcquiredItem], retain: bool) -> CleanupStats {
    let mut stats = CleanupStats {
        total_files: items.len(),
        retained: retain,
        ..Default::default()
    };

    if retain {
        log::info!("Keeping {} downloaded files", items.len());
        return stats;
    }

    for item in items {
        remove_one(&item.local_path, &mut stats);
    }

    stats
}

/// Delete every cached download. With `dry_run` nothing is removed but the
/// statistics are filled as if it had been.
pub fn clear_cache<F>(cache: &MediaCache, dry_run: bool, on_progress: F) -> CleanupStats
where
    F: Fn(usize, usize),
{
    let entries = cache.entries();
    let mut stats = CleanupStats {
        total_files: entries.len(),
        ..Default::default()
    };

    for (processed, path) in entries.iter().enumerate() {
        let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        stats.total_size += size;

        if dry_run {
            stats.deleted_files += 1;
            stats.deleted_size += size;
        } else {
            remove_one(path, &mut stats);
        }

        on_progress(processed + 1, entries.len());
    }

    stats
}

fn remove_one(path: &Path, stats: &mut CleanupStats) {
    let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    match fs::remove_file(path) {
        Ok(()) => {
            stats.deleted_files += 1;
            stats.deleted_size += size;
            log::debug!("Removed {}", path.display());
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            stats.failed_files += 1;
            log::warn!("Could not remove {}: {}", path.display(), e);
        }
    }
}
