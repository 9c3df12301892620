//! Acquisition manager
//!
//! Resolves a selection of search results to local audio files. Retrieval
//! is best-effort per item: a failed download is recorded and the batch
//! moves on.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::cache::MediaCache;
use crate::core::normalizer::{SearchResult, SearchSession};
use crate::error::{ItemError, MashupError, Result};

/// Retrieves the audio track of one source into a local file
pub trait AudioFetcher {
    /// Download `source_url` so that a playable file exists at `destination`
    fn fetch(&self, source_url: &str, destination: &Path) -> std::result::Result<PathBuf, ItemError>;
}

impl<T: AudioFetcher + ?Sized> AudioFetcher for &T {
    fn fetch(&self, source_url: &str, destination: &Path) -> std::result::Result<PathBuf, ItemError> {
        (**self).fetch(source_url, destination)
    }
}

/// Ordered indices into one [`SearchSession`]. Empty means "everything".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    indices: Vec<usize>,
}

impl SelectionSet {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// Parse indices separated by whitespace and/or commas (`"0 2,5"`)
    pub fn parse(input: &str) -> Result<Self> {
        let indices = input
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<usize>()
                    .map_err(|_| MashupError::other(format!("'{}' is not a valid index", token)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { indices })
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn is_all(&self) -> bool {
        self.indices.is_empty()
    }

    /// Concrete indices against a session, rejecting any that are out of range
    pub fn resolve(&self, session: &SearchSession) -> Result<Vec<usize>> {
        if self.indices.is_empty() {
            return Ok((0..session.len()).collect());
        }

        let invalid: Vec<usize> = self
            .indices
            .iter()
            .copied()
            .filter(|&i| i >= session.len())
            .collect();

        if !invalid.is_empty() {
            return Err(MashupError::InvalidSelection {
                indices: invalid,
                available: session.len(),
            });
        }

        Ok(self.indices.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AcquireStatus {
    Fetched,
    AlreadyPresent,
    Failed(ItemError),
}

impl AcquireStatus {
    pub fn is_materialized(&self) -> bool {
        matches!(self, AcquireStatus::Fetched | AcquireStatus::AlreadyPresent)
    }
}

impl fmt::Display for AcquireStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquireStatus::Fetched => write!(f, "fetched"),
            AcquireStatus::AlreadyPresent => write!(f, "already present"),
            AcquireStatus::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}

/// A search result paired with its local file
#[derive(Debug, Clone, PartialEq)]
pub struct AcquiredItem {
    pub index: usize,
    pub title: String,
    pub source_url: String,
    pub local_path: PathBuf,
    pub status: AcquireStatus,
}

impl AcquiredItem {
    fn new(result: &SearchResult, local_path: PathBuf, status: AcquireStatus) -> Self {
        Self {
            index: result.index,
            title: result.title.clone(),
            source_url: result.source_url.clone(),
            local_path,
            status,
        }
    }
}

/// Every selected item in selection order, failed ones included
#[derive(Debug, Clone, Default)]
pub struct AcquisitionReport {
    pub items: Vec<AcquiredItem>,
}

impl AcquisitionReport {
    pub fn materialized(&self) -> Vec<AcquiredItem> {
        self.items
            .iter()
            .filter(|item| item.status.is_materialized())
            .cloned()
            .collect()
    }

    pub fn failures(&self) -> Vec<(&AcquiredItem, &ItemError)> {
        self.items
            .iter()
            .filter_map(|item| match &item.status {
                AcquireStatus::Failed(reason) => Some((item, reason)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: fn(&AcquireStatus) -> bool) -> usize {
        self.items.iter().filter(|item| wanted(&item.status)).count()
    }
}

pub struct Acquirer<F: AudioFetcher> {
    cache: MediaCache,
    fetcher: F,
}

impl<F: AudioFetcher> Acquirer<F> {
    pub fn new(cache: MediaCache, fetcher: F) -> Self {
        Self { cache, fetcher }
    }

    pub fn cache(&self) -> &MediaCache {
        &self.cache
    }

    /// Materialize every selected result of `session`.
    ///
    /// The whole selection is validated before any download starts.
    pub fn acquire(&self, session: &SearchSession, selection: &SelectionSet) -> Result<AcquisitionReport> {
        let indices = selection.resolve(session)?;
        let mut report = AcquisitionReport::default();

        for index in indices {
            // resolve() guarantees the index exists
            let Some(result) = session.get(index) else {
                continue;
            };
            report.items.push(self.acquire_one(result));
        }

        log::info!(
            "Acquired {} of {} items ({} reused, {} failed)",
            report.count(AcquireStatus::is_materialized),
            report.items.len(),
            report.count(|s| matches!(s, AcquireStatus::AlreadyPresent)),
            report.count(|s| matches!(s, AcquireStatus::Failed(_))),
        );

        Ok(report)
    }

    fn acquire_one(&self, result: &SearchResult) -> AcquiredItem {
        let path = self.cache.path_for(result);

        if path.is_file() {
            log::info!("File {} already exists. Skipping download", path.display());
            return AcquiredItem::new(result, path, AcquireStatus::AlreadyPresent);
        }

        log::info!("Downloading [{}] {}", result.index, result.title);

        let status = match self.fetcher.fetch(&result.source_url, &path) {
            Ok(_) if path.is_file() => AcquireStatus::Fetched,
            Ok(actual) => {
                let reason = ItemError::retrieval(format!(
                    "expected {} but fetcher produced {}",
                    path.display(),
                    actual.display()
                ));
                log::warn!("Skipping [{}] {}: {}", result.index, result.title, reason);
                AcquireStatus::Failed(reason)
            }
            Err(reason) => {
                log::warn!("Skipping [{}] {}: {}", result.index, result.title, reason);
                AcquireStatus::Failed(reason)
            }
        };

        AcquiredItem::new(result, path, status)
    }
}
