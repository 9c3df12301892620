//! Download cache
//!
//! Every search result maps to exactly one file in the download directory.
//! The file name is derived from the result itself:
//!
//! ```text
//! <sanitized title>-<first 12 hex chars of sha256(source_url)>.mp3
//! ```
//!
//! The title part keeps names readable, the hash keeps two results with the
//! same title apart. Presence of the file is the only check made: a
//! truncated download left behind by an interrupted run is reused as-is.

use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::normalizer::SearchResult;

/// Extension of every cached audio file
pub const CACHE_EXTENSION: &str = "mp3";

const MAX_TITLE_CHARS: usize = 80;
const HASH_CHARS: usize = 12;

#[derive(Debug, Clone)]
pub struct MediaCache {
    dir: PathBuf,
}

impl MediaCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Expected local path for a search result
    pub fn path_for(&self, result: &SearchResult) -> PathBuf {
        self.dir.join(cache_file_name(&result.title, &result.source_url))
    }

    pub fn contains(&self, result: &SearchResult) -> bool {
        self.path_for(result).is_file()
    }

    /// Cached downloads currently in the directory. Only names produced by
    /// [`cache_file_name`] are listed; other files are left alone.
    pub fn entries(&self) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };

        let mut files: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .map(is_cache_file_name)
                        .unwrap_or(false)
            })
            .collect();
        files.sort();
        files
    }
}

/// Deterministic file name for a title/url pair
pub fn cache_file_name(title: &str, source_url: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(source_url.as_bytes()));
    let stem = sanitize_title(title);

    if stem.is_empty() {
        format!("{}.{}", &digest[..HASH_CHARS], CACHE_EXTENSION)
    } else {
        format!("{}-{}.{}", stem, &digest[..HASH_CHARS], CACHE_EXTENSION)
    }
}

/// Whether `name` has the `<title>-<hash>.mp3` or `<hash>.mp3` shape
pub fn is_cache_file_name(name: &str) -> bool {
    let Some(stem) = name.strip_suffix(&format!(".{}", CACHE_EXTENSION)) else {
        return false;
    };
    if stem.len() < HASH_CHARS || !stem.is_char_boundary(stem.len() - HASH_CHARS) {
        return false;
    }

    let (title, hash) = stem.split_at(stem.len() - HASH_CHARS);
    let hash_ok = hash
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));

    hash_ok && (title.is_empty() || (title.len() > 1 && title.ends_with('-')))
}

/// Reduce a title to characters that are safe in file names on every platform
pub fn sanitize_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut last_was_sep = false;

    for ch in title.chars() {
        if ch.is_alphanumeric() {
            out.push(ch);
            last_was_sep = false;
        } else if !last_was_sep && !out.is_empty() {
            out.push('_');
            last_was_sep = true;
        }

        if out.chars().count() >= MAX_TITLE_CHARS {
            break;
        }
    }

    out.trim_end_matches('_').to_string()
}
