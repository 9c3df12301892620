//! Search collaborator
//!
//! The pipeline only needs "query in, ranked candidates out". The default
//! provider asks yt-dlp for a flat `ytsearchN:` listing and maps each entry
//! to a [`RawCandidate`].

use serde::Deserialize;
use std::path::PathBuf;
use std::process::Command;
use std::time::Instant;

use crate::error::{MashupError, Result};

/// View count as reported by the source: either a number or display text
/// such as `"12,345 views"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Popularity {
    Count(u64),
    Text(String),
}

/// One ranked search hit before normalization
#[derive(Debug, Clone, PartialEq)]
pub struct RawCandidate {
    pub title: String,
    pub duration: String,
    pub views: Popularity,
    pub channel: String,
    pub url_suffix: String,
}

/// Maps a query to ranked candidate records
pub trait SearchProvider {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<RawCandidate>>;
}

/// Search backed by `yt-dlp --flat-playlist`
pub struct YtDlpSearch {
    yt_dlp_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct FlatPlaylist {
    #[serde(default)]
    entries: Vec<FlatEntry>,
}

#[derive(Debug, Deserialize)]
struct FlatEntry {
    id: Option<String>,
    title: Option<String>,
    duration: Option<f64>,
    view_count: Option<Popularity>,
    channel: Option<String>,
    uploader: Option<String>,
    url: Option<String>,
}

impl YtDlpSearch {
    pub fn new(yt_dlp_path: impl Into<PathBuf>) -> Self {
        Self {
            yt_dlp_path: yt_dlp_path.into(),
        }
    }
}

impl SearchProvider for YtDlpSearch {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<RawCandidate>> {
        let started = Instant::now();
        log::debug!("Searching for '{}' (limit {})", query, limit);

        let output = Command::new(&self.yt_dlp_path)
            .arg("--flat-playlist")
            .arg("--dump-single-json")
            .arg("--no-warnings")
            .arg(format!("ytsearch{}:{}", limit, query))
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    MashupError::tool_missing(format!("yt-dlp not found at {:?}", self.yt_dlp_path))
                }
                _ => MashupError::Io(e),
            })?;

        if !output.status.success() {
            return Err(MashupError::search(format!(
                "yt-dlp exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let candidates = parse_flat_playlist(&output.stdout)?;

        log::debug!(
            "Search completed in {:.2} seconds, found {} results",
            started.elapsed().as_secs_f64(),
            candidates.len()
        );

        Ok(candidates)
    }
}

/// Parse yt-dlp's `--dump-single-json` output for a search playlist
pub fn parse_flat_playlist(json: &[u8]) -> Result<Vec<RawCandidate>> {
    let playlist: FlatPlaylist = serde_json::from_slice(json)
        .map_err(|e| MashupError::search(format!("unreadable search response: {}", e)))?;

    let candidates = playlist
        .entries
        .into_iter()
        .filter_map(|entry| {
            let url_suffix = match (&entry.id, &entry.url) {
                (Some(id), _) => format!("watch?v={}", id),
                (None, Some(url)) => url.clone(),
                (None, None) => {
                    log::debug!("Dropping search entry without id or url: {:?}", entry.title);
                    return None;
                }
            };

            Some(RawCandidate {
                title: entry.title.unwrap_or_default(),
                duration: entry.duration.map(format_duration_label).unwrap_or_default(),
                views: entry.view_count.unwrap_or(Popularity::Count(0)),
                channel: entry.channel.or(entry.uploader).unwrap_or_default(),
                url_suffix,
            })
        })
        .collect();

    Ok(candidates)
}

/// Render seconds the way video sites display them (`3:07`, `1:02:03`)
pub fn format_duration_label(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_playlist() {
        let json = br#"{
            "_type": "playlist",
            "entries": [
                {"id": "abc123", "title": "Song A", "duration": 187.0, "view_count": 1500, "channel": "Artist"},
                {"id": "def456", "title": "Song B", "duration": 3723, "view_count": "2,000 views", "uploader": "Uploader"},
                {"title": "No id or url"}
            ]
        }"#;

        let candidates = parse_flat_playlist(json).unwrap();
        assert_eq!(candidates.len(), 2);

        assert_eq!(candidates[0].url_suffix, "watch?v=abc123");
        assert_eq!(candidates[0].duration, "3:07");
        assert_eq!(candidates[0].views, Popularity::Count(1500));
        assert_eq!(candidates[0].channel, "Artist");

        assert_eq!(candidates[1].duration, "1:02:03");
        assert_eq!(candidates[1].views, Popularity::Text("2,000 views".to_string()));
        assert_eq!(candidates[1].channel, "Uploader");
    }

    #[test]
    fn test_parse_flat_playlist_missing_views_defaults_to_zero() {
        let json = br#"{"entries": [{"id": "x", "title": "t"}]}"#;
        let candidates = parse_flat_playlist(json).unwrap();
        assert_eq!(candidates[0].views, Popularity::Count(0));
    }

    #[test]
    fn test_parse_flat_playlist_rejects_garbage() {
        assert!(parse_flat_playlist(b"not json").is_err());
    }

    #[test]
    fn test_format_duration_label() {
        assert_eq!(format_duration_label(0.0), "0:00");
        assert_eq!(format_duration_label(59.6), "1:00");
        assert_eq!(format_duration_label(3600.0), "1:00:00");
    }
}
