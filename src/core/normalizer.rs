//! Result normalizer
//!
//! Turns raw search candidates into the canonical, index-addressable
//! result set that callers select from.

use serde::Serialize;

use crate::core::search::{Popularity, RawCandidate};
use crate::error::{MashupError, Result};

/// Base used for relative URL fragments returned by the search provider
pub const SOURCE_BASE_URL: &str = "https://www.youtube.com/";

/// One canonical search row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub index: usize,
    pub title: String,
    pub popularity: u64,
    pub popularity_display: String,
    pub channel: String,
    pub source_url: String,
    pub clip_duration: String,
}

/// The result set produced by one search.
///
/// Indices handed out to callers are only valid against the session that
/// produced them; running a new search yields a new session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchSession {
    query: String,
    results: Vec<SearchResult>,
}

impl SearchSession {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn get(&self, index: usize) -> Option<&SearchResult> {
        self.results.get(index)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Normalize raw candidates into a new [`SearchSession`].
///
/// Fails as a whole if any candidate carries popularity text that cannot be
/// read as a view count.
pub fn normalize(query: &str, raw: Vec<RawCandidate>) -> Result<SearchSession> {
    let mut rows = Vec::with_capacity(raw.len());

    for candidate in raw {
        let popularity = parse_popularity(&candidate.views).ok_or_else(|| {
            MashupError::InvalidPopularity {
                title: candidate.title.clone(),
                value: match &candidate.views {
                    Popularity::Text(text) => text.clone(),
                    Popularity::Count(n) => n.to_string(),
                },
            }
        })?;

        rows.push((
            popularity,
            candidate.title,
            candidate.channel,
            absolute_url(&candidate.url_suffix),
            candidate.duration,
        ));
    }

    // stable: equal view counts keep provider rank
    rows.sort_by(|a, b| b.0.cmp(&a.0));

    let results = rows
        .into_iter()
        .enumerate()
        .map(
            |(index, (popularity, title, channel, source_url, clip_duration))| SearchResult {
                index,
                title,
                popularity,
                popularity_display: format_popularity(popularity),
                channel,
                source_url,
                clip_duration,
            },
        )
        .collect();

    Ok(SearchSession {
        query: query.to_string(),
        results,
    })
}

/// Read a view count from its numeric or textual form.
///
/// Text like `"12,345 views"` is accepted; anything else that is not a plain
/// integer returns `None`.
pub fn parse_popularity(value: &Popularity) -> Option<u64> {
    match value {
        Popularity::Count(n) => Some(*n),
        Popularity::Text(text) => {
            let cleaned = text.replace(',', "");
            let cleaned = cleaned.trim();
            let cleaned = cleaned
                .strip_suffix(" views")
                .or_else(|| cleaned.strip_suffix(" view"))
                .unwrap_or(cleaned)
                .trim();
            cleaned.parse::<u64>().ok()
        }
    }
}

/// Format a view count as `1.5K`, `2.5M`, `3.0B`, or the plain number below 1000
pub fn format_popularity(views: u64) -> String {
    const BILLION: u64 = 1_000_000_000;
    const MILLION: u64 = 1_000_000;
    const THOUSAND: u64 = 1_000;

    if views >= BILLION {
        format!("{:.1}B", views as f64 / BILLION as f64)
    } else if views >= MILLION {
        format!("{:.1}M", views as f64 / MILLION as f64)
    } else if views >= THOUSAND {
        format!("{:.1}K", views as f64 / THOUSAND as f64)
    } else {
        views.to_string()
    }
}

fn absolute_url(fragment: &str) -> String {
    if fragment.starts_with("http://") || fragment.starts_with("https://") {
        fragment.to_string()
    } else {
        format!("{}{}", SOURCE_BASE_URL, fragment.trim_start_matches('/'))
    }
}
