use std::io;
use thiserror::Error;

/// Job-level error. Any of these aborts the current mashup job.
#[derive(Error, Debug)]
pub enum MashupError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid popularity value '{value}' for '{title}'")]
    InvalidPopularity { title: String, value: String },

    #[error("Invalid selection: indices {indices:?} are out of range (valid: 0..{available})")]
    InvalidSelection {
        indices: Vec<usize>,
        available: usize,
    },

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Audio is empty, nothing to export")]
    EmptyAudio,

    #[error("Search failed: {0}")]
    Search(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Required tool not available: {0}")]
    ToolMissing(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for mashup operations
pub type Result<T> = std::result::Result<T, MashupError>;

impl MashupError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        MashupError::Config(msg.into())
    }

    /// Create an invalid duration error
    pub fn invalid_duration<S: Into<String>>(msg: S) -> Self {
        MashupError::InvalidDuration(msg.into())
    }

    /// Create a search error
    pub fn search<S: Into<String>>(msg: S) -> Self {
        MashupError::Search(msg.into())
    }

    /// Create an export error
    pub fn export<S: Into<String>>(msg: S) -> Self {
        MashupError::Export(msg.into())
    }

    pub fn tool_missing<S: Into<String>>(msg: S) -> Self {
        MashupError::ToolMissing(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        MashupError::Other(msg.into())
    }
}

/// Error scoped to a single search result or clip.
///
/// These never abort a job: the item is dropped from the mashup and the
/// error is recorded in the relevant report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ItemError {
    #[error("retrieval failed: {0}")]
    Retrieval(String),

    #[error("decode failed: {0}")]
    Decode(String),

    #[error("clip is too short: {actual_secs:.2}s available, {target_secs}s required")]
    ClipTooShort { actual_secs: f64, target_secs: u64 },

    #[error("incompatible format: expected {expected_rate}Hz/{expected_channels}ch, got {rate}Hz/{channels}ch")]
    IncompatibleFormat {
        expected_rate: u32,
        expected_channels: u16,
        rate: u32,
        channels: u16,
    },

    #[error("item was not materialized")]
    NotMaterialized,
}

impl ItemError {
    pub fn retrieval<S: Into<String>>(msg: S) -> Self {
        ItemError::Retrieval(msg.into())
    }

    pub fn decode<S: Into<String>>(msg: S) -> Self {
        ItemError::Decode(msg.into())
    }
}
