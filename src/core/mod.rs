// Core business logic module

pub mod acquisition;
pub mod assembler;
pub mod audio;
pub mod cache;
pub mod cleanup;
pub mod config;
pub mod decoder;
pub mod exporter;
pub mod ffmpeg_manager;
pub mod fetcher;
pub mod normalizer;
pub mod notifier;
pub mod pipeline;
pub mod search;
pub mod trimmer;
pub mod validation;
pub mod yt_dlp_manager;

// Re-export commonly used items
pub use acquisition::{AcquireStatus, AcquiredItem, Acquirer, AcquisitionReport, AudioFetcher, SelectionSet};
pub use assembler::{Assembler, AssemblyOutcome};
pub use audio::AudioClip;
pub use cache::MediaCache;
pub use cleanup::CleanupStats;
pub use config::{Config, OutputFormat};
pub use decoder::{AudioDecoder, SymphoniaDecoder};
pub use exporter::{ConfirmOverwrite, ExportOutcome, Exporter, FfmpegEncoder, OverwritePolicy, WavEncoder};
pub use ffmpeg_manager::FFmpegManager;
pub use fetcher::YtDlpFetcher;
pub use normalizer::{normalize, SearchResult, SearchSession};
pub use notifier::{LogNotifier, Notifier};
pub use pipeline::{JobReport, MashupJob, MashupPipeline};
pub use search::{Popularity, RawCandidate, SearchProvider, YtDlpSearch};
pub use yt_dlp_manager::YtDlpManager;
