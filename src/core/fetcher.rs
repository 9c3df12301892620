//! Audio retrieval through yt-dlp

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::acquisition::AudioFetcher;
use crate::core::validation;
use crate::error::ItemError;

/// Sample rate every download is converted to, so clips can be concatenated
pub const TARGET_SAMPLE_RATE: u32 = 44_100;
pub const TARGET_CHANNELS: u16 = 2;

pub struct YtDlpFetcher {
    yt_dlp_path: PathBuf,
    ffmpeg_path: Option<PathBuf>,
    audio_quality: String,
}

impl YtDlpFetcher {
    pub fn new(yt_dlp_path: impl Into<PathBuf>) -> Self {
        Self {
            yt_dlp_path: yt_dlp_path.into(),
            ffmpeg_path: None,
            audio_quality: "192K".to_string(),
        }
    }

    /// Point yt-dlp at a specific ffmpeg for the extraction step
    pub fn with_ffmpeg(mut self, ffmpeg_path: impl Into<PathBuf>) -> Self {
        self.ffmpeg_path = Some(ffmpeg_path.into());
        self
    }

    pub fn build_command(&self, source_url: &str, destination: &Path) -> Command {
        let mut cmd = Command::new(&self.yt_dlp_path);

        // yt-dlp picks the extension itself; the template keeps the stem
        let template = destination.with_extension("%(ext)s");

        cmd.arg("-f")
            .arg("bestaudio/best")
            .arg("-x")
            .arg("--audio-format")
            .arg("mp3")
            .arg("--audio-quality")
            .arg(&self.audio_quality)
            .arg("--postprocessor-args")
            .arg(format!(
                "ExtractAudio:-ar {} -ac {}",
                TARGET_SAMPLE_RATE, TARGET_CHANNELS
            ))
            .arg("--no-playlist")
            .arg("--no-continue")
            .arg("--quiet")
            .arg("--no-warnings")
            .arg("-o")
            .arg(template);

        if let Some(ffmpeg) = &self.ffmpeg_path {
            cmd.arg("--ffmpeg-location").arg(ffmpeg);
        }

        cmd.arg(source_url);
        cmd
    }
}

impl AudioFetcher for YtDlpFetcher {
    fn fetch(&self, source_url: &str, destination: &Path) -> Result<PathBuf, ItemError> {
        validation::validate_url(source_url)
            .map_err(|e| ItemError::retrieval(format!("refusing source URL: {:#}", e)))?;

        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ItemError::retrieval(format!("cannot create {}: {}", parent.display(), e)))?;
        }

        let mut cmd = self.build_command(source_url, destination);
        log::debug!("Running {:?}", cmd);

        let output = cmd
            .output()
            .map_err(|e| ItemError::retrieval(format!("failed to run yt-dlp: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let last_line = stderr.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or("");
            return Err(ItemError::retrieval(format!(
                "yt-dlp exited with {}: {}",
                output.status,
                last_line.trim()
            )));
        }

        Ok(destination.to_path_buf())
    }
}
