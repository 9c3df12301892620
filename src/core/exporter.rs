//! Exporter
//!
//! Writes the assembled mashup to disk. Writing happens into a sibling
//! `.partial` file that is renamed over the target once encoding succeeded,
//! so an existing file is only ever replaced by a complete one.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::audio::AudioClip;
use crate::error::{MashupError, Result};

/// Serializes PCM audio into a file format
pub trait AudioEncoder {
    /// File extension (without dot) the encoder produces
    fn extension(&self) -> &str;

    fn encode(&self, clip: &AudioClip, path: &Path) -> Result<()>;
}

/// 16-bit PCM WAV via hound
#[derive(Debug, Default, Clone, Copy)]
pub struct WavEncoder;

impl AudioEncoder for WavEncoder {
    fn extension(&self) -> &str {
        "wav"
    }

    fn encode(&self, clip: &AudioClip, path: &Path) -> Result<()> {
        let spec = hound::WavSpec {
            channels: clip.channels(),
            sample_rate: clip.sample_rate(),
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(path, spec)
            .map_err(|e| MashupError::export(format!("cannot create {}: {}", path.display(), e)))?;

        for &sample in clip.samples() {
            let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer
                .write_sample(value)
                .map_err(|e| MashupError::export(format!("write failed: {}", e)))?;
        }

        writer
            .finalize()
            .map_err(|e| MashupError::export(format!("cannot finalize {}: {}", path.display(), e)))?;

        Ok(())
    }
}

/// MP3 through an ffmpeg binary. The clip is staged as WAV first.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    ffmpeg_path: PathBuf,
    bitrate: String,
}

impl FfmpegEncoder {
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            bitrate: "192k".to_string(),
        }
    }

    pub fn with_bitrate(mut self, bitrate: impl Into<String>) -> Self {
        self.bitrate = bitrate.into();
        self
    }
}

impl AudioEncoder for FfmpegEncoder {
    fn extension(&self) -> &str {
        "mp3"
    }

    fn encode(&self, clip: &AudioClip, path: &Path) -> Result<()> {
        let staging = path.with_extension("staging.wav");
        WavEncoder.encode(clip, &staging)?;

        let mut cmd = Command::new(&self.ffmpeg_path);
        cmd.arg("-y")
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-i")
            .arg(&staging)
            .arg("-codec:a")
            .arg("libmp3lame")
            .arg("-b:a")
            .arg(&self.bitrate)
            .arg(path);

        log::debug!("Running {:?}", cmd);
        let result = cmd.output();
        let _ = fs::remove_file(&staging);

        let output = result.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                MashupError::tool_missing(format!("ffmpeg not found at {:?}", self.ffmpeg_path))
            }
            _ => MashupError::Io(e),
        })?;

        if !output.status.success() {
            return Err(MashupError::export(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }
}

/// What to do when the output file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    Overwrite,
    Abort,
    #[default]
    AskCaller,
}

/// Consulted when the policy is [`OverwritePolicy::AskCaller`].
/// Only `true` allows the write.
pub trait ConfirmOverwrite {
    fn confirm_overwrite(&self, path: &Path) -> bool;
}

impl<F: Fn(&Path) -> bool> ConfirmOverwrite for F {
    fn confirm_overwrite(&self, path: &Path) -> bool {
        self(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written(PathBuf),
    /// Target existed and the write was not confirmed
    Skipped(PathBuf),
}

impl ExportOutcome {
    pub fn path(&self) -> &Path {
        match self {
            ExportOutcome::Written(path) | ExportOutcome::Skipped(path) => path,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, ExportOutcome::Written(_))
    }
}

pub struct Exporter {
    encoder: Box<dyn AudioEncoder>,
}

impl Exporter {
    pub fn new(encoder: impl AudioEncoder + 'static) -> Self {
        Self {
            encoder: Box::new(encoder),
        }
    }

    pub fn extension(&self) -> &str {
        self.encoder.extension()
    }

    pub fn export(
        &self,
        clip: &AudioClip,
        output_name: &str,
        policy: OverwritePolicy,
        confirm: &dyn ConfirmOverwrite,
    ) -> Result<ExportOutcome> {
        if clip.is_empty() {
            return Err(MashupError::EmptyAudio);
        }

        let target = with_extension(output_name, self.encoder.extension());

        if target.exists() {
            let allowed = match policy {
                OverwritePolicy::Overwrite => true,
                OverwritePolicy::Abort => false,
                OverwritePolicy::AskCaller => confirm.confirm_overwrite(&target),
            };

            if !allowed {
                log::info!("Not overwriting existing file {}", target.display());
                return Ok(ExportOutcome::Skipped(target));
            }
        }

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let partial = partial_path(&target, self.encoder.extension());
        if let Err(e) = self.encoder.encode(clip, &partial) {
            let _ = fs::remove_file(&partial);
            return Err(e);
        }
        fs::rename(&partial, &target)?;

        log::info!(
            "Saved {:.1}s of audio to {}",
            clip.duration().as_secs_f64(),
            target.display()
        );

        Ok(ExportOutcome::Written(target))
    }
}

/// Append `.ext` unless the name already ends with it (case-insensitive)
pub fn with_extension(output_name: &str, extension: &str) -> PathBuf {
    let has_extension = Path::new(output_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false);

    if has_extension {
        PathBuf::from(output_name)
    } else {
        PathBuf::from(format!("{}.{}", output_name, extension))
    }
}

fn partial_path(target: &Path, extension: &str) -> PathBuf {
    let stem = target
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    target.with_file_name(format!("{}.partial.{}", stem, extension))
}
