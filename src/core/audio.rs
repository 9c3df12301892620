//! In-memory PCM audio
//!
//! Samples are interleaved `f32` in `[-1.0, 1.0]`. A clip with no samples
//! has no fixed format yet; the first append into it adopts the format of
//! the appended clip.

use std::time::Duration;

use crate::error::ItemError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioClip {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl AudioClip {
    /// Empty buffer with no format
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        let channels = channels.max(1);
        let mut samples = samples;
        // drop a trailing partial frame
        let whole = samples.len() - samples.len() % channels as usize;
        samples.truncate(whole);

        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    /// Silence of the given length, handy for fixtures
    pub fn silence(duration: Duration, sample_rate: u32, channels: u16) -> Self {
        let frames = frames_for(duration, sample_rate);
        Self::new(vec![0.0; frames * channels.max(1) as usize], sample_rate, channels)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }

    /// First `frames` frames of the clip (or the whole clip if shorter)
    pub fn prefix(&self, frames: usize) -> AudioClip {
        let end = (frames * self.channels as usize).min(self.samples.len());
        AudioClip {
            samples: self.samples[..end].to_vec(),
            sample_rate: self.sample_rate,
            channels: self.channels,
        }
    }

    /// Append another clip. Fails without modifying `self` when the formats
    /// differ.
    pub fn append(&mut self, other: &AudioClip) -> Result<(), ItemError> {
        if other.is_empty() {
            return Ok(());
        }

        if self.is_empty() {
            self.sample_rate = other.sample_rate;
            self.channels = other.channels;
        } else if self.sample_rate != other.sample_rate || self.channels != other.channels {
            return Err(ItemError::IncompatibleFormat {
                expected_rate: self.sample_rate,
                expected_channels: self.channels,
                rate: other.sample_rate,
                channels: other.channels,
            });
        }

        self.samples.extend_from_slice(&other.samples);
        Ok(())
    }
}

/// Number of frames covering `duration` at `sample_rate`
pub fn frames_for(duration: Duration, sample_rate: u32) -> usize {
    (duration.as_secs_f64() * sample_rate as f64).round() as usize
}
