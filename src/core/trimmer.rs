//! Clip trimmer

use std::time::Duration;

use crate::core::audio::{frames_for, AudioClip};
use crate::error::ItemError;

/// Cut `clip` down to exactly `target`.
///
/// A clip must be strictly longer than the target; shorter or equal clips
/// are rejected instead of padded or looped.
pub fn trim(clip: &AudioClip, target: Duration) -> Result<AudioClip, ItemError> {
    let target_frames = frames_for(target, clip.sample_rate());

    if clip.frames() <= target_frames {
        return Err(ItemError::ClipTooShort {
            actual_secs: clip.duration().as_secs_f64(),
            target_secs: target.as_secs(),
        });
    }

    Ok(clip.prefix(target_frames))
}
