//! Audio decoding
//!
//! Files on disk are decoded to interleaved `f32` PCM with symphonia.

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::core::audio::{self, AudioClip};
use crate::error::ItemError;

/// Turns a local audio file into PCM
pub trait AudioDecoder {
    fn decode(&self, path: &Path) -> Result<AudioClip, ItemError>;

    /// Decode no more than one frame past `limit`. Sources shorter than
    /// `limit` come back whole.
    fn decode_prefix(&self, path: &Path, limit: Duration) -> Result<AudioClip, ItemError> {
        let clip = self.decode(path)?;
        let keep = audio::frames_for(limit, clip.sample_rate()) + 1;
        if clip.frames() > keep {
            Ok(clip.prefix(keep))
        } else {
            Ok(clip)
        }
    }
}

impl<T: AudioDecoder + ?Sized> AudioDecoder for &T {
    fn decode(&self, path: &Path) -> Result<AudioClip, ItemError> {
        (**self).decode(path)
    }

    fn decode_prefix(&self, path: &Path, limit: Duration) -> Result<AudioClip, ItemError> {
        (**self).decode_prefix(path, limit)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SymphoniaDecoder;

impl AudioDecoder for SymphoniaDecoder {
    fn decode(&self, path: &Path) -> Result<AudioClip, ItemError> {
        self.read(path, None)
    }

    fn decode_prefix(&self, path: &Path, limit: Duration) -> Result<AudioClip, ItemError> {
        self.read(path, Some(limit))
    }
}

impl SymphoniaDecoder {
    /// Decode packets until the stream ends or, with a `limit`, until more
    /// than `limit` worth of frames has been collected.
    fn read(&self, path: &Path, limit: Option<Duration>) -> Result<AudioClip, ItemError> {
        let file = File::open(path)
            .map_err(|e| ItemError::decode(format!("cannot open '{}': {}", path.display(), e)))?;

        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| ItemError::decode(format!("unrecognized format: {}", e)))?;

        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| ItemError::decode("no audio track found"))?;

        let track_id = track.id;
        let mut sample_rate = track.codec_params.sample_rate.unwrap_or(0);
        let mut channels = track
            .codec_params
            .channels
            .map(|c| c.count() as u16)
            .unwrap_or(0);

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| ItemError::decode(format!("unsupported codec: {}", e)))?;

        let mut samples: Vec<f32> = Vec::new();
        let mut sample_buf: Option<SampleBuffer<f32>> = None;
        let mut buf_frames: u64 = 0;

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => {
                    log::warn!("Stopped reading '{}': {}", path.display(), e);
                    break;
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => {
                    let needed = decoded.capacity() as u64;
                    if sample_buf.is_none() || needed > buf_frames {
                        let spec = *decoded.spec();
                        // trust the decoded stream over container metadata
                        sample_rate = spec.rate;
                        channels = spec.channels.count() as u16;
                        buf_frames = needed;
                        sample_buf = Some(SampleBuffer::<f32>::new(needed, spec));
                    }

                    if let Some(buf) = sample_buf.as_mut() {
                        buf.copy_interleaved_ref(decoded);
                        samples.extend_from_slice(buf.samples());
                    }

                    if let Some(limit) = limit {
                        if channels > 0
                            && samples.len() / channels as usize
                                > audio::frames_for(limit, sample_rate)
                        {
                            break;
                        }
                    }
                }
                Err(SymphoniaError::DecodeError(e)) => {
                    log::debug!("Skipping corrupt packet in '{}': {}", path.display(), e);
                }
                Err(e) => {
                    return Err(ItemError::decode(format!("{}: {}", path.display(), e)));
                }
            }
        }

        if samples.is_empty() || sample_rate == 0 || channels == 0 {
            return Err(ItemError::decode(format!(
                "no audio samples decoded from '{}'",
                path.display()
            )));
        }

        let clip = AudioClip::new(samples, sample_rate, channels);
        log::debug!(
            "Decoded '{}': {:.2}s at {}Hz, {} channels",
            path.display(),
            clip.duration().as_secs_f64(),
            sample_rate,
            channels
        );

        Ok(clip)
    }
}
