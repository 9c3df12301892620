// Shared fakes and fixture builders

use mashup::core::{normalize, AudioFetcher, Popularity, RawCandidate, SearchSession};
use mashup::ItemError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Sample rate of generated fixtures; low to keep the files small
pub const FIXTURE_RATE: u32 = 8_000;

pub fn candidate(id: &str, views: Popularity) -> RawCandidate {
    RawCandidate {
        title: format!("Track {}", id),
        duration: "3:00".to_string(),
        views,
        channel: "Some Channel".to_string(),
        url_suffix: format!("watch?v={}", id),
    }
}

/// Popularities `[50, 2_000_500, 999]` for ids `low`, `top`, `mid`
pub fn scenario_session() -> SearchSession {
    normalize(
        "scenario",
        vec![
            candidate("low", Popularity::Count(50)),
            candidate("top", Popularity::Count(2_000_500)),
            candidate("mid", Popularity::Count(999)),
        ],
    )
    .unwrap()
}

/// Write a stereo 16-bit WAV of `seconds` at FIXTURE_RATE
pub fn write_wav(path: &Path, seconds: u32) {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: FIXTURE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for frame in 0..(seconds * FIXTURE_RATE) {
        let value = ((frame % 100) as i16 - 50) * 100;
        writer.write_sample(value).unwrap();
        writer.write_sample(value).unwrap();
    }
    writer.finalize().unwrap();
}

/// Number of frames in a WAV file
pub fn wav_frames(path: &Path) -> u32 {
    hound::WavReader::open(path).unwrap().duration()
}

/// Fetcher that "downloads" a generated WAV whose length depends on the URL.
/// URLs without a configured length fail.
#[derive(Default)]
pub struct FixtureFetcher {
    lengths: HashMap<String, u32>,
    calls: RefCell<Vec<String>>,
}

impl FixtureFetcher {
    pub fn with_length(mut self, video_id: &str, seconds: u32) -> Self {
        self.lengths.insert(video_id.to_string(), seconds);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl AudioFetcher for FixtureFetcher {
    fn fetch(&self, source_url: &str, destination: &Path) -> Result<PathBuf, ItemError> {
        self.calls.borrow_mut().push(source_url.to_string());

        let id = source_url.rsplit("v=").next().unwrap_or_default();
        let seconds = self
            .lengths
            .get(id)
            .copied()
            .ok_or_else(|| ItemError::retrieval(format!("video {} unavailable", id)))?;

        std::fs::create_dir_all(destination.parent().unwrap()).unwrap();
        write_wav(destination, seconds);
        Ok(destination.to_path_buf())
    }
}
