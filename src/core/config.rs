use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Number of search results requested when nothing else is configured
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Keys accepted by `mashup config set/get`
pub const CONFIG_KEYS: [&str; 5] = [
    "download_dir",
    "yt_dlp_path",
    "ffmpeg_path",
    "max_results",
    "output_format",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Mp3,
    Wav,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Mp3 => "mp3",
            OutputFormat::Wav => "wav",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mp3" => Ok(OutputFormat::Mp3),
            "wav" => Ok(OutputFormat::Wav),
            other => Err(anyhow!("Unknown output format '{}'. Use: mp3 or wav", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where downloaded audio is cached between runs
    #[serde(default)]
    pub download_dir: Option<String>,
    #[serde(default)]
    pub yt_dlp_path: Option<String>,
    #[serde(default)]
    pub yt_dlp_installed_by_mashup: bool,
    #[serde(default)]
    pub ffmpeg_path: Option<String>,
    #[serde(default)]
    pub ffmpeg_installed_by_mashup: bool,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            download_dir: None,
            yt_dlp_path: None,
            yt_dlp_installed_by_mashup: false,
            ffmpeg_path: None,
            ffmpeg_installed_by_mashup: false,
            max_results: DEFAULT_MAX_RESULTS,
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from an explicit file. Missing, empty or unreadable files give
    /// the defaults.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        if data.is_empty() {
            return Ok(Config::default());
        }

        // An older or hand-edited file that no longer parses is replaced on next save
        Ok(serde_json::from_slice(&data).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable config {:?}: {}", config_path, e);
            Config::default()
        }))
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data = serde_json::to_vec_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(config_path, data)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("mashup").join("config.json"))
    }

    /// Configured download directory, or `<cache_dir>/mashup/downloads`
    pub fn get_download_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.download_dir {
            return Ok(PathBuf::from(dir));
        }

        let cache_dir = dirs::cache_dir().with_context(|| "Could not determine cache directory")?;
        Ok(cache_dir.join("mashup").join("downloads"))
    }

    pub fn set_download_dir(&mut self, path: String) {
        self.download_dir = Some(path);
    }

    pub fn get_yt_dlp_path(&self) -> Option<&String> {
        self.yt_dlp_path.as_ref()
    }

    pub fn set_yt_dlp_path(&mut self, path: String) {
        self.yt_dlp_path = Some(path);
    }

    pub fn set_yt_dlp_installed_by_mashup(&mut self, installed: bool) {
        self.yt_dlp_installed_by_mashup = installed;
    }

    pub fn get_ffmpeg_path(&self) -> Option<&String> {
        self.ffmpeg_path.as_ref()
    }

    pub fn set_ffmpeg_path(&mut self, path: String) {
        self.ffmpeg_path = Some(path);
    }

    pub fn set_ffmpeg_installed_by_mashup(&mut self, installed: bool) {
        self.ffmpeg_installed_by_mashup = installed;
    }

    /// Set a value by its user-facing key
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "download_dir" => self.download_dir = Some(value.to_string()),
            "yt_dlp_path" => {
                self.yt_dlp_path = Some(value.to_string());
                self.yt_dlp_installed_by_mashup = false;
            }
            "ffmpeg_path" => {
                self.ffmpeg_path = Some(value.to_string());
                self.ffmpeg_installed_by_mashup = false;
            }
            "max_results" => {
                let n: usize = value
                    .trim()
                    .parse()
                    .with_context(|| format!("max_results must be a number, got '{}'", value))?;
                if n == 0 {
                    return Err(anyhow!("max_results must be at least 1"));
                }
                self.max_results = n;
            }
            "output_format" => self.output_format = value.parse()?,
            _ => {
                return Err(anyhow!(
                    "Unknown key '{}'. Valid keys: {}",
                    key,
                    CONFIG_KEYS.join(", ")
                ))
            }
        }
        Ok(())
    }

    /// Read a value by its user-facing key. `None` means unset.
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        let value = match key {
            "download_dir" => self.download_dir.clone(),
            "yt_dlp_path" => self.yt_dlp_path.clone(),
            "ffmpeg_path" => self.ffmpeg_path.clone(),
            "max_results" => Some(self.max_results.to_string()),
            "output_format" => Some(self.output_format.to_string()),
            _ => {
                return Err(anyhow!(
                    "Unknown key '{}'. Valid keys: {}",
                    key,
                    CONFIG_KEYS.join(", ")
                ))
            }
        };
        Ok(value)
    }
}
