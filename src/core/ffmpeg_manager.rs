// FFmpegManager - locates or installs the ffmpeg used for audio extraction and MP3 export
use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::core::Config;

const BUILDS_API: &str = "https://api.github.com/repos/BtbN/FFmpeg-Builds/releases/latest";

#[derive(Default)]
pub struct FFmpegManager {
    config: Config,
}

impl FFmpegManager {
    pub fn new() -> Result<Self> {
        Ok(Self {
            config: Config::load()?,
        })
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn is_installed(&self) -> bool {
        if let Some(path) = self.config.get_ffmpeg_path() {
            Path::new(path).exists()
        } else {
            false
        }
    }

    pub fn get_binary_path(&self) -> Option<PathBuf> {
        self.config.get_ffmpeg_path().map(PathBuf::from)
    }

    fn check_system_ffmpeg() -> Option<PathBuf> {
        which::which("ffmpeg").ok()
    }

    /// Latest build tag from the GitHub releases API
    pub fn get_latest_version() -> Result<String> {
        println!("{}", "Checking latest ffmpeg build...".cyan());

        let client = reqwest::blocking::Client::builder()
            .user_agent("mashup-cli")
            .build()?;

        let response = client.get(BUILDS_API).send()?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Failed to query ffmpeg releases: HTTP {}",
                response.status()
            ));
        }

        let json: serde_json::Value = response.json()?;

        let tag = json["tag_name"]
            .as_str()
            .ok_or_else(|| anyhow!("Release has no tag_name"))?;

        println!("{} {}", "Latest build:".green(), tag.yellow().bold());

        Ok(tag.to_string())
    }

    /// Download the Windows build zip and pull ffmpeg.exe out of it
    pub fn download_and_extract(version: &str) -> Result<Vec<u8>> {
        let download_url = format!(
            "https://github.com/BtbN/FFmpeg-Builds/releases/download/{}/ffmpeg-master-latest-win64-gpl.zip",
            version
        );

        println!("{}", "Downloading ffmpeg...".cyan());
        println!("{} {}", "URL:".dimmed(), download_url.dimmed());

        let response =
            reqwest::blocking::get(&download_url).context("Failed to download ffmpeg")?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP {}: could not download ffmpeg",
                response.status()
            ));
        }

        let zip_bytes = response.bytes()?;
        println!("{} {} bytes", "Downloaded:".green(), zip_bytes.len());

        println!("{}", "Extracting...".cyan());
        extract_ffmpeg(Cursor::new(zip_bytes))
    }

    /// Install ffmpeg into the application bin directory.
    ///
    /// Prebuilt archives are only fetched on Windows; elsewhere ffmpeg is
    /// expected from the system package manager.
    pub fn install(&mut self) -> Result<PathBuf> {
        if !cfg!(windows) {
            return Err(anyhow!(
                "ffmpeg was not found on PATH. Install it with your package manager \
                 or run 'mashup config set ffmpeg_path <path>'"
            ));
        }

        let version = Self::get_latest_version()?;
        let ffmpeg_data = Self::download_and_extract(&version)?;

        let install_dir = Self::get_install_dir()?;
        fs::create_dir_all(&install_dir)?;

        let ffmpeg_path = install_dir.join("ffmpeg.exe");
        fs::write(&ffmpeg_path, ffmpeg_data).context("Failed to write ffmpeg.exe")?;

        self.config
            .set_ffmpeg_path(ffmpeg_path.to_string_lossy().to_string());
        self.config.set_ffmpeg_installed_by_mashup(true);
        self.config.save()?;

        println!("{}", "✓ FFmpeg ready".green());
        println!();

        Ok(ffmpeg_path)
    }

    fn get_install_dir() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("mashup").join("bin"))
    }

    /// Make sure ffmpeg can be run.
    /// Priority:
    /// 1. ffmpeg on the system PATH (silent)
    /// 2. a configured or previously installed copy (silent)
    /// 3. install it now
    pub fn ensure_ffmpeg(&mut self) -> Result<PathBuf> {
        if let Some(system_path) = Self::check_system_ffmpeg() {
            log::debug!("Using system ffmpeg at {}", system_path.display());
            return Ok(system_path);
        }

        if self.is_installed() {
            if let Some(path) = self.get_binary_path() {
                return Ok(path);
            }
        }

        println!();
        println!("{}", "🔧 Setting up FFmpeg (first run)...".cyan());
        self.install()
    }
}

/// Find `bin/ffmpeg.exe` inside a build archive
fn extract_ffmpeg<R: std::io::Read + std::io::Seek>(reader: R) -> Result<Vec<u8>> {
    let mut archive = zip::ZipArchive::new(reader).context("Failed to read the ZIP archive")?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let file_name = file.name().to_string();

        if file_name.ends_with("bin/ffmpeg.exe") {
            log::debug!("Found {}", file_name);
            let mut buffer = Vec::new();
            std::io::copy(&mut file, &mut buffer)?;
            return Ok(buffer);
        }
    }

    Err(anyhow!("ffmpeg.exe not found in the ZIP archive"))
}
