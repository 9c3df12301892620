use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::Config;

const RELEASES_URL: &str = "https://github.com/yt-dlp/yt-dlp/releases";

pub struct YtDlpManager {
    config: Config,
}

impl YtDlpManager {
    pub fn new() -> Result<Self> {
        Ok(Self {
            config: Config::load()?,
        })
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Whether a previously installed copy is still on disk
    pub fn is_installed(&self) -> bool {
        if let Some(path) = self.config.get_yt_dlp_path() {
            Path::new(path).exists()
        } else {
            false
        }
    }

    pub fn get_binary_path(&self) -> Option<PathBuf> {
        self.config.get_yt_dlp_path().map(PathBuf::from)
    }

    /// Name of the release asset for the running platform
    pub fn asset_name() -> &'static str {
        if cfg!(target_os = "windows") {
            "yt-dlp.exe"
        } else if cfg!(target_os = "macos") {
            "yt-dlp_macos"
        } else if cfg!(target_arch = "aarch64") {
            "yt-dlp_linux_aarch64"
        } else {
            "yt-dlp_linux"
        }
    }

    /// Latest release tag, read from the redirect of /releases/latest
    pub fn get_latest_version() -> Result<String> {
        println!("{}", "Checking latest yt-dlp release...".cyan());

        let client = reqwest::blocking::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let response = client.get(format!("{}/latest", RELEASES_URL)).send()?;

        // Location: https://github.com/yt-dlp/yt-dlp/releases/tag/2025.11.12
        if let Some(location) = response.headers().get("Location") {
            let location_str = location.to_str()?;

            if let Some(version) = location_str.split("/tag/").nth(1) {
                println!(
                    "{} {}",
                    "Latest version:".green(),
                    version.yellow().bold()
                );
                return Ok(version.to_string());
            }
        }

        Err(anyhow!("Could not determine the latest yt-dlp version"))
    }

    pub fn download_binary(version: &str) -> Result<Vec<u8>> {
        let download_url = format!(
            "{}/download/{}/{}",
            RELEASES_URL,
            version,
            Self::asset_name()
        );

        println!("{}", "Downloading yt-dlp...".cyan());
        println!("{} {}", "URL:".dimmed(), download_url.dimmed());

        let response =
            reqwest::blocking::get(&download_url).context("Failed to download yt-dlp")?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP {}: could not download yt-dlp",
                response.status()
            ));
        }

        let bytes = response.bytes()?.to_vec();

        println!("{} {} bytes", "Downloaded:".green(), bytes.len());

        Ok(bytes)
    }

    /// Download the latest release into the application bin directory
    pub fn install(&mut self) -> Result<PathBuf> {
        let version = Self::get_latest_version()?;
        let binary_data = Self::download_binary(&version)?;

        let install_dir = Self::get_install_dir()?;
        fs::create_dir_all(&install_dir)?;

        let binary_name = if cfg!(windows) { "yt-dlp.exe" } else { "yt-dlp" };
        let binary_path = install_dir.join(binary_name);
        fs::write(&binary_path, binary_data).context("Failed to write the yt-dlp binary")?;
        make_executable(&binary_path)?;

        self.config
            .set_yt_dlp_path(binary_path.to_string_lossy().to_string());
        self.config.set_yt_dlp_installed_by_mashup(true);
        self.config.save()?;

        println!("{}", "✓ yt-dlp ready".green());
        println!();

        Ok(binary_path)
    }

    fn get_install_dir() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("mashup").join("bin"))
    }

    fn check_system_ytdlp() -> Option<PathBuf> {
        which::which("yt-dlp").ok()
    }

    /// Make sure yt-dlp can be run.
    /// Priority:
    /// 1. yt-dlp on the system PATH (silent)
    /// 2. a copy we installed earlier (silent)
    /// 3. install it now (short notice on first run only)
    pub fn ensure_yt_dlp(&mut self) -> Result<PathBuf> {
        if let Some(system_path) = Self::check_system_ytdlp() {
            log::debug!("Using system yt-dlp at {}", system_path.display());
            return Ok(system_path);
        }

        if self.is_installed() {
            if let Some(path) = self.get_binary_path() {
                return Ok(path);
            }
        }

        println!();
        println!("{}", "🔧 Setting up yt-dlp (first run)...".cyan());
        self.install()
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
