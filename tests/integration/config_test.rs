// Configuration persistence

use mashup::core::config::{Config, OutputFormat, DEFAULT_MAX_RESULTS};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_values_survive_save_and_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("mashup").join("config.json");

    let mut config = Config::default();
    config.set_value("download_dir", "/tmp/mashup-cache").unwrap();
    config.set_value("max_results", "25").unwrap();
    config.set_value("output_format", "wav").unwrap();
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.download_dir.as_deref(), Some("/tmp/mashup-cache"));
    assert_eq!(loaded.max_results, 25);
    assert_eq!(loaded.output_format, OutputFormat::Wav);
    assert_eq!(
        loaded.get_download_dir().unwrap(),
        std::path::PathBuf::from("/tmp/mashup-cache")
    );
}

#[test]
fn test_missing_and_corrupt_files_give_defaults() {
    let temp = TempDir::new().unwrap();

    let missing = Config::load_from(&temp.path().join("nope.json")).unwrap();
    assert_eq!(missing.max_results, DEFAULT_MAX_RESULTS);

    let corrupt = temp.path().join("corrupt.json");
    fs::write(&corrupt, "{ not json").unwrap();
    let loaded = Config::load_from(&corrupt).unwrap();
    assert_eq!(loaded.output_format, OutputFormat::Mp3);
}

#[test]
fn test_partial_file_fills_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.json");
    fs::write(&path, r#"{ "ffmpeg_path": "/opt/ffmpeg" }"#).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.get_ffmpeg_path().map(String::as_str), Some("/opt/ffmpeg"));
    assert_eq!(loaded.max_results, DEFAULT_MAX_RESULTS);
}

#[test]
fn test_invalid_values_rejected() {
    let mut config = Config::default();
    assert!(config.set_value("max_results", "0").is_err());
    assert!(config.set_value("max_results", "many").is_err());
    assert!(config.set_value("output_format", "flac").is_err());
    assert!(config.set_value("colour", "blue").is_err());
    assert!(config.get_value("colour").is_err());
    assert_eq!(config.max_results, DEFAULT_MAX_RESULTS);
}
