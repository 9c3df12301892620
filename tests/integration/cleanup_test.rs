// Clearing the download cache

use super::fixtures::write_wav;
use mashup::core::cleanup::clear_cache;
use mashup::core::MediaCache;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_clear_cache_only_touches_audio() {
    let temp = TempDir::new().unwrap();
    write_wav(&temp.path().join("a-000000000000.mp3"), 1);
    write_wav(&temp.path().join("b-111111111111.mp3"), 1);
    fs::write(temp.path().join("notes.txt"), "keep me").unwrap();

    let cache = MediaCache::new(temp.path());
    let stats = clear_cache(&cache, false, |_, _| {});

    assert_eq!(stats.total_files, 2);
    assert_eq!(stats.deleted_files, 2);
    assert_eq!(stats.failed_files, 0);
    assert!(cache.entries().is_empty());
    assert!(temp.path().join("notes.txt").exists());
}

#[test]
fn test_clear_cache_dry_run() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("a-000000000000.mp3");
    write_wav(&file, 1);
    let size = fs::metadata(&file).unwrap().len();

    let stats = clear_cache(&MediaCache::new(temp.path()), true, |_, _| {});

    assert_eq!(stats.deleted_files, 1);
    assert_eq!(stats.deleted_size, size);
    assert!(file.exists());
}

#[test]
fn test_clear_missing_cache_dir() {
    let temp = TempDir::new().unwrap();
    let stats = clear_cache(&MediaCache::new(temp.path().join("absent")), false, |_, _| {});
    assert_eq!(stats.total_files, 0);
}

#[test]
fn test_clear_cache_keeps_user_music() {
    let temp = TempDir::new().unwrap();
    let ours = temp.path().join("Track-0123456789ab.mp3");
    let theirs = temp.path().join("My Favourite Album - 01.mp3");
    write_wav(&ours, 1);
    write_wav(&theirs, 1);

    let stats = clear_cache(&MediaCache::new(temp.path()), false, |_, _| {});

    assert_eq!(stats.deleted_files, 1);
    assert!(!ours.exists());
    assert!(theirs.exists());
}
