// Parsing yt-dlp search output through to a normalized session

use mashup::core::normalize;
use mashup::core::search::parse_flat_playlist;
use mashup::MashupError;

const SEARCH_JSON: &str = r#"{
    "_type": "playlist",
    "entries": [
        {"id": "aaa", "title": "Quiet one", "duration": 61.0, "view_count": 50, "channel": "A"},
        {"id": "bbb", "title": "Hit", "duration": 3725, "view_count": 2000500, "channel": "B"},
        {"id": "ccc", "title": "Middle", "duration": null, "view_count": 999, "uploader": "C"}
    ]
}"#;

#[test]
fn test_scenario_ordering_and_display() {
    let raw = parse_flat_playlist(SEARCH_JSON.as_bytes()).unwrap();
    let session = normalize("q", raw).unwrap();

    let titles: Vec<&str> = session.results().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Hit", "Middle", "Quiet one"]);

    let popularity: Vec<u64> = session.results().iter().map(|r| r.popularity).collect();
    assert_eq!(popularity, vec![2_000_500, 999, 50]);

    let display: Vec<&str> = session
        .results()
        .iter()
        .map(|r| r.popularity_display.as_str())
        .collect();
    assert_eq!(display, vec!["2.0M", "999", "50"]);

    let indices: Vec<usize> = session.results().iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);

    assert_eq!(session.results()[0].source_url, "https://www.youtube.com/watch?v=bbb");
}

#[test]
fn test_unparseable_popularity_fails_normalization() {
    let json = r#"{"entries": [{"id": "x", "title": "T", "view_count": "lots"}]}"#;
    let raw = parse_flat_playlist(json.as_bytes()).unwrap();

    let err = normalize("q", raw).unwrap_err();
    assert!(matches!(err, MashupError::InvalidPopularity { .. }));
}

#[test]
fn test_empty_search_gives_empty_session() {
    let raw = parse_flat_playlist(br#"{"entries": []}"#).unwrap();
    assert!(normalize("q", raw).unwrap().is_empty());
}

#[cfg(unix)]
mod provider_logging {
    use log::{Level, Log, Metadata, Record};
    use mashup::core::{SearchProvider, YtDlpSearch};
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::sync::{Mutex, OnceLock};
    use tempfile::TempDir;

    struct Captured(Mutex<Vec<(Level, String)>>);

    impl Log for Captured {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            if let Ok(mut records) = self.0.lock() {
                records.push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    fn captured() -> &'static Captured {
        static LOGGER: OnceLock<Captured> = OnceLock::new();
        let logger = LOGGER.get_or_init(|| Captured(Mutex::new(Vec::new())));
        if log::set_logger(logger).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
        logger
    }

    #[test]
    fn test_search_progress_is_debug_only() {
        let logger = captured();
        let temp = TempDir::new().unwrap();
        let script = temp.path().join("yt-dlp");
        fs::write(
            &script,
            "#!/bin/sh\necho '{\"entries\": [{\"id\": \"zz9\", \"title\": \"Only\", \"view_count\": 3}]}'\n",
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let found = YtDlpSearch::new(&script).search("stub query", 1).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url_suffix, "watch?v=zz9");

        let records = logger.0.lock().unwrap().clone();
        let ours: Vec<&(Level, String)> = records
            .iter()
            .filter(|(_, msg)| msg.contains("stub query") || msg.contains("found 1 results"))
            .collect();

        assert!(!ours.is_empty());
        assert!(ours.iter().all(|(level, _)| *level == Level::Debug));
    }
}
