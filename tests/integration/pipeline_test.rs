// End-to-end pipeline tests with generated WAV sources

use super::fixtures::{scenario_session, wav_frames, write_wav, FixtureFetcher, FIXTURE_RATE};
use mashup::core::{
    Acquirer, Assembler, ExportOutcome, Exporter, MashupJob, MashupPipeline, MediaCache,
    OverwritePolicy, SelectionSet, SymphoniaDecoder, WavEncoder,
};
use mashup::{ItemError, MashupError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn never_asked(_: &Path) -> bool {
    panic!("overwrite confirmation should not be requested")
}

fn pipeline<'a>(cache_dir: &Path, fetcher: &'a FixtureFetcher) -> MashupPipeline<&'a FixtureFetcher, SymphoniaDecoder> {
    MashupPipeline::new(
        Acquirer::new(MediaCache::new(cache_dir), fetcher),
        Assembler::new(SymphoniaDecoder),
        Exporter::new(WavEncoder),
    )
}

#[test]
fn test_two_items_make_sixty_seconds() {
    let temp = TempDir::new().unwrap();
    let fetcher = FixtureFetcher::default()
        .with_length("top", 45)
        .with_length("mid", 10)
        .with_length("low", 40);
    let session = scenario_session();

    let output = temp.path().join("mix");
    let job = MashupJob::new(
        SelectionSet::from_indices(vec![0, 2]),
        30,
        output.to_string_lossy(),
    );

    let report = pipeline(&temp.path().join("cache"), &fetcher)
        .run(&session, job, &never_asked, |_, _| {})
        .unwrap();

    let written = temp.path().join("mix.wav");
    assert_eq!(report.export, ExportOutcome::Written(written.clone()));
    assert_eq!(wav_frames(&written), 60 * FIXTURE_RATE);
    assert_eq!(report.assembly.included.len(), 2);
    assert!(report.assembly.failures.is_empty());
    assert_eq!(fetcher.calls().len(), 2);
}

#[test]
fn test_short_source_is_skipped() {
    let temp = TempDir::new().unwrap();
    let fetcher = FixtureFetcher::default()
        .with_length("top", 45)
        .with_length("mid", 10);
    let session = scenario_session();

    let output = temp.path().join("mix");
    let job = MashupJob::new(
        SelectionSet::from_indices(vec![0, 1]),
        30,
        output.to_string_lossy(),
    );

    let report = pipeline(&temp.path().join("cache"), &fetcher)
        .run(&session, job, &never_asked, |_, _| {})
        .unwrap();

    assert_eq!(wav_frames(&temp.path().join("mix.wav")), 30 * FIXTURE_RATE);
    assert_eq!(report.assembly.included.len(), 1);
    assert_eq!(report.assembly.included[0].index, 0);

    let (skipped, reason) = &report.assembly.failures[0];
    assert_eq!(skipped.index, 1);
    assert!(matches!(reason, ItemError::ClipTooShort { target_secs: 30, .. }));
}

#[test]
fn test_failed_download_does_not_stop_the_job() {
    let temp = TempDir::new().unwrap();
    // "mid" has no length configured, so its download fails
    let fetcher = FixtureFetcher::default().with_length("top", 20).with_length("low", 20);
    let session = scenario_session();

    let output = temp.path().join("mix");
    let job = MashupJob::new(SelectionSet::all(), 5, output.to_string_lossy());

    let report = pipeline(&temp.path().join("cache"), &fetcher)
        .run(&session, job, &never_asked, |_, _| {})
        .unwrap();

    assert_eq!(report.acquisition.failures().len(), 1);
    assert_eq!(report.acquisition.failures()[0].0.index, 1);
    assert_eq!(
        report
            .assembly
            .included
            .iter()
            .map(|item| item.index)
            .collect::<Vec<_>>(),
        vec![0, 2]
    );
    assert_eq!(wav_frames(&temp.path().join("mix.wav")), 10 * FIXTURE_RATE);
}

#[test]
fn test_downloads_removed_unless_kept() {
    let temp = TempDir::new().unwrap();
    let cache_dir = temp.path().join("cache");
    let fetcher = FixtureFetcher::default().with_length("top", 5);
    let session = scenario_session();
    let run = |name: &str, keep: bool| {
        let job = MashupJob::new(
            SelectionSet::from_indices(vec![0]),
            2,
            temp.path().join(name).to_string_lossy(),
        )
        .retain(keep);
        pipeline(&cache_dir, &fetcher)
            .run(&session, job, &never_asked, |_, _| {})
            .unwrap()
    };

    let kept = run("kept", true);
    assert!(kept.cleanup.retained);
    assert_eq!(MediaCache::new(&cache_dir).entries().len(), 1);

    let removed = run("removed", false);
    assert_eq!(removed.cleanup.deleted_files, 1);
    assert!(MediaCache::new(&cache_dir).entries().is_empty());

    // the second run reused the kept download
    assert_eq!(fetcher.calls().len(), 1);
}

#[test]
fn test_declined_overwrite_keeps_existing_file() {
    let temp = TempDir::new().unwrap();
    let fetcher = FixtureFetcher::default().with_length("top", 5);
    let session = scenario_session();

    let existing = temp.path().join("mix.wav");
    write_wav(&existing, 1);
    let original = fs::read(&existing).unwrap();

    let asked = std::cell::Cell::new(false);
    let decline = |_: &Path| {
        asked.set(true);
        false
    };

    let job = MashupJob::new(
        SelectionSet::from_indices(vec![0]),
        2,
        temp.path().join("mix").to_string_lossy(),
    );
    let report = pipeline(&temp.path().join("cache"), &fetcher)
        .run(&session, job, &decline, |_, _| {})
        .unwrap();

    assert!(asked.get());
    assert_eq!(report.export, ExportOutcome::Skipped(existing.clone()));
    assert_eq!(fs::read(&existing).unwrap(), original);
    // cleanup still ran
    assert_eq!(report.cleanup.deleted_files, 1);
}

#[test]
fn test_overwrite_policy_replaces_without_asking() {
    let temp = TempDir::new().unwrap();
    let fetcher = FixtureFetcher::default().with_length("top", 5);
    let session = scenario_session();

    let existing = temp.path().join("mix.wav");
    write_wav(&existing, 1);

    let job = MashupJob::new(
        SelectionSet::from_indices(vec![0]),
        3,
        temp.path().join("mix").to_string_lossy(),
    )
    .overwrite(OverwritePolicy::Overwrite);
    let report = pipeline(&temp.path().join("cache"), &fetcher)
        .run(&session, job, &never_asked, |_, _| {})
        .unwrap();

    assert!(report.export.is_written());
    assert_eq!(wav_frames(&existing), 3 * FIXTURE_RATE);
}

#[test]
fn test_nothing_usable_is_empty_audio() {
    let temp = TempDir::new().unwrap();
    let fetcher = FixtureFetcher::default().with_length("top", 5);
    let session = scenario_session();

    let job = MashupJob::new(
        SelectionSet::from_indices(vec![0]),
        30,
        temp.path().join("mix").to_string_lossy(),
    );
    let err = pipeline(&temp.path().join("cache"), &fetcher)
        .run(&session, job, &never_asked, |_, _| {})
        .unwrap_err();

    assert!(matches!(err, MashupError::EmptyAudio));
    assert!(!temp.path().join("mix.wav").exists());
    // the download was still cleaned up
    assert!(MediaCache::new(temp.path().join("cache")).entries().is_empty());
}

#[test]
fn test_zero_duration_rejected_before_download() {
    let temp = TempDir::new().unwrap();
    let fetcher = FixtureFetcher::default().with_length("top", 5);
    let session = scenario_session();

    let job = MashupJob::new(SelectionSet::all(), 0, temp.path().join("mix").to_string_lossy());
    let err = pipeline(&temp.path().join("cache"), &fetcher)
        .run(&session, job, &never_asked, |_, _| {})
        .unwrap_err();

    assert!(matches!(err, MashupError::InvalidDuration(_)));
    assert!(fetcher.calls().is_empty());
}

#[test]
fn test_progress_reports_every_item() {
    let temp = TempDir::new().unwrap();
    let fetcher = FixtureFetcher::default()
        .with_length("top", 5)
        .with_length("mid", 5)
        .with_length("low", 5);
    let session = scenario_session();

    let seen = std::cell::RefCell::new(Vec::new());
    let job = MashupJob::new(SelectionSet::all(), 1, temp.path().join("mix").to_string_lossy());
    pipeline(&temp.path().join("cache"), &fetcher)
        .run(&session, job, &never_asked, |processed, total| {
            seen.borrow_mut().push((processed, total))
        })
        .unwrap();

    assert_eq!(seen.into_inner(), vec![(1, 3), (2, 3), (3, 3)]);
}
