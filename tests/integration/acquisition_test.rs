// Acquisition against the download cache

use super::fixtures::{scenario_session, FixtureFetcher};
use mashup::core::{AcquireStatus, Acquirer, MediaCache, SelectionSet};
use mashup::MashupError;
use tempfile::TempDir;

#[test]
fn test_second_acquire_fetches_nothing() {
    let temp = TempDir::new().unwrap();
    let fetcher = FixtureFetcher::default()
        .with_length("top", 2)
        .with_length("mid", 2)
        .with_length("low", 2);
    let acquirer = Acquirer::new(MediaCache::new(temp.path()), &fetcher);
    let session = scenario_session();

    let first = acquirer.acquire(&session, &SelectionSet::all()).unwrap();
    assert_eq!(first.count(|s| matches!(s, AcquireStatus::Fetched)), 3);
    assert_eq!(fetcher.calls().len(), 3);

    let second = acquirer.acquire(&session, &SelectionSet::all()).unwrap();
    assert_eq!(second.count(|s| matches!(s, AcquireStatus::AlreadyPresent)), 3);
    assert_eq!(fetcher.calls().len(), 3);

    let paths = |report: &mashup::core::AcquisitionReport| {
        report.items.iter().map(|i| i.local_path.clone()).collect::<Vec<_>>()
    };
    assert_eq!(paths(&first), paths(&second));
}

#[test]
fn test_selection_order_is_kept() {
    let temp = TempDir::new().unwrap();
    let fetcher = FixtureFetcher::default()
        .with_length("top", 1)
        .with_length("low", 1);
    let acquirer = Acquirer::new(MediaCache::new(temp.path()), &fetcher);

    let report = acquirer
        .acquire(&scenario_session(), &SelectionSet::from_indices(vec![2, 0]))
        .unwrap();

    let order: Vec<usize> = report.items.iter().map(|i| i.index).collect();
    assert_eq!(order, vec![2, 0]);
    assert_eq!(
        fetcher.calls(),
        vec![
            "https://www.youtube.com/watch?v=low".to_string(),
            "https://www.youtube.com/watch?v=top".to_string(),
        ]
    );
}

#[test]
fn test_out_of_range_selection_fetches_nothing() {
    let temp = TempDir::new().unwrap();
    let fetcher = FixtureFetcher::default().with_length("top", 1);
    let acquirer = Acquirer::new(MediaCache::new(temp.path()), &fetcher);

    let err = acquirer
        .acquire(&scenario_session(), &SelectionSet::from_indices(vec![0, 7]))
        .unwrap_err();

    match err {
        MashupError::InvalidSelection { indices, available } => {
            assert_eq!(indices, vec![7]);
            assert_eq!(available, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(fetcher.calls().is_empty());
}

#[test]
fn test_failed_fetch_is_recorded() {
    let temp = TempDir::new().unwrap();
    let fetcher = FixtureFetcher::default().with_length("top", 1);
    let acquirer = Acquirer::new(MediaCache::new(temp.path()), &fetcher);

    let report = acquirer
        .acquire(&scenario_session(), &SelectionSet::from_indices(vec![0, 1]))
        .unwrap();

    assert_eq!(report.materialized().len(), 1);
    let failures = report.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0.index, 1);
    assert!(failures[0].1.to_string().contains("unavailable"));
}
