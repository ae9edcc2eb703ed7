use inventory_backfill::config::BackfillConfig;
use inventory_backfill::job::{BackfillEvent, BackfillJob, BackfillReport, RecordingReporter};
use inventory_backfill::lifecycle::BackfillSystem;
use inventory_store::memory::{InMemoryConnector, InMemoryProductStore};

fn system_for(store: &InMemoryProductStore) -> BackfillSystem<InMemoryConnector> {
    BackfillSystem::new(InMemoryConnector::new(store.clone()))
}

/// Full run over the `[0, -5, 40]` collection: everything ends in range and
/// the verification count matches the collection size.
#[tokio::test]
async fn test_full_backfill_on_mixed_collection() {
    let store = InMemoryProductStore::with_stock([Some(0), Some(-5), Some(40)]);
    let reporter = RecordingReporter::new();
    let job = BackfillJob::new(BackfillConfig::default(), reporter.clone()).expect("valid config");

    let report = system_for(&store).run(job).await.expect("backfill succeeds");

    assert_eq!(
        report,
        BackfillReport {
            normalized: 2,
            updated: 3,
            missing: 0,
            in_stock: 3,
        }
    );
    for level in store.stock_levels() {
        let level = level.expect("stock assigned");
        assert!((50..=200).contains(&level), "stock {level} out of range");
    }
    assert_eq!(
        reporter.lines(),
        vec![
            "✅ Connected to MongoDB at memory://products".to_string(),
            "✅ Normalized 2 out-of-stock products to 100".to_string(),
            "✅ Updated 3 products with inventory".to_string(),
            "✅ 3 products now have stock!".to_string(),
        ]
    );
    assert!(reporter.failures().is_empty());
    assert_eq!(store.close_count(), 1);
}

/// An empty collection completes cleanly with zero counts.
#[tokio::test]
async fn test_empty_collection_reports_zero() {
    let store = InMemoryProductStore::new();
    let reporter = RecordingReporter::new();
    let job = BackfillJob::new(BackfillConfig::default(), reporter.clone()).expect("valid config");

    let report = system_for(&store).run(job).await.expect("backfill succeeds");

    assert_eq!(report, BackfillReport::default());
    assert!(reporter
        .lines()
        .contains(&"✅ Updated 0 products with inventory".to_string()));
    assert!(reporter.events().contains(&BackfillEvent::Verified {
        in_stock: 0,
        processed: 0,
    }));
    assert!(reporter.failures().is_empty());
    assert_eq!(store.close_count(), 1);
}

/// Running the whole job twice keeps the invariant but draws new values.
#[tokio::test]
async fn test_second_run_resamples_stock() {
    let store = InMemoryProductStore::with_stock((0..50).map(|_| None));
    let system = system_for(&store);

    let first = BackfillJob::new(BackfillConfig::default().with_seed(1), RecordingReporter::new())
        .expect("valid config");
    system.run(first).await.expect("first run");
    let after_first = store.stock_levels();

    let second = BackfillJob::new(BackfillConfig::default().with_seed(2), RecordingReporter::new())
        .expect("valid config");
    let report = system.run(second).await.expect("second run");
    let after_second = store.stock_levels();

    // Everything was already positive, so the second normalization is a no-op.
    assert_eq!(report.normalized, 0);
    assert_eq!(report.in_stock, 50);
    assert_ne!(after_first, after_second);
    assert!(after_second
        .iter()
        .all(|level| level.is_some_and(|s| (50..=200).contains(&s))));
    assert_eq!(store.close_count(), 2);
}

/// Positive stock survives normalization untouched; only randomization changes it.
#[tokio::test]
async fn test_normalization_preserves_positive_stock() {
    let store = InMemoryProductStore::with_stock([Some(7), Some(500), None]);
    let job = BackfillJob::new(BackfillConfig::default(), RecordingReporter::new())
        .expect("valid config");

    job.normalize(&store).await.expect("normalize");

    assert_eq!(store.stock_levels(), vec![Some(7), Some(500), Some(100)]);
}
