mod support;

use std::{
	collections::HashSet,
	time::{Duration, Instant},
};

use ssd_service::{CatalogSyncer, Error, SyncReport, SyncTask};
use ssd_storage::{CatalogStore, MemoryStore};

use support::{FlakyDestination, ScriptedSource};

fn task(start_id: u64, end_id: u64, skip: impl IntoIterator<Item = u64>) -> SyncTask {
	SyncTask::new(start_id, end_id, skip, Duration::ZERO).expect("Failed to build task.")
}

#[tokio::test]
async fn skipped_ids_are_never_fetched_and_gaps_continue() {
	let source = ScriptedSource::with_ids([1, 2, 4, 5]);
	let destination = MemoryStore::default();
	let report = CatalogSyncer::run(&task(1, 5, [5]), &source, &destination)
		.await
		.expect("Sync should finish.");

	assert_eq!(source.lookups(), vec!["1", "2", "3", "4"]);
	assert_eq!(report, SyncReport { synced: 3, skipped: 1, not_found: 1, write_failures: 0 });
	assert_eq!(
		destination.products().iter().map(|product| product.id.as_str()).collect::<Vec<_>>(),
		vec!["1", "2", "4"]
	);
}

#[tokio::test]
async fn source_error_aborts_before_later_ids() {
	let source = ScriptedSource::with_ids([1, 2, 3, 4, 5]).failing_on(2);
	let destination = MemoryStore::default();
	let err = CatalogSyncer::run(&task(1, 5, [5]), &source, &destination)
		.await
		.expect_err("Sync should abort.");

	assert!(matches!(err, Error::Source { id: 2, .. }), "unexpected error: {err:?}");
	assert_eq!(source.lookups(), vec!["1", "2"]);
	assert_eq!(destination.len(), 1);
	assert!(destination.get("1").is_some());
}

#[tokio::test]
async fn destination_failures_do_not_stop_the_run() {
	let source = ScriptedSource::with_ids([1, 2, 3]);
	let destination = FlakyDestination {
		inner: MemoryStore::default(),
		rejected: HashSet::from(["2".to_string()]),
	};
	let report = CatalogSyncer::run(&task(1, 3, []), &source, &destination)
		.await
		.expect("Sync should finish.");

	assert_eq!(report.synced, 2);
	assert_eq!(report.write_failures, 1);
	assert_eq!(source.lookups(), vec!["1", "2", "3"]);
	assert_eq!(destination.find_by_id("2").await.expect("Lookup failed."), None);
	assert!(destination.find_by_id("3").await.expect("Lookup failed.").is_some());
}

#[tokio::test]
async fn replaying_a_range_is_idempotent() {
	let source = ScriptedSource::with_ids([1, 2, 3]);
	let destination = MemoryStore::default();
	let task = task(1, 3, []);

	let first = CatalogSyncer::run(&task, &source, &destination).await.expect("First run failed.");
	let snapshot = destination.products();
	let second = CatalogSyncer::run(&task, &source, &destination).await.expect("Second run failed.");

	assert_eq!(first, second);
	assert_eq!(destination.products(), snapshot);
	assert_eq!(destination.len(), 3);
}

#[tokio::test]
async fn pacing_delay_follows_each_write() {
	let source = ScriptedSource::with_ids([1, 2, 3]);
	let destination = MemoryStore::default();
	let task = SyncTask::new(1, 3, [], Duration::from_millis(25)).expect("Failed to build task.");
	let started = Instant::now();

	CatalogSyncer::run(&task, &source, &destination).await.expect("Sync should finish.");

	assert!(started.elapsed() >= Duration::from_millis(50));
}

#[test]
fn task_builds_from_config_defaults() {
	let task = SyncTask::from_config(&ssd_config::Sync::default()).expect("Failed to build task.");

	assert_eq!(task.ids(), 1..=1_550);
	assert!(task.skip.is_empty());
	assert_eq!(task.delay, Duration::from_millis(10));
}
