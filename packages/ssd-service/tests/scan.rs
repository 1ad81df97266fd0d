mod support;

use std::{
	collections::{HashMap, HashSet},
	future,
	sync::Arc,
};

use ssd_service::{Error, Matcher, ScanReport, Scanner};
use ssd_storage::MemoryStore;

use support::{FakePosting, ScriptedSource, own_comment, submission, thread_comment};

const SABRENT_TITLE: &str = "[SSD] Sabrent Rocket 2230 NVMe 4.0 1TB - $102.99";
const CORSAIR_TITLE: &str = "[SSD] Corsair MP600 Mini 1TB M.2 2230 - $69.99";

fn scan_config() -> ssd_config::Scan {
	ssd_config::Scan { comment_delay_ms: 0, ..ssd_config::Scan::default() }
}

fn catalog_matcher() -> Matcher {
	Matcher::new(Arc::new(MemoryStore::new(ssd_testkit::sample_products())))
}

fn busy_feed() -> FakePosting {
	FakePosting {
		submissions: vec![
			submission("s1", SABRENT_TITLE, "SSD - M.2"),
			submission("s2", "[GPU] RTX 4070 Super - $549", "GPU"),
			submission("s3", CORSAIR_TITLE, "SSD"),
			submission("s4", "[SSD] Samsung 990 PRO 2TB - $149", "ssd"),
			submission("s5", "[SSD] Seagate FireCuda 530 2TB - $139", "SSD"),
		],
		own_comments: vec![own_comment("s4")],
		threads: HashMap::from([("s3".to_string(), vec![thread_comment("SSDBot")])]),
		..FakePosting::default()
	}
}

#[tokio::test]
async fn cycle_annotates_only_new_matching_submissions() {
	let posting = Arc::new(busy_feed());
	let scanner = Scanner::new(posting.clone(), catalog_matcher(), scan_config());
	let report = scanner.run_cycle().await.expect("Cycle should finish.");

	assert_eq!(
		report,
		ScanReport {
			seen: 5,
			off_topic: 1,
			answered_elsewhere: 1,
			already_annotated: 1,
			unmatched: 1,
			search_failures: 0,
			posted: 1,
		}
	);
	assert_eq!(posting.posted_ids(), vec!["s1"]);

	let posted = posting.posted.lock().expect("lock poisoned");

	assert!(posted[0].1.starts_with("The Sabrent Rocket 2230 1 TB is a *TLC* SSD."));
}

#[tokio::test]
async fn override_ignores_other_bot() {
	let posting = Arc::new(busy_feed());
	let cfg = ssd_config::Scan { override_existing: true, ..scan_config() };
	let scanner = Scanner::new(posting.clone(), catalog_matcher(), cfg);
	let report = scanner.run_cycle().await.expect("Cycle should finish.");

	assert_eq!(report.answered_elsewhere, 0);
	assert_eq!(posting.posted_ids(), vec!["s1", "s3"]);
}

#[tokio::test]
async fn unreadable_thread_counts_as_unanswered() {
	let posting = Arc::new(FakePosting {
		submissions: vec![submission("s3", CORSAIR_TITLE, "SSD")],
		broken_threads: HashSet::from(["s3".to_string()]),
		..FakePosting::default()
	});
	let scanner = Scanner::new(posting.clone(), catalog_matcher(), scan_config());

	scanner.run_cycle().await.expect("Cycle should finish.");

	assert_eq!(posting.posted_ids(), vec!["s3"]);
}

#[tokio::test]
async fn search_failures_skip_to_next_submission() {
	let posting = Arc::new(FakePosting {
		submissions: vec![
			submission("s1", SABRENT_TITLE, "SSD"),
			submission("s3", CORSAIR_TITLE, "SSD"),
		],
		..FakePosting::default()
	});
	let matcher = Matcher::new(Arc::new(ScriptedSource::default()));
	let scanner = Scanner::new(posting.clone(), matcher, scan_config());
	let report = scanner.run_cycle().await.expect("Cycle should finish.");

	assert_eq!(report.search_failures, 2);
	assert_eq!(report.posted, 0);
	assert!(posting.posted_ids().is_empty());
}

#[tokio::test]
async fn failed_post_ends_the_cycle() {
	let posting = Arc::new(FakePosting {
		submissions: vec![
			submission("s1", SABRENT_TITLE, "SSD"),
			submission("s3", CORSAIR_TITLE, "SSD"),
		],
		rejected_posts: HashSet::from(["s1".to_string()]),
		..FakePosting::default()
	});
	let scanner = Scanner::new(posting.clone(), catalog_matcher(), scan_config());
	let err = scanner.run_cycle().await.expect_err("Cycle should fail.");

	assert!(matches!(err, Error::Provider(_)), "unexpected error: {err:?}");
	assert!(posting.posted_ids().is_empty());
}

#[tokio::test]
async fn run_stops_when_shutdown_is_ready() {
	let posting = Arc::new(FakePosting::default());
	let scanner = Scanner::new(posting.clone(), catalog_matcher(), scan_config());

	scanner.run(future::ready(())).await;

	assert!(posting.posted_ids().is_empty());
}
