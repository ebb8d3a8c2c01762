// tests/analyzer_tests.rs
use async_trait::async_trait;
use log_analyzer::analyzer::{CheckResult, Checker, Dispatcher, SimulatedChecker, Status, Summary};
use log_analyzer::store::{self, LogDescriptor};
use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Outcome depends only on the id, so results are reproducible while the
/// completion order is not.
struct ParityChecker;

#[async_trait]
impl Checker for ParityChecker {
    async fn check(&self, descriptor: &LogDescriptor) -> CheckResult {
        tokio::time::sleep(Duration::from_millis((descriptor.id.len() % 3) as u64)).await;
        if descriptor.id.len() % 2 == 0 {
            CheckResult::ok(&descriptor.id)
        } else {
            CheckResult::failed(&descriptor.id, format!("log {} has odd length", descriptor.id))
        }
    }

    fn name(&self) -> &'static str {
        "parity"
    }
}

fn expected_status(id: &str) -> Status {
    if id.len() % 2 == 0 {
        Status::Ok
    } else {
        Status::Failed
    }
}

fn to_descriptors(ids: &[String]) -> Vec<LogDescriptor> {
    ids.iter()
        .map(|id| LogDescriptor::new(id.clone(), format!("/var/log/{}.log", id), "test"))
        .collect()
}

fn sorted_ids(results: &[CheckResult]) -> Vec<String> {
    let mut ids: Vec<String> = results.iter().map(|r| r.id.clone()).collect();
    ids.sort();
    ids
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn dispatch_returns_one_result_per_descriptor(ids in proptest::collection::vec("[a-z]{1,6}", 1..40)) {
        let descriptors = to_descriptors(&ids);
        let dispatcher = Dispatcher::new(Arc::new(ParityChecker));

        let results = runtime().block_on(dispatcher.dispatch(&descriptors, None));

        let mut expected = ids.clone();
        expected.sort();
        prop_assert_eq!(sorted_ids(&results), expected);

        for result in &results {
            prop_assert_eq!(result.status, expected_status(&result.id));
            prop_assert_eq!(result.detail.is_some(), result.status == Status::Failed);
        }

        let summary = Summary::from_results(&results);
        prop_assert_eq!(summary.total, summary.succeeded + summary.failed);
    }

    #[test]
    fn filtered_dispatch_keeps_only_matching_results(
        ids in proptest::collection::vec("[a-z]{1,6}", 0..40),
        want_ok in any::<bool>(),
    ) {
        let filter = if want_ok { Status::Ok } else { Status::Failed };
        let descriptors = to_descriptors(&ids);
        let dispatcher = Dispatcher::new(Arc::new(ParityChecker));

        let results = runtime().block_on(dispatcher.dispatch(&descriptors, Some(filter)));

        prop_assert!(results.iter().all(|r| r.status == filter));

        let mut expected: Vec<String> = ids
            .iter()
            .filter(|id| expected_status(id) == filter)
            .cloned()
            .collect();
        expected.sort();
        prop_assert_eq!(sorted_ids(&results), expected);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_checks_run_concurrently() {
    // 50 checks of 100ms each would take 5s if run one after another
    let checker = SimulatedChecker::new(Duration::from_millis(100), Duration::from_millis(100), 1.0);
    let ids: Vec<String> = (0..50).map(|i| format!("log-{}", i)).collect();
    let descriptors = to_descriptors(&ids);

    let start = std::time::Instant::now();
    let results = Dispatcher::new(Arc::new(checker))
        .dispatch(&descriptors, None)
        .await;

    assert_eq!(results.len(), 50);
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_duplicate_ids_are_not_merged() {
    let ids = vec!["web".to_string(), "web".to_string(), "db".to_string()];

    let results = Dispatcher::new(Arc::new(ParityChecker))
        .dispatch(&to_descriptors(&ids), None)
        .await;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for result in &results {
        *counts.entry(result.id.clone()).or_default() += 1;
    }
    assert_eq!(counts["web"], 2);
    assert_eq!(counts["db"], 1);
}

#[tokio::test]
async fn test_stored_descriptors_feed_dispatch() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("logs.json");
    let ids = vec!["ab".to_string(), "abc".to_string(), "abcd".to_string()];

    store::save(&to_descriptors(&ids), &path).await.unwrap();
    let loaded = store::load(&path).await.unwrap();
    assert_eq!(loaded, to_descriptors(&ids));

    let results = Dispatcher::new(Arc::new(ParityChecker))
        .dispatch(&loaded, Some(Status::Failed))
        .await;

    assert_eq!(sorted_ids(&results), vec!["abc".to_string()]);
}
