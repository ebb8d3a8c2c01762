// src/analyzer/dispatcher.rs
use super::checker::Checker;
use super::result::{CheckResult, Status};
use crate::metrics::{MetricsCollector, Timer};
use crate::store::LogDescriptor;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Runs one concurrent check per descriptor and collects the outcomes.
///
/// Every descriptor gets its own task, there is no concurrency cap.
/// Results come back over an mpsc channel in completion order, so callers
/// must not rely on the order of the returned results.
pub struct Dispatcher {
    checker: Arc<dyn Checker>,
    check_timeout: Option<Duration>,
    metrics: Option<Arc<MetricsCollector>>,
}

impl Dispatcher {
    pub fn new(checker: Arc<dyn Checker>) -> Self {
        Self {
            checker,
            check_timeout: None,
            metrics: None,
        }
    }

    pub fn with_timeout(mut self, check_timeout: Option<Duration>) -> Self {
        self.check_timeout = check_timeout;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Check every descriptor concurrently and return the results whose
    /// status matches `filter` (all of them when `filter` is `None`).
    pub async fn dispatch(
        &self,
        descriptors: &[LogDescriptor],
        filter: Option<Status>,
    ) -> Vec<CheckResult> {
        if descriptors.is_empty() {
            debug!("No descriptors to dispatch");
            return Vec::new();
        }

        if let Some(metrics) = &self.metrics {
            metrics.record_dispatch(filter);
        }

        let span = info_span!(
            "dispatch",
            run_id = %Uuid::new_v4(),
            checker = self.checker.name(),
            count = descriptors.len()
        );

        self.run(descriptors, filter).instrument(span).await
    }

    async fn run(&self, descriptors: &[LogDescriptor], filter: Option<Status>) -> Vec<CheckResult> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ids = Vec::with_capacity(descriptors.len());
        let mut tasks = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            let descriptor = descriptor.clone();
            let checker = self.checker.clone();
            let metrics = self.metrics.clone();
            let check_timeout = self.check_timeout;
            let tx = tx.clone();

            ids.push(descriptor.id.clone());
            let task = tokio::spawn(
                async move {
                    let result =
                        run_check(checker.as_ref(), &descriptor, check_timeout, metrics.as_deref())
                            .await;
                    if result.matches(filter) {
                        // The receiver is only dropped after every task has joined
                        let _ = tx.send(result);
                    }
                }
                .in_current_span(),
            );
            tasks.push(task);
        }

        // Only the tasks hold senders now, so the channel closes once they finish
        drop(tx);

        // Join barrier: wait for every check to finish
        let outcomes = futures::future::join_all(tasks).await;

        let mut results = Vec::with_capacity(descriptors.len());
        for (id, outcome) in ids.into_iter().zip(outcomes) {
            if let Err(e) = outcome {
                error!("Check task for log {} did not complete: {}", id, e);
                if let Some(metrics) = &self.metrics {
                    metrics.check_aborted();
                }
                let result = CheckResult::failed(&id, format!("check of log {} aborted: {}", id, e));
                if result.matches(filter) {
                    results.push(result);
                }
            }
        }

        while let Some(result) = rx.recv().await {
            results.push(result);
        }

        info!(
            "Dispatch complete: {} of {} results kept",
            results.len(),
            descriptors.len()
        );

        results
    }
}

async fn run_check(
    checker: &dyn Checker,
    descriptor: &LogDescriptor,
    check_timeout: Option<Duration>,
    metrics: Option<&MetricsCollector>,
) -> CheckResult {
    if let Some(metrics) = metrics {
        metrics.check_started();
    }
    let timer = Timer::new();

    let result = match check_timeout {
        Some(limit) => match timeout(limit, checker.check(descriptor)).await {
            Ok(result) => result,
            Err(_) => CheckResult::failed(
                &descriptor.id,
                format!("check of log {} timed out after {:?}", descriptor.id, limit),
            ),
        },
        None => checker.check(descriptor).await,
    };
    let result = conform(result, descriptor);

    if let Some(metrics) = metrics {
        metrics.check_finished(result.status, timer.elapsed());
    }

    match result.status {
        Status::Ok => debug!("Log {} is OK", descriptor.id),
        Status::Failed => warn!("Log {} failed: {:?}", descriptor.id, result.detail),
    }

    result
}

/// Ties the result to its descriptor and keeps `detail` present exactly
/// on failures, whatever the checker returned.
fn conform(mut result: CheckResult, descriptor: &LogDescriptor) -> CheckResult {
    if result.id != descriptor.id {
        warn!(
            "Checker returned id {} for log {}, correcting",
            result.id, descriptor.id
        );
        result.id = descriptor.id.clone();
    }

    match result.status {
        Status::Ok => CheckResult::ok(result.id),
        Status::Failed => {
            let detail = result.detail.unwrap_or_default();
            CheckResult::failed(result.id, detail)
        }
    }
}
