// src/analyzer/simulated.rs
use super::checker::Checker;
use super::result::CheckResult;
use crate::config::Settings;
use crate::store::LogDescriptor;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

/// Stand-in checker: waits a random delay, then passes with probability
/// `pass_rate`. Meant for demos and exercising the dispatcher.
#[derive(Debug, Clone)]
pub struct SimulatedChecker {
    min_latency: Duration,
    max_latency: Duration,
    pass_rate: f64,
}

impl SimulatedChecker {
    pub fn new(min_latency: Duration, max_latency: Duration, pass_rate: f64) -> Self {
        Self {
            min_latency: min_latency.min(max_latency),
            max_latency,
            pass_rate: if pass_rate.is_nan() { 0.0 } else { pass_rate.clamp(0.0, 1.0) },
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let (min, max) = settings.latency_range();
        Self::new(min, max, settings.pass_rate)
    }
}

#[async_trait]
impl Checker for SimulatedChecker {
    async fn check(&self, descriptor: &LogDescriptor) -> CheckResult {
        // ThreadRng is not Send, so it must be gone before the await
        let (delay, passed) = {
            let mut rng = rand::thread_rng();
            (
                rng.gen_range(self.min_latency..=self.max_latency),
                rng.gen_bool(self.pass_rate),
            )
        };

        sleep(delay).await;

        if passed {
            CheckResult::ok(&descriptor.id)
        } else {
            CheckResult::failed(
                &descriptor.id,
                format!("analysis of log {} failed", descriptor.id),
            )
        }
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}
