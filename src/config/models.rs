// src/config/models.rs
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckerKind {
    File,
    Simulated,
}

impl Default for CheckerKind {
    fn default() -> Self {
        CheckerKind::File
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub checker: CheckerKind,

    #[serde(default = "default_min_latency")]
    pub min_latency_ms: u64,

    #[serde(default = "default_max_latency")]
    pub max_latency_ms: u64,

    #[serde(default = "default_pass_rate")]
    pub pass_rate: f64,

    /// No per-check timeout unless set.
    #[serde(default)]
    pub check_timeout_ms: Option<u64>,
}

fn default_min_latency() -> u64 {
    50
}

fn default_max_latency() -> u64 {
    200
}

fn default_pass_rate() -> f64 {
    0.8
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            checker: CheckerKind::default(),
            min_latency_ms: default_min_latency(),
            max_latency_ms: default_max_latency(),
            pass_rate: default_pass_rate(),
            check_timeout_ms: None,
        }
    }
}

impl Settings {
    pub fn latency_range(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.min_latency_ms),
            Duration::from_millis(self.max_latency_ms),
        )
    }

    pub fn check_timeout(&self) -> Option<Duration> {
        self.check_timeout_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.pass_rate) {
            anyhow::bail!("pass_rate must be between 0 and 1, got {}", self.pass_rate);
        }

        if self.min_latency_ms > self.max_latency_ms {
            anyhow::bail!(
                "min_latency_ms ({}) must not exceed max_latency_ms ({})",
                self.min_latency_ms,
                self.max_latency_ms
            );
        }

        if self.check_timeout_ms == Some(0) {
            anyhow::bail!("check_timeout_ms must be greater than zero when set");
        }

        Ok(())
    }
}
