// src/analyzer/result.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "FAILED")]
    Failed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Failed => "FAILED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid status '{0}': expected one of OK, FAILED")]
pub struct InvalidStatus(pub String);

impl FromStr for Status {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ok" => Ok(Status::Ok),
            "failed" => Ok(Status::Failed),
            _ => Err(InvalidStatus(s.to_string())),
        }
    }
}

/// Outcome of checking one descriptor.
///
/// `detail` is only ever set on failed results; the constructors are the
/// only way to build one so the pairing cannot drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub id: String,
    pub status: Status,
    #[serde(rename = "error", default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CheckResult {
    pub fn ok(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: Status::Ok,
            detail: None,
        }
    }

    pub fn failed(id: impl Into<String>, detail: impl Into<String>) -> Self {
        let id = id.into();
        let mut detail = detail.into();
        if detail.trim().is_empty() {
            detail = format!("check of log {} failed", id);
        }

        Self {
            id,
            status: Status::Failed,
            detail: Some(detail),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    pub fn matches(&self, filter: Option<Status>) -> bool {
        filter.map_or(true, |status| self.status == status)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl Summary {
    /// Folds over the collected results. Always recomputed, never tracked
    /// while dispatching.
    pub fn from_results(results: &[CheckResult]) -> Self {
        results.iter().fold(Summary::default(), |mut summary, result| {
            summary.total += 1;
            match result.status {
                Status::Ok => summary.succeeded += 1,
                Status::Failed => summary.failed += 1,
            }
            summary
        })
    }
}
