// src/analyzer/checker.rs
use super::result::CheckResult;
use super::simulated::SimulatedChecker;
use crate::config::{CheckerKind, Settings};
use crate::store::LogDescriptor;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

/// Inspects one descriptor and reports its outcome.
///
/// Implementations are shared by every concurrent check of a dispatch and
/// must not keep mutable state between calls. A check never errors: a
/// problem with the log is reported as a `Failed` result.
#[async_trait]
pub trait Checker: Send + Sync {
    async fn check(&self, descriptor: &LogDescriptor) -> CheckResult;

    fn name(&self) -> &'static str;
}

/// Checks that the log exists, is a regular file and can be read.
/// Contents are not parsed.
#[derive(Debug, Default)]
pub struct FileChecker;

impl FileChecker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Checker for FileChecker {
    async fn check(&self, descriptor: &LogDescriptor) -> CheckResult {
        let id = &descriptor.id;
        let path = &descriptor.path;

        let metadata = match tokio::fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return CheckResult::failed(id, format!("log {}: file {} not found", id, path));
            }
            Err(e) => {
                return CheckResult::failed(id, format!("log {}: cannot access {}: {}", id, path, e));
            }
        };

        if !metadata.is_file() {
            return CheckResult::failed(id, format!("log {}: {} is not a regular file", id, path));
        }

        let mut file = match tokio::fs::File::open(path).await {
            Ok(file) => file,
            Err(e) => {
                return CheckResult::failed(id, format!("log {}: cannot open {}: {}", id, path, e));
            }
        };

        let mut buf = [0u8; 512];
        if let Err(e) = file.read(&mut buf).await {
            return CheckResult::failed(id, format!("log {}: cannot read {}: {}", id, path, e));
        }

        CheckResult::ok(id)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

pub fn create_checker(settings: &Settings) -> Arc<dyn Checker> {
    match settings.checker {
        CheckerKind::File => Arc::new(FileChecker::new()),
        CheckerKind::Simulated => {
            tracing::warn!("Using simulated checker: outcomes are random");
            Arc::new(SimulatedChecker::from_settings(settings))
        }
    }
}
