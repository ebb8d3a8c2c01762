// src/report/printer.rs
use crate::analyzer::{CheckResult, Status, Summary};
use std::fmt::Write;

/// Human-readable listing of the results followed by the summary.
pub fn render_results(results: &[CheckResult]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Analysis results:");
    let _ = writeln!(out, "------------------------");

    for result in results {
        match result.status {
            Status::Ok => {
                let _ = writeln!(out, "✓ {}: {}", result.id, result.status);
            }
            Status::Failed => {
                let _ = writeln!(
                    out,
                    "✗ {}: {} - {}",
                    result.id,
                    result.status,
                    result.detail.as_deref().unwrap_or_default()
                );
            }
        }
    }

    let summary = Summary::from_results(results);
    let _ = writeln!(out);
    let _ = writeln!(out, "Summary:");
    let _ = writeln!(out, "- Total: {}", summary.total);
    let _ = writeln!(out, "- Succeeded: {}", summary.succeeded);
    let _ = writeln!(out, "- Failed: {}", summary.failed);

    out
}
