// src/report/exporter.rs
use crate::analyzer::CheckResult;
use crate::store::{DocumentFormat, FormatError};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("cannot create directories for {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot encode results for {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        source: FormatError,
    },

    #[error("cannot write results to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Write `results` as an indented document. With `timestamped`, today's date
/// is prefixed to the file name. Returns the path actually written.
pub async fn export<P: AsRef<Path>>(
    results: &[CheckResult],
    path: P,
    timestamped: bool,
) -> Result<PathBuf, ExportError> {
    let path = if timestamped {
        timestamped_path(path.as_ref(), chrono::Local::now().date_naive())
    } else {
        path.as_ref().to_path_buf()
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| ExportError::CreateDir {
                path: path.clone(),
                source,
            })?;
    }

    let text = DocumentFormat::from_path(&path)
        .render(results)
        .map_err(|source| ExportError::Serialize {
            path: path.clone(),
            source,
        })?;

    tokio::fs::write(&path, text)
        .await
        .map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

    info!("Exported {} results to {}", results.len(), path.display());
    Ok(path)
}

/// `out/results.json` on 2024-03-07 becomes `out/240307_results.json`.
pub fn timestamped_path(path: &Path, date: NaiveDate) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let file_name = format!("{}_{}{}", date.format("%y%m%d"), stem, ext);
    match path.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}
