// src/store/file.rs
use super::descriptor::LogDescriptor;
use super::format::{DocumentFormat, FormatError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("descriptor file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: FormatError,
    },

    #[error("failed to serialize descriptors for {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        source: FormatError,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("a log with id '{id}' already exists in {}", .path.display())]
    DuplicateId { id: String, path: PathBuf },
}

/// Load the descriptor list stored at `path`.
pub async fn load<P: AsRef<Path>>(path: P) -> Result<Vec<LogDescriptor>, StoreError> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path).await.map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            StoreError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            StoreError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let descriptors: Vec<LogDescriptor> = DocumentFormat::from_path(path)
        .parse(&contents)
        .map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    debug!("Loaded {} descriptors from {}", descriptors.len(), path.display());
    Ok(descriptors)
}

/// Write the descriptor list to `path`, creating parent directories.
pub async fn save<P: AsRef<Path>>(descriptors: &[LogDescriptor], path: P) -> Result<(), StoreError> {
    let path = path.as_ref();
    let text = DocumentFormat::from_path(path)
        .render(descriptors)
        .map_err(|source| StoreError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| StoreError::Write {
                path: path.to_path_buf(),
                source,
            })?;
    }

    tokio::fs::write(path, text)
        .await
        .map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    debug!("Saved {} descriptors to {}", descriptors.len(), path.display());
    Ok(())
}

/// Append one descriptor to the list at `path`. A missing file starts a
/// new list; an existing id is rejected and the file is left untouched.
pub async fn append<P: AsRef<Path>>(descriptor: LogDescriptor, path: P) -> Result<(), StoreError> {
    let path = path.as_ref();
    let mut descriptors = match load(path).await {
        Ok(descriptors) => descriptors,
        Err(StoreError::NotFound { .. }) => {
            info!("Creating new descriptor file {}", path.display());
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    if descriptors.iter().any(|d| d.id == descriptor.id) {
        return Err(StoreError::DuplicateId {
            id: descriptor.id,
            path: path.to_path_buf(),
        });
    }

    descriptors.push(descriptor);
    save(&descriptors, path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Vec<LogDescriptor> {
        vec![
            LogDescriptor::new("web", "/var/log/nginx.log", "nginx"),
            LogDescriptor::new("app", "/var/log/app.log", "application"),
            LogDescriptor::new("db", "/var/log/pg.log", "postgres"),
        ]
    }

    #[tokio::test]
    async fn test_save_then_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.json");

        save(&sample(), &path).await.unwrap();
        let loaded = load(&path).await.unwrap();

        assert_eq!(loaded, sample());
    }

    #[tokio::test]
    async fn test_yaml_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");

        save(&sample(), &path).await.unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("type: nginx"));

        assert_eq!(load(&path).await.unwrap(), sample());
    }

    #[tokio::test]
    async fn test_stored_json_uses_type_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        save(&sample()[..1], &path).await.unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(
            value,
            serde_json::json!([{ "id": "web", "path": "/var/log/nginx.log", "type": "nginx" }])
        );
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load(dir.path().join("absent.json")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_load_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load(&path).await.unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_append_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        append(LogDescriptor::new("web", "/var/log/nginx.log", "nginx"), &path)
            .await
            .unwrap();

        assert_eq!(load(&path).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_append_rejects_duplicate_and_keeps_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        append(LogDescriptor::new("web", "/var/log/nginx.log", "nginx"), &path)
            .await
            .unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let err = append(LogDescriptor::new("web", "/other.log", "other"), &path)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateId { ref id, .. } if id == "web"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn test_append_does_not_overwrite_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "oops").unwrap();

        let err = append(LogDescriptor::new("web", "/a.log", "nginx"), &path)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Parse { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "oops");
    }
}
