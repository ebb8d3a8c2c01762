// src/store/format.rs
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// On-disk document format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }

    pub fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, FormatError> {
        match self {
            DocumentFormat::Json => {
                let mut text = serde_json::to_string_pretty(value)?;
                text.push('\n');
                Ok(text)
            }
            DocumentFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }

    pub fn parse<T: DeserializeOwned>(&self, text: &str) -> Result<T, FormatError> {
        match self {
            DocumentFormat::Json => Ok(serde_json::from_str(text)?),
            DocumentFormat::Yaml => Ok(serde_yaml::from_str(text)?),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
