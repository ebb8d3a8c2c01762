// src/store/descriptor.rs
use serde::{Deserialize, Serialize};

/// One log source to check. `path` and `kind` are opaque to the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogDescriptor {
    pub id: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl LogDescriptor {
    pub fn new(id: impl Into<String>, path: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            kind: kind.into(),
        }
    }
}
