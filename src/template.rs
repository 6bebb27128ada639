//! Loading of the static base document every notification is built on.

use crate::error::TemplateError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A JSON object template read from disk.
///
/// The file is read on every `load`; nothing is cached between invocations.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageTemplate {
    path: PathBuf,
}

impl MessageTemplate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the template, which must be a JSON object.
    pub async fn load(&self) -> Result<Map<String, Value>, TemplateError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| TemplateError::Read {
                path: self.path.clone(),
                source,
            })?;

        let value: Value = serde_json::from_str(&raw).map_err(|source| TemplateError::Parse {
            path: self.path.clone(),
            source,
        })?;

        match value {
            Value::Object(map) => {
                debug!(path = ?self.path, keys = map.len(), "Loaded message template");
                Ok(map)
            }
            _ => Err(TemplateError::NotAnObject {
                path: self.path.clone(),
            }),
        }
    }
}
