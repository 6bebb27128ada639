//! Error types for the formatting and dispatch pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while turning an alarm event into a notification message.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("alarm event is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("alarm event could not be parsed: {0}")]
    InvalidEvent(#[source] serde_json::Error),

    #[error("alarm metadata lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Failures of the alarm metadata lookup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("no alarm named `{0}` was found")]
    NotFound(String),

    #[error("DescribeAlarms call failed: {0}")]
    Api(String),

    #[error("alarm `{alarm}` has no `{field}` in its definition")]
    IncompleteMetadata { alarm: String, field: &'static str },
}

/// Failures while loading the base message template.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("failed to read message template {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("message template {path:?} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("message template {path:?} must be a JSON object")]
    NotAnObject { path: PathBuf },
}

/// Failures of the outbound publish call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PublishError {
    #[error("publish to {topic} failed: {message}")]
    Api { topic: String, message: String },
}

/// Any failure of a dispatch. Collapsed into a `FAILED` result at the
/// dispatcher boundary; the kind is kept for logs and metrics.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("formatting failed: {0}")]
    Format(#[from] FormatError),

    #[error("failed to serialize notification message: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl DispatchError {
    /// A stable label for the failure category.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::Format(FormatError::MissingField(_))
            | DispatchError::Format(FormatError::InvalidEvent(_)) => "missing_field",
            DispatchError::Format(FormatError::Lookup(_)) => "lookup_failure",
            DispatchError::Format(FormatError::Template(_)) => "template_load_failure",
            DispatchError::Serialize(_) => "serialization_failure",
            DispatchError::Publish(_) => "publish_failure",
        }
    }
}
