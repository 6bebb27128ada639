//! Turns alarm events into notification messages.
//!
//! Two formatters share one pipeline: [`BasicFormatter`] builds a paging
//! payload purely from the event, [`EnrichedFormatter`] adds the alarm's
//! trigger definition fetched from the metadata provider. Both overlay their
//! typed fields on a base template loaded from disk.

pub mod basic;
pub mod enriched;
pub mod severity;

pub use basic::{BasicFields, BasicFormatter};
pub use enriched::{EnrichedFields, EnrichedFormatter, Trigger};
pub use severity::{FixedSeverity, Severity, SeverityPolicy};

use crate::core::AlarmEvent;
use crate::error::FormatError;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;

/// Which formatter the pipeline runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    #[default]
    Basic,
    Enriched,
}

impl FormatterKind {
    /// The template shipped for this formatter.
    pub fn default_template(&self) -> PathBuf {
        match self {
            FormatterKind::Basic => PathBuf::from("templates/basic.json"),
            FormatterKind::Enriched => PathBuf::from("templates/enriched.json"),
        }
    }

    /// The fixed message returned to the caller when a dispatch fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            FormatterKind::Basic => "Failed to publish message to SNS Topic",
            FormatterKind::Enriched => "Failed to publish alarm notification to SNS Topic",
        }
    }
}

impl fmt::Display for FormatterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatterKind::Basic => f.write_str("basic"),
            FormatterKind::Enriched => f.write_str("enriched"),
        }
    }
}

impl std::str::FromStr for FormatterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(FormatterKind::Basic),
            "enriched" => Ok(FormatterKind::Enriched),
            other => Err(format!("unknown formatter `{}` (expected basic or enriched)", other)),
        }
    }
}

/// The formatter selected for a pipeline.
#[derive(Debug, Clone)]
pub enum Formatter {
    Basic(BasicFormatter),
    Enriched(EnrichedFormatter),
}

impl Formatter {
    pub fn kind(&self) -> FormatterKind {
        match self {
            Formatter::Basic(_) => FormatterKind::Basic,
            Formatter::Enriched(_) => FormatterKind::Enriched,
        }
    }

    /// Builds the notification message for an event.
    pub async fn format(&self, event: &AlarmEvent) -> Result<NotificationMessage, FormatError> {
        match self {
            Formatter::Basic(formatter) => formatter.format(event).await,
            Formatter::Enriched(formatter) => formatter.format(event).await,
        }
    }
}

/// The typed fields a formatter writes over the template.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Overlay {
    Basic(BasicFields),
    Enriched(EnrichedFields),
}

/// A notification: the base template plus the formatter's overlay.
///
/// Serializes as the template object with every overlay field inserted.
/// Overlay keys that already exist in the template keep their position;
/// template keys the overlay does not know about are left untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationMessage {
    template: Map<String, Value>,
    overlay: Overlay,
}

impl NotificationMessage {
    pub fn new(template: Map<String, Value>, overlay: Overlay) -> Self {
        Self { template, overlay }
    }

    /// The subject line used when publishing.
    pub fn subject(&self) -> String {
        match &self.overlay {
            Overlay::Basic(fields) => fields.title.clone(),
            Overlay::Enriched(fields) => format!(
                "{}: \"{}\" in {}",
                fields.new_state_value, fields.alarm_name, fields.region
            ),
        }
    }

    /// The merged JSON document.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        let mut merged = self.template.clone();
        if let Value::Object(fields) = serde_json::to_value(&self.overlay)? {
            for (key, value) in fields {
                merged.insert(key, value);
            }
        }
        Ok(Value::Object(merged))
    }

    /// The merged JSON document as text, ready for publishing.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_value()?)
    }
}

impl Serialize for NotificationMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}
