//! Severity classification for basic notifications.

use crate::core::AlarmEvent;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity levels understood by the downstream paging service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    #[default]
    Critical,
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Critical => "CRITICAL",
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        };
        f.write_str(s)
    }
}

/// Decides the severity of a notification from the alarm event.
pub trait SeverityPolicy: Send + Sync + fmt::Debug {
    fn classify(&self, event: &AlarmEvent) -> Severity;
}

/// Assigns the same severity to every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedSeverity(pub Severity);

impl SeverityPolicy for FixedSeverity {
    fn classify(&self, _event: &AlarmEvent) -> Severity {
        self.0
    }
}
