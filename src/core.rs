//! Core domain types and service traits for alarm-relay
//!
//! This module defines the fundamental data structures and trait contracts
//! that govern component interactions throughout the application.

use crate::error::{FormatError, LookupError, PublishError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// A CloudWatch "Alarm State Change" event as delivered by EventBridge.
///
/// Every nested field is optional at the deserialization layer; formatters
/// check the fields they need and report the missing ones by JSON path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AlarmEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "detail-type")]
    pub detail_type: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    /// The AWS account that owns the alarm.
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    /// ARNs of the alarms this event concerns.
    #[serde(default)]
    pub resources: Option<Vec<String>>,
    #[serde(default)]
    pub detail: Option<AlarmDetail>,
}

impl AlarmEvent {
    /// Parses a raw JSON invocation payload.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, FormatError> {
        Self::deserialize(value).map_err(FormatError::InvalidEvent)
    }

    /// Returns the `detail` object or a `MissingField` error.
    pub fn detail(&self) -> Result<&AlarmDetail, FormatError> {
        require(self.detail.as_ref(), "detail")
    }

    /// Returns `detail.alarmName`, the key every formatter relies on.
    pub fn alarm_name(&self) -> Result<&str, FormatError> {
        require(self.detail()?.alarm_name.as_deref(), "detail.alarmName")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AlarmDetail {
    #[serde(default)]
    pub alarm_name: Option<String>,
    #[serde(default)]
    pub state: Option<AlarmState>,
    #[serde(default)]
    pub previous_state: Option<AlarmState>,
    #[serde(default)]
    pub configuration: Option<AlarmConfiguration>,
}

/// One side of a state transition (`OK`, `ALARM`, `INSUFFICIENT_DATA`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AlarmState {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AlarmConfiguration {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub metrics: Option<Vec<MetricEntry>>,
}

/// An entry of `configuration.metrics`: either a plain metric (`metricStat`)
/// or a metric-math expression.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MetricEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub metric_stat: Option<MetricStat>,
    #[serde(default)]
    pub expression: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub return_data: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricStat {
    pub metric: MetricIdentity,
    #[serde(default)]
    pub period: Option<i64>,
    #[serde(default)]
    pub stat: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MetricIdentity {
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Dimension name to value, in document order.
    #[serde(default)]
    pub dimensions: Option<IndexMap<String, String>>,
}

/// Returns the value or a `MissingField` error naming its JSON path.
pub(crate) fn require<T>(value: Option<T>, path: &'static str) -> Result<T, FormatError> {
    value.ok_or(FormatError::MissingField(path))
}

/// Alarm definition returned by the metadata lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlarmMetadata {
    pub alarm_name: String,
    pub metric_name: String,
    pub namespace: String,
    pub period: i32,
    pub statistic: String,
    pub comparison_operator: String,
    pub evaluation_periods: i32,
    pub threshold: f64,
    pub unit: Option<String>,
    pub treat_missing_data: Option<String>,
    pub dimensions: Vec<MetricDimension>,
}

/// A name/value dimension pair, serialized the way CloudWatch's own SNS
/// notifications render trigger dimensions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricDimension {
    pub name: String,
    pub value: String,
}

/// Opaque acknowledgement returned by the topic after a successful publish.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PublishReceipt {
    pub message_id: String,
    pub sequence_number: Option<String>,
    /// Service-side request id, for correlating with the provider's logs.
    pub request_id: Option<String>,
}

/// Outcome of a single dispatch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DispatchStatus {
    Success,
    Failed,
}

/// The body of a `DispatchResult`: the publish receipt on success, a fixed
/// human-readable string on failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DispatchMessage {
    Published(PublishReceipt),
    Failure(String),
}

/// The value returned to the invoking runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DispatchResult {
    pub status: DispatchStatus,
    pub message: DispatchMessage,
}

impl DispatchResult {
    pub fn success(receipt: PublishReceipt) -> Self {
        Self {
            status: DispatchStatus::Success,
            message: DispatchMessage::Published(receipt),
        }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            status: DispatchStatus::Failed,
            message: DispatchMessage::Failure(message.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == DispatchStatus::Success
    }
}

/// Execution context supplied by the invoking runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationContext {
    pub request_id: String,
    pub invoked_at: DateTime<Utc>,
}

impl InvocationContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            invoked_at: Utc::now(),
        }
    }
}

// =============================================================================
// Service Traits
// =============================================================================

/// Looks up alarm definitions by name.
#[async_trait]
pub trait AlarmMetadataProvider: Send + Sync {
    /// Returns every alarm definition whose name matches `alarm_name`.
    ///
    /// # Returns
    /// * `Ok(Vec<AlarmMetadata>)`, possibly empty
    /// * `Err` if the lookup API call failed or returned an unusable record
    async fn describe(&self, alarm_name: &str) -> Result<Vec<AlarmMetadata>, LookupError>;
}

/// Publishes a message to a pub/sub topic.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// A short name for the publisher (e.g. "sns", "stdout"), used in logs.
    fn name(&self) -> &str;

    /// Publishes `body` to `topic` with the given `subject`.
    ///
    /// # Returns
    /// * `Ok(PublishReceipt)` with the provider's acknowledgement
    /// * `Err` if the provider rejected the message or could not be reached
    async fn publish(
        &self,
        topic: &str,
        body: &str,
        subject: &str,
    ) -> Result<PublishReceipt, PublishError>;
}
