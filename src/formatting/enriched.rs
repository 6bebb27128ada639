//! Alarm notification enriched with the alarm's trigger definition.

use super::{NotificationMessage, Overlay};
use crate::core::{require, AlarmEvent, AlarmMetadata, AlarmMetadataProvider, MetricDimension};
use crate::error::{FormatError, LookupError};
use crate::internal_metrics::Metrics;
use crate::template::MessageTemplate;
use serde::Serialize;
use serde_with::skip_serializing_none;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct EnrichedFields {
    pub alarm_name: String,
    pub alarm_description: String,
    #[serde(rename = "AWSAccountId")]
    pub aws_account_id: String,
    pub new_state_value: String,
    pub new_state_reason: String,
    pub state_change_time: String,
    pub region: String,
    pub old_state_value: String,
    pub trigger: Trigger,
}

/// The condition under which the alarm fires.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Trigger {
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

impl From<AlarmMetadata> for Trigger {
    fn from(metadata: AlarmMetadata) -> Self {
        Self {
            metric_name: metadata.metric_name,
            namespace: metadata.namespace,
            period: metadata.period,
            statistic: metadata.statistic,
            comparison_operator: metadata.comparison_operator,
            evaluation_periods: metadata.evaluation_periods,
            threshold: metadata.threshold,
            unit: metadata.unit,
            treat_missing_data: metadata.treat_missing_data,
            dimensions: metadata.dimensions,
        }
    }
}

#[derive(Clone)]
pub struct EnrichedFormatter {
    template: MessageTemplate,
    metadata: Arc<dyn AlarmMetadataProvider>,
    metrics: Metrics,
}

impl std::fmt::Debug for EnrichedFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnrichedFormatter")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

impl EnrichedFormatter {
    pub fn new(
        template: MessageTemplate,
        metadata: Arc<dyn AlarmMetadataProvider>,
        metrics: Metrics,
    ) -> Self {
        Self {
            template,
            metadata,
            metrics,
        }
    }

    #[instrument(skip_all, fields(template = ?self.template.path()))]
    pub async fn format(&self, event: &AlarmEvent) -> Result<NotificationMessage, FormatError> {
        let base = self.template.load().await?;

        let detail = event.detail()?;
        let alarm_name = event.alarm_name()?;
        let state = require(detail.state.as_ref(), "detail.state")?;
        let previous_state = require(detail.previous_state.as_ref(), "detail.previousState")?;

        let alarm_description = detail
            .configuration
            .as_ref()
            .and_then(|c| c.description.clone())
            .unwrap_or_else(|| alarm_name.to_string());

        // Event fields are validated before the lookup.
        let aws_account_id = require(event.account.clone(), "account")?;
        let region = require(event.region.clone(), "region")?;
        let new_state_value = require(state.value.clone(), "detail.state.value")?;
        let new_state_reason = require(state.reason.clone(), "detail.state.reason")?;
        let state_change_time = require(state.timestamp.clone(), "detail.state.timestamp")?;
        let old_state_value = require(previous_state.value.clone(), "detail.previousState.value")?;

        let metadata = self.lookup(alarm_name).await?;

        let fields = EnrichedFields {
            alarm_name: alarm_name.to_string(),
            alarm_description,
            aws_account_id,
            new_state_value,
            new_state_reason,
            state_change_time,
            region,
            old_state_value,
            trigger: Trigger::from(metadata),
        };
        Ok(NotificationMessage::new(base, Overlay::Enriched(fields)))
    }

    /// Fetches the alarm definition, taking the first match. Alarm names are
    /// expected to be unique; extra matches are logged, not rejected.
    async fn lookup(&self, alarm_name: &str) -> Result<AlarmMetadata, LookupError> {
        let start = Instant::now();
        let result = self.metadata.describe(alarm_name).await;
        self.metrics
            .metadata_lookup_duration_seconds
            .record(start.elapsed().as_secs_f64());

        let matches = result?;
        debug!(alarm = alarm_name, count = matches.len(), "Alarm metadata lookup returned");
        if matches.len() > 1 {
            warn!(
                alarm = alarm_name,
                count = matches.len(),
                "Multiple alarms share this name; using the first match"
            );
        }
        matches
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NotFound(alarm_name.to_string()))
    }
}
