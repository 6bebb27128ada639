//! Paging payload built purely from the alarm event.

use super::{NotificationMessage, Overlay, Severity, SeverityPolicy};
use crate::core::{require, AlarmEvent, MetricEntry};
use crate::error::FormatError;
use crate::template::MessageTemplate;
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

/// Joins the configuration description and the state reason. This is the
/// literal two-character token `/n`, not a line break.
pub const DESCRIPTION_SEPARATOR: &str = "/n";

/// Default value of the `Client` field.
pub const DEFAULT_CLIENT_LABEL: &str = "Amazon Cloudwatch Alarm";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct BasicFields {
    pub severity: Severity,
    pub client: String,
    pub alarms: Vec<String>,
    pub title: String,
    pub description: String,
    /// Dimension name to every value seen for it, in first-seen order.
    pub details: IndexMap<String, Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct BasicFormatter {
    template: MessageTemplate,
    severity: Arc<dyn SeverityPolicy>,
    client_label: String,
}

impl BasicFormatter {
    pub fn new(
        template: MessageTemplate,
        severity: Arc<dyn SeverityPolicy>,
        client_label: impl Into<String>,
    ) -> Self {
        Self {
            template,
            severity,
            client_label: client_label.into(),
        }
    }

    #[instrument(skip_all, fields(template = ?self.template.path()))]
    pub async fn format(&self, event: &AlarmEvent) -> Result<NotificationMessage, FormatError> {
        let base = self.template.load().await?;
        let fields = self.fields(event)?;
        Ok(NotificationMessage::new(base, Overlay::Basic(fields)))
    }

    fn fields(&self, event: &AlarmEvent) -> Result<BasicFields, FormatError> {
        let detail = event.detail()?;
        let alarms = require(event.resources.clone(), "resources")?;
        let title = event.alarm_name()?.to_string();

        let configuration = require(detail.configuration.as_ref(), "detail.configuration")?;
        let description = require(
            configuration.description.as_deref(),
            "detail.configuration.description",
        )?;
        let reason = require(
            detail.state.as_ref().and_then(|s| s.reason.as_deref()),
            "detail.state.reason",
        )?;

        let metrics = require(
            configuration.metrics.as_deref(),
            "detail.configuration.metrics",
        )?;

        Ok(BasicFields {
            severity: self.severity.classify(event),
            client: self.client_label.clone(),
            alarms,
            title,
            description: format!("{}{}{}", description, DESCRIPTION_SEPARATOR, reason),
            details: collect_dimensions(metrics),
        })
    }
}

/// Groups dimension values by name across all metrics of an alarm.
///
/// Only metrics with `metricStat.metric.dimensions` contribute.
pub fn collect_dimensions(metrics: &[MetricEntry]) -> IndexMap<String, Vec<String>> {
    let mut details: IndexMap<String, Vec<String>> = IndexMap::new();
    let dimension_sets = metrics
        .iter()
        .filter_map(|m| m.metric_stat.as_ref())
        .filter_map(|stat| stat.metric.dimensions.as_ref());

    for dimensions in dimension_sets {
        for (key, value) in dimensions {
            details.entry(key.clone()).or_default().push(value.clone());
        }
    }
    details
}
