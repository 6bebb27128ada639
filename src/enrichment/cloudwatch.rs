//! Alarm metadata from CloudWatch `DescribeAlarms`.

use crate::core::{AlarmMetadata, AlarmMetadataProvider, MetricDimension};
use crate::error::LookupError;
use async_trait::async_trait;
use aws_sdk_cloudwatch::error::DisplayErrorContext;
use aws_sdk_cloudwatch::types::{AlarmType, MetricAlarm};
use aws_sdk_cloudwatch::Client;
use tracing::{debug, instrument};

/// Looks up metric alarms by exact name.
#[derive(Debug, Clone)]
pub struct CloudWatchMetadataProvider {
    client: Client,
}

impl CloudWatchMetadataProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the provider from a loaded AWS SDK configuration.
    pub fn from_sdk_config(sdk_config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(sdk_config))
    }
}

#[async_trait]
impl AlarmMetadataProvider for CloudWatchMetadataProvider {
    #[instrument(skip(self))]
    async fn describe(&self, alarm_name: &str) -> Result<Vec<AlarmMetadata>, LookupError> {
        let output = self
            .client
            .describe_alarms()
            .alarm_names(alarm_name)
            .alarm_types(AlarmType::MetricAlarm)
            .send()
            .await
            .map_err(|e| LookupError::Api(DisplayErrorContext(&e).to_string()))?;

        debug!(count = output.metric_alarms().len(), "DescribeAlarms returned");
        output.metric_alarms().iter().map(metadata_from_alarm).collect()
    }
}

/// Converts an SDK alarm record, rejecting records without the fields a
/// trigger needs (e.g. metric-math alarms, which carry no single metric).
pub fn metadata_from_alarm(alarm: &MetricAlarm) -> Result<AlarmMetadata, LookupError> {
    let name = alarm.alarm_name().unwrap_or_default();

    // Percentile alarms carry `ExtendedStatistic` instead of `Statistic`.
    let statistic = alarm
        .statistic()
        .map(|s| s.as_str())
        .or(alarm.extended_statistic());

    let dimensions = alarm
        .dimensions()
        .iter()
        .map(|d| MetricDimension {
            name: d.name().unwrap_or_default().to_string(),
            value: d.value().unwrap_or_default().to_string(),
        })
        .collect();

    Ok(AlarmMetadata {
        alarm_name: name.to_string(),
        metric_name: field(alarm.metric_name(), name, "MetricName")?.to_string(),
        namespace: field(alarm.namespace(), name, "Namespace")?.to_string(),
        period: field(alarm.period(), name, "Period")?,
        statistic: field(statistic, name, "Statistic")?.to_string(),
        comparison_operator: field(
            alarm.comparison_operator().map(|c| c.as_str()),
            name,
            "ComparisonOperator",
        )?
        .to_string(),
        evaluation_periods: field(alarm.evaluation_periods(), name, "EvaluationPeriods")?,
        threshold: field(alarm.threshold(), name, "Threshold")?,
        unit: alarm.unit().map(|u| u.as_str().to_string()),
        treat_missing_data: alarm.treat_missing_data().map(str::to_string),
        dimensions,
    })
}

fn field<T>(value: Option<T>, alarm: &str, field: &'static str) -> Result<T, LookupError> {
    value.ok_or_else(|| LookupError::IncompleteMetadata {
        alarm: alarm.to_string(),
        field,
    })
}
