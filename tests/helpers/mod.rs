#![allow(dead_code)]
//! Shared fixtures and builders for integration tests.

pub mod app;
pub mod test_metrics;

use alarm_relay::{AlarmMetadata, MetricDimension};
use serde_json::Value;
use std::path::PathBuf;

pub const TOPIC: &str = "arn:aws:sns:us-east-1:123456789012:paging";

/// Loads a JSON event from `tests/data`.
pub fn load_event(name: &str) -> Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name);
    let raw = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {:?}: {}", path, e));
    serde_json::from_str(&raw).unwrap()
}

/// Metadata for the `ApiErrorRate` alarm in `multi_metric_event.json`.
pub fn api_error_rate_metadata() -> AlarmMetadata {
    AlarmMetadata {
        alarm_name: "ApiErrorRate".to_string(),
        metric_name: "5XXError".to_string(),
        namespace: "AWS/ApiGateway".to_string(),
        period: 60,
        statistic: "Sum".to_string(),
        comparison_operator: "GreaterThanThreshold".to_string(),
        evaluation_periods: 1,
        threshold: 5.0,
        unit: None,
        treat_missing_data: Some("notBreaching".to_string()),
        dimensions: vec![
            MetricDimension {
                name: "ApiName".to_string(),
                value: "orders".to_string(),
            },
            MetricDimension {
                name: "Stage".to_string(),
                value: "prod".to_string(),
            },
        ],
    }
}
