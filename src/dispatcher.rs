//! Formats an alarm event, publishes it, and reports the outcome.

use crate::core::{AlarmEvent, DispatchResult, PublishReceipt, Publisher};
use crate::error::DispatchError;
use crate::formatting::Formatter;
use crate::internal_metrics::Metrics;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, instrument};

/// Runs the format → serialize → publish pipeline for one event.
///
/// A dispatch never returns an error: every failure is logged with its kind
/// and reported as `FAILED` with the formatter's fixed failure message.
pub struct Dispatcher {
    formatter: Formatter,
    publisher: Arc<dyn Publisher>,
    topic: String,
    metrics: Metrics,
}

impl Dispatcher {
    pub fn new(
        formatter: Formatter,
        publisher: Arc<dyn Publisher>,
        topic: impl Into<String>,
        metrics: Metrics,
    ) -> Self {
        Self {
            formatter,
            publisher,
            topic: topic.into(),
            metrics,
        }
    }

    /// Parses a raw invocation payload and dispatches it.
    #[instrument(skip_all, fields(formatter = %self.formatter.kind(), publisher = self.publisher.name()))]
    pub async fn dispatch_value(&self, event: &Value) -> DispatchResult {
        let outcome = match AlarmEvent::from_value(event) {
            Ok(event) => self.try_dispatch(&event).await,
            Err(e) => Err(e.into()),
        };
        self.finish(outcome)
    }

    /// Dispatches an already parsed event.
    #[instrument(skip_all, fields(formatter = %self.formatter.kind(), publisher = self.publisher.name()))]
    pub async fn dispatch(&self, event: &AlarmEvent) -> DispatchResult {
        let outcome = self.try_dispatch(event).await;
        self.finish(outcome)
    }

    async fn try_dispatch(&self, event: &AlarmEvent) -> Result<PublishReceipt, DispatchError> {
        let message = self.formatter.format(event).await?;
        let body = message.to_json().map_err(DispatchError::Serialize)?;
        info!(message = %body, "Formatted notification");

        let subject = message.subject();
        let start = Instant::now();
        let published = self.publisher.publish(&self.topic, &body, &subject).await;
        self.metrics
            .publish_duration_seconds
            .record(start.elapsed().as_secs_f64());

        Ok(published?)
    }

    fn finish(&self, outcome: Result<PublishReceipt, DispatchError>) -> DispatchResult {
        let result = match outcome {
            Ok(receipt) => DispatchResult::success(receipt),
            Err(e) => {
                error!(kind = e.kind(), error = %e, "Dispatch failed");
                self.metrics.increment_failure(e.kind());
                DispatchResult::failed(self.formatter.kind().failure_message())
            }
        };
        self.metrics.increment_dispatch(result.status);
        info!(result = ?result, "Dispatch finished");
        result
    }
}
