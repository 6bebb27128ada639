//! A publisher that prints notifications instead of sending them.

use crate::core::{PublishReceipt, Publisher};
use crate::error::PublishError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

/// Writes each notification body to stdout and acknowledges it with a
/// synthetic message id.
#[derive(Debug, Default)]
pub struct StdoutPublisher {
    published: AtomicUsize,
}

impl StdoutPublisher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Publisher for StdoutPublisher {
    fn name(&self) -> &str {
        "stdout"
    }

    async fn publish(
        &self,
        topic: &str,
        body: &str,
        subject: &str,
    ) -> Result<PublishReceipt, PublishError> {
        let n = self.published.fetch_add(1, Ordering::SeqCst) + 1;
        info!(topic, subject, "Dry run: printing notification instead of publishing.");
        println!("{}", body);
        Ok(PublishReceipt {
            message_id: format!("dry-run-{}", n),
            sequence_number: None,
            request_id: None,
        })
    }
}
