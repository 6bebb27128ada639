//! A fake publisher for tests.

use crate::core::{PublishReceipt, Publisher};
use crate::error::PublishError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// One recorded publish call.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedMessage {
    pub topic: String,
    pub body: String,
    pub subject: String,
}

#[derive(Debug, Default)]
pub struct FakePublisher {
    pub published: Mutex<Vec<PublishedMessage>>,
    fail_on_publish: AtomicBool,
    sequence_number: Option<String>,
}

impl FakePublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A publisher that acknowledges with a sequence number, like a FIFO topic.
    pub fn fifo(sequence_number: &str) -> Self {
        Self {
            sequence_number: Some(sequence_number.to_string()),
            ..Self::default()
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail_on_publish.store(fail, Ordering::SeqCst);
    }

    pub fn published(&self) -> Vec<PublishedMessage> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for FakePublisher {
    fn name(&self) -> &str {
        "fake"
    }

    async fn publish(
        &self,
        topic: &str,
        body: &str,
        subject: &str,
    ) -> Result<PublishReceipt, PublishError> {
        if self.fail_on_publish.load(Ordering::SeqCst) {
            return Err(PublishError::Api {
                topic: topic.to_string(),
                message: "Fake publisher configured to fail".to_string(),
            });
        }
        let mut published = self.published.lock().unwrap();
        published.push(PublishedMessage {
            topic: topic.to_string(),
            body: body.to_string(),
            subject: subject.to_string(),
        });
        Ok(PublishReceipt {
            message_id: format!("fake-message-{}", published.len()),
            sequence_number: self.sequence_number.clone(),
            request_id: Some(format!("fake-request-{}", published.len())),
        })
    }
}
