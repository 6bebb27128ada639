//! A publisher for SNS topics.

use crate::core::{PublishReceipt, Publisher};
use crate::error::PublishError;
use async_trait::async_trait;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::operation::RequestId;
use aws_sdk_sns::Client;
use tracing::{error, info, instrument};

/// Publishes notifications with the SNS `Publish` API.
#[derive(Debug, Clone)]
pub struct SnsPublisher {
    client: Client,
}

impl SnsPublisher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the publisher from a loaded AWS SDK configuration.
    pub fn from_sdk_config(sdk_config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(sdk_config))
    }
}

#[async_trait]
impl Publisher for SnsPublisher {
    fn name(&self) -> &str {
        "sns"
    }

    #[instrument(skip_all, fields(topic = %topic, subject = %subject, bytes = body.len()))]
    async fn publish(
        &self,
        topic: &str,
        body: &str,
        subject: &str,
    ) -> Result<PublishReceipt, PublishError> {
        let output = self
            .client
            .publish()
            .topic_arn(topic)
            .message(body)
            .subject(subject)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                error!(error = %message, "SNS publish request failed");
                PublishError::Api {
                    topic: topic.to_string(),
                    message,
                }
            })?;

        let receipt = PublishReceipt {
            message_id: output.message_id().unwrap_or_default().to_string(),
            sequence_number: output.sequence_number().map(str::to_string),
            request_id: output.request_id().map(str::to_string),
        };
        info!(
            message_id = %receipt.message_id,
            request_id = receipt.request_id.as_deref().unwrap_or_default(),
            "Published notification to SNS."
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod sns_publisher_tests {
    use super::*;
    use aws_sdk_sns::config::retry::RetryConfig;
    use aws_sdk_sns::config::{BehaviorVersion, Credentials, Region};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn publisher_for(endpoint: &str) -> SnsPublisher {
        let config = aws_sdk_sns::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("AKIDEXAMPLE", "secret", None, None, "test"))
            .endpoint_url(endpoint)
            .retry_config(RetryConfig::disabled())
            .build();
        SnsPublisher::new(Client::from_conf(config))
    }

    #[tokio::test]
    async fn test_sns_publisher_handles_server_error_without_retry() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let publisher = publisher_for(&server.uri());

        // Act
        let result = publisher
            .publish(
                "arn:aws:sns:us-east-1:123456789012:paging",
                r#"{"Title":"HighCPU"}"#,
                "HighCPU",
            )
            .await;

        // Assert
        match result {
            Err(PublishError::Api { topic, .. }) => {
                assert_eq!(topic, "arn:aws:sns:us-east-1:123456789012:paging")
            }
            other => panic!("expected publish error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_sns_publisher_returns_receipt_with_request_id() {
        let server = MockServer::start().await;
        let body = r#"<PublishResponse xmlns="http://sns.amazonaws.com/doc/2010-03-31/">
  <PublishResult>
    <MessageId>94f20ce6-13c5-43a0-9a9e-ca52d816e90b</MessageId>
  </PublishResult>
  <ResponseMetadata>
    <RequestId>f187a3c1-376f-11df-8963-01868b7c937a</RequestId>
  </ResponseMetadata>
</PublishResponse>"#;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/xml")
                    .insert_header("x-amzn-requestid", "f187a3c1-376f-11df-8963-01868b7c937a")
                    .set_body_string(body),
            )
            .expect(1)
            .mount(&server)
            .await;

        let publisher = publisher_for(&server.uri());
        let receipt = publisher
            .publish("arn:aws:sns:us-east-1:123456789012:paging", "{}", "HighCPU")
            .await
            .unwrap();

        assert_eq!(receipt.message_id, "94f20ce6-13c5-43a0-9a9e-ca52d816e90b");
        assert_eq!(receipt.sequence_number, None);
        assert_eq!(
            receipt.request_id.as_deref(),
            Some("f187a3c1-376f-11df-8963-01868b7c937a")
        );
    }

    #[tokio::test]
    async fn test_sns_publisher_handles_unreachable_endpoint() {
        // Nothing listens on port 9 on the loopback interface.
        let publisher = publisher_for("http://127.0.0.1:9");

        let result = publisher
            .publish("arn:aws:sns:us-east-1:123456789012:paging", "{}", "subject")
            .await;

        assert!(result.is_err());
    }
}
