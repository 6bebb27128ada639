//! The main application wiring, decoupled from the entry point.

use crate::{
    config::Config,
    core::{AlarmMetadataProvider, DispatchResult, InvocationContext, Publisher},
    dispatcher::Dispatcher,
    enrichment::CloudWatchMetadataProvider,
    formatting::{BasicFormatter, EnrichedFormatter, FixedSeverity, Formatter, FormatterKind, SeverityPolicy},
    handler,
    internal_metrics::Metrics,
    notification::{SnsPublisher, StdoutPublisher},
    template::MessageTemplate,
};
use anyhow::{bail, Result};
use aws_config::{retry::RetryConfig, BehaviorVersion, Region, SdkConfig};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Topic name reported in logs when running dry without a configured topic.
const DRY_RUN_TOPIC: &str = "dry-run";

/// A fully wired pipeline, ready to handle invocations.
pub struct App {
    dispatcher: Dispatcher,
}

impl App {
    /// Creates a new `AppBuilder` to construct an `App`.
    pub fn builder(config: Config) -> AppBuilder {
        AppBuilder::new(config)
    }

    /// Handles one invocation.
    pub async fn handle(&self, event: &Value, ctx: &InvocationContext) -> DispatchResult {
        handler::handle(&self.dispatcher, event, ctx).await
    }
}

/// Builder for the application.
///
/// Collaborators default to the AWS implementations selected by the
/// configuration; each can be overridden, which is how tests run the full
/// pipeline without network access.
pub struct AppBuilder {
    config: Config,
    publisher_override: Option<Arc<dyn Publisher>>,
    metadata_provider_override: Option<Arc<dyn AlarmMetadataProvider>>,
    severity_policy_override: Option<Arc<dyn SeverityPolicy>>,
}

impl AppBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            publisher_override: None,
            metadata_provider_override: None,
            severity_policy_override: None,
        }
    }

    /// Overrides the topic publisher.
    pub fn publisher_override(mut self, publisher: Arc<dyn Publisher>) -> Self {
        self.publisher_override = Some(publisher);
        self
    }

    /// Overrides the alarm metadata provider used by the enriched formatter.
    pub fn metadata_provider_override(mut self, provider: Arc<dyn AlarmMetadataProvider>) -> Self {
        self.metadata_provider_override = Some(provider);
        self
    }

    /// Replaces the fixed severity from the configuration with a custom policy.
    pub fn severity_policy(mut self, policy: Arc<dyn SeverityPolicy>) -> Self {
        self.severity_policy_override = Some(policy);
        self
    }

    pub async fn build(self) -> Result<App> {
        let config = self.config;
        let metrics = Metrics::new();
        let mut sdk: Option<SdkConfig> = None;

        let topic = match (&config.topic_arn, config.dry_run) {
            (Some(topic), _) => topic.clone(),
            (None, true) => DRY_RUN_TOPIC.to_string(),
            (None, false) => bail!(
                "No destination topic configured; set {} or `topic_arn`",
                crate::config::TOPIC_ENV_VAR
            ),
        };

        let publisher: Arc<dyn Publisher> = match self.publisher_override {
            Some(publisher) => publisher,
            None if config.dry_run => Arc::new(StdoutPublisher::new()),
            None => Arc::new(SnsPublisher::from_sdk_config(
                shared_sdk_config(&mut sdk, &config).await,
            )),
        };

        let template = MessageTemplate::new(config.template_path());
        let formatter = match config.formatter {
            FormatterKind::Basic => {
                let severity = self
                    .severity_policy_override
                    .unwrap_or_else(|| Arc::new(FixedSeverity(config.severity)) as Arc<dyn SeverityPolicy>);
                Formatter::Basic(BasicFormatter::new(
                    template,
                    severity,
                    config.client_label.clone(),
                ))
            }
            FormatterKind::Enriched => {
                let provider: Arc<dyn AlarmMetadataProvider> = match self.metadata_provider_override {
                    Some(provider) => provider,
                    None => Arc::new(CloudWatchMetadataProvider::from_sdk_config(
                        shared_sdk_config(&mut sdk, &config).await,
                    )),
                };
                Formatter::Enriched(EnrichedFormatter::new(template, provider, metrics.clone()))
            }
        };

        info!(
            formatter = %config.formatter,
            topic = %topic,
            publisher = publisher.name(),
            template = ?config.template_path(),
            "Dispatch pipeline ready."
        );

        Ok(App {
            dispatcher: Dispatcher::new(formatter, publisher, topic, metrics),
        })
    }
}

/// Loads the AWS SDK configuration on first use and shares it between the
/// SNS and CloudWatch clients.
async fn shared_sdk_config<'a>(slot: &'a mut Option<SdkConfig>, config: &Config) -> &'a SdkConfig {
    let loaded = match slot.take() {
        Some(loaded) => loaded,
        None => load_sdk_config(config).await,
    };
    slot.insert(loaded)
}

async fn load_sdk_config(config: &Config) -> SdkConfig {
    // Retries are left to the invoking runtime.
    let mut loader = aws_config::defaults(BehaviorVersion::latest()).retry_config(RetryConfig::disabled());
    if let Some(region) = &config.aws_region {
        loader = loader.region(Region::new(region.clone()));
    }
    loader.load().await
}
