//! A builder for running the full pipeline against fakes.

use super::TOPIC;
use alarm_relay::app::App;
use alarm_relay::config::Config;
use alarm_relay::enrichment::fake::FakeMetadataProvider;
use alarm_relay::formatting::FormatterKind;
use alarm_relay::notification::fake::FakePublisher;
use std::path::PathBuf;
use std::sync::Arc;

pub struct TestAppBuilder {
    pub config: Config,
    pub publisher: Arc<FakePublisher>,
    pub metadata: Arc<FakeMetadataProvider>,
}

impl TestAppBuilder {
    pub fn new(formatter: FormatterKind) -> Self {
        let config = Config {
            formatter,
            topic_arn: Some(TOPIC.to_string()),
            template_path: Some(
                PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(formatter.default_template()),
            ),
            ..Config::default()
        };
        Self {
            config,
            publisher: Arc::new(FakePublisher::new()),
            metadata: Arc::new(FakeMetadataProvider::new()),
        }
    }

    pub fn with_publisher(mut self, publisher: FakePublisher) -> Self {
        self.publisher = Arc::new(publisher);
        self
    }

    pub fn with_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.template_path = Some(path.into());
        self
    }

    pub async fn build(&self) -> App {
        App::builder(self.config.clone())
            .publisher_override(self.publisher.clone())
            .metadata_provider_override(self.metadata.clone())
            .build()
            .await
            .expect("test app should build")
    }
}
