//! Configuration management for alarm-relay
//!
//! This module defines the `Config` struct holding all application settings.
//! It uses the `figment` crate to layer defaults, an optional TOML file,
//! environment variables and command-line arguments.

use crate::cli::Cli;
use crate::formatting::{basic::DEFAULT_CLIENT_LABEL, FormatterKind, Severity};
use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the destination topic.
pub const TOPIC_ENV_VAR: &str = "SNS_TOPIC_ARN";

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// Which formatter builds the notification.
    pub formatter: FormatterKind,
    /// ARN of the SNS topic notifications are published to.
    pub topic_arn: Option<String>,
    /// Base template; defaults to the formatter's shipped template.
    pub template_path: Option<PathBuf>,
    /// Severity assigned by the basic formatter.
    pub severity: Severity,
    /// Value of the basic formatter's `Client` field.
    pub client_label: String,
    /// Overrides the region resolved by the AWS SDK.
    pub aws_region: Option<String>,
    /// Print notifications instead of publishing them.
    pub dry_run: bool,
}

impl Config {
    /// Loads the configuration.
    ///
    /// Sources, lowest precedence first: built-in defaults, the TOML file
    /// given with `--config`, `ALARM_RELAY_*` variables, `SNS_TOPIC_ARN`,
    /// and finally command-line arguments.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(path) = &cli.config {
            if !path.exists() {
                bail!("Configuration file not found at {:?}", path);
            }
            figment = figment.merge(Toml::file(path));
        }

        let config: Config = figment
            // e.g. ALARM_RELAY_FORMATTER=enriched
            .merge(Env::prefixed("ALARM_RELAY_"))
            .merge(Env::raw().only(&[TOPIC_ENV_VAR]).map(|_| "topic_arn".into()))
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }

    /// The template the configured formatter loads.
    pub fn template_path(&self) -> PathBuf {
        self.template_path
            .clone()
            .unwrap_or_else(|| self.formatter.default_template())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            formatter: FormatterKind::Basic,
            topic_arn: None,
            template_path: None,
            severity: Severity::Critical,
            client_label: DEFAULT_CLIENT_LABEL.to_string(),
            aws_region: None,
            dry_run: false,
        }
    }
}
