//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using the
//! `clap` crate. Configuration arguments are merged over the TOML file and
//! environment variables through the `figment::Provider` implementation.

use crate::formatting::FormatterKind;
use clap::Parser;
use figment::{
    value::{Dict, Map, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Formats a CloudWatch alarm state-change event and publishes it to an SNS topic.
#[derive(Parser, Debug, Default, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// File containing the alarm event JSON. Reads stdin when omitted.
    #[arg(short, long, value_name = "FILE")]
    pub event: Option<PathBuf>,

    /// Formatter to run: `basic` or `enriched`.
    #[arg(long, value_name = "KIND")]
    pub formatter: Option<FormatterKind>,

    /// ARN of the destination SNS topic.
    #[arg(long, value_name = "ARN")]
    pub topic_arn: Option<String>,

    /// Path to the base message template.
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Logging level (overridden by RUST_LOG).
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Request id attached to this invocation's logs.
    #[arg(long, value_name = "ID")]
    pub request_id: Option<String>,

    /// Print the notification instead of publishing it.
    #[arg(long)]
    pub dry_run: bool,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        if let Some(kind) = self.formatter {
            dict.insert("formatter".into(), Value::from(kind.to_string()));
        }

        if let Some(arn) = &self.topic_arn {
            dict.insert("topic_arn".into(), Value::from(arn.clone()));
        }

        if let Some(path) = &self.template {
            dict.insert(
                "template_path".into(),
                Value::from(path.display().to_string()),
            );
        }

        if let Some(level) = &self.log_level {
            dict.insert("log_level".into(), Value::from(level.clone()));
        }

        // Only an explicit flag overrides the configured value.
        if self.dry_run {
            dict.insert("dry_run".into(), Value::from(true));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
