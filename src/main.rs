//! alarm-relay - one-shot invocation of the alarm notification pipeline.
//!
//! Reads a CloudWatch alarm event (from `--event` or stdin), formats and
//! publishes it, and prints the dispatch result as JSON on stdout.

use alarm_relay::{app::App, cli::Cli, config::Config, InvocationContext};
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use serde_json::Value;
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load(&cli).context("Failed to load configuration")?;

    // Logs go to stderr; stdout carries the result.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("-------------------- Configuration --------------------");
    info!("Log Level: {}", config.log_level);
    info!("Formatter: {}", config.formatter);
    info!("Template: {}", config.template_path().display());
    info!(
        "Topic: {}",
        config.topic_arn.as_deref().unwrap_or("Not configured")
    );
    info!("Dry Run: {}", config.dry_run);
    info!("-------------------------------------------------------");

    let app = App::builder(config).build().await?;

    let event = read_event(cli.event.as_deref()).await?;
    let request_id = cli
        .request_id
        .clone()
        .unwrap_or_else(|| format!("local-{}", Utc::now().timestamp_millis()));
    let ctx = InvocationContext::new(request_id);

    let result = app.handle(&event, &ctx).await;
    println!("{}", serde_json::to_string(&result)?);

    if !result.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

/// Reads the event document from a file, or from stdin when no path is given.
async fn read_event(path: Option<&Path>) -> Result<Value> {
    let raw = match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read event file {:?}", path))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read event from stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("Event is not valid JSON")
}
