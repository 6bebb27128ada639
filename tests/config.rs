use alarm_relay::cli::Cli;
use alarm_relay::config::Config;
use alarm_relay::formatting::{FormatterKind, Severity};
use serial_test::serial;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

const ENV_VARS: &[&str] = &[
    "SNS_TOPIC_ARN",
    "ALARM_RELAY_TOPIC_ARN",
    "ALARM_RELAY_FORMATTER",
    "ALARM_RELAY_DRY_RUN",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

#[test]
#[serial]
fn test_defaults_without_any_source() {
    clear_env();

    let config = Config::load(&Cli::default()).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.formatter, FormatterKind::Basic);
    assert_eq!(config.severity, Severity::Critical);
    assert_eq!(config.client_label, "Amazon Cloudwatch Alarm");
    assert_eq!(config.topic_arn, None);
    assert!(!config.dry_run);
}

#[test]
#[serial]
fn test_load_full_valid_config() {
    clear_env();
    let file = config_file(
        r#"
        log_level = "debug"
        formatter = "enriched"
        topic_arn = "arn:aws:sns:eu-west-1:123456789012:pager"
        template_path = "/etc/alarm-relay/enriched.json"
        severity = "WARNING"
        client_label = "Ops CloudWatch"
        aws_region = "eu-west-1"
        dry_run = true
    "#,
    );

    let cli = Cli {
        config: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let config = Config::load(&cli).unwrap();

    assert_eq!(config.log_level, "debug");
    assert_eq!(config.formatter, FormatterKind::Enriched);
    assert_eq!(
        config.topic_arn.as_deref(),
        Some("arn:aws:sns:eu-west-1:123456789012:pager")
    );
    assert_eq!(
        config.template_path(),
        PathBuf::from("/etc/alarm-relay/enriched.json")
    );
    assert_eq!(config.severity, Severity::Warning);
    assert_eq!(config.client_label, "Ops CloudWatch");
    assert_eq!(config.aws_region.as_deref(), Some("eu-west-1"));
    assert!(config.dry_run);
}

#[test]
#[serial]
fn test_topic_from_environment() {
    clear_env();
    std::env::set_var("SNS_TOPIC_ARN", "arn:aws:sns:us-east-1:123456789012:from-env");

    let config = Config::load(&Cli::default()).unwrap();
    clear_env();

    assert_eq!(
        config.topic_arn.as_deref(),
        Some("arn:aws:sns:us-east-1:123456789012:from-env")
    );
}

#[test]
#[serial]
fn test_prefixed_environment_overrides_file() {
    clear_env();
    let file = config_file(r#"formatter = "basic""#);
    std::env::set_var("ALARM_RELAY_FORMATTER", "enriched");

    let cli = Cli {
        config: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let config = Config::load(&cli).unwrap();
    clear_env();

    assert_eq!(config.formatter, FormatterKind::Enriched);
}

#[test]
#[serial]
fn test_cli_overrides_environment() {
    clear_env();
    std::env::set_var("SNS_TOPIC_ARN", "arn:aws:sns:us-east-1:123456789012:from-env");

    let cli = Cli {
        topic_arn: Some("arn:aws:sns:us-east-1:123456789012:from-cli".to_string()),
        formatter: Some(FormatterKind::Enriched),
        template: Some(PathBuf::from("custom.json")),
        dry_run: true,
        ..Default::default()
    };
    let config = Config::load(&cli).unwrap();
    clear_env();

    assert_eq!(
        config.topic_arn.as_deref(),
        Some("arn:aws:sns:us-east-1:123456789012:from-cli")
    );
    assert_eq!(config.formatter, FormatterKind::Enriched);
    assert_eq!(config.template_path(), PathBuf::from("custom.json"));
    assert!(config.dry_run);
}

#[test]
#[serial]
fn test_missing_config_file_is_an_error() {
    clear_env();
    let cli = Cli {
        config: Some(PathBuf::from("/this/config/does/not/exist.toml")),
        ..Default::default()
    };

    let err = Config::load(&cli).unwrap_err();
    assert!(err.to_string().contains("Configuration file not found"));
}

#[test]
#[serial]
fn test_unknown_formatter_is_rejected() {
    clear_env();
    let file = config_file(r#"formatter = "fancy""#);
    let cli = Cli {
        config: Some(file.path().to_path_buf()),
        ..Default::default()
    };

    assert!(Config::load(&cli).is_err());
}
