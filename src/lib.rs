//! alarm-relay - CloudWatch alarm notifications for paging pipelines
//!
//! This library turns CloudWatch alarm state-change events into notification
//! payloads and publishes them to an SNS topic, reporting a SUCCESS/FAILED
//! status for every invocation.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod dispatcher;
pub mod enrichment;
pub mod error;
pub mod formatting;
pub mod handler;
pub mod internal_metrics;
pub mod notification;
pub mod template;

// Re-export core types for convenience
pub use crate::core::*;
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, FormatError};
