//! Alarm metadata lookup.
//!
//! This module provides implementations of [`AlarmMetadataProvider`], the
//! read-side collaborator used by the enriched formatter to fetch an alarm's
//! trigger definition.

pub mod cloudwatch;

pub use cloudwatch::CloudWatchMetadataProvider;

pub use crate::core::AlarmMetadataProvider;

#[cfg(feature = "test-utils")]
pub mod fake;
