//! # Internal Metrics
//!
//! Counters and histograms for the dispatch pipeline, emitted through the
//! `metrics` facade. No exporter is installed by this crate; whichever
//! recorder the host process registers receives them, and without one every
//! call is a no-op.

use crate::core::DispatchStatus;
use metrics::{Histogram, Unit};

/// Handles to the dispatch pipeline's metrics.
#[derive(Clone)]
pub struct Metrics {
    pub publish_duration_seconds: Histogram,
    pub metadata_lookup_duration_seconds: Histogram,
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics").finish_non_exhaustive()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Registers descriptions for all metrics with the global recorder and
    /// returns handles to them.
    pub fn new() -> Self {
        metrics::describe_counter!("dispatch_total", Unit::Count, "Total number of dispatches, labeled by final status.");
        metrics::describe_counter!("dispatch_failures_total", Unit::Count, "Total number of failed dispatches, labeled by error kind.");
        metrics::describe_histogram!("publish_duration_seconds", Unit::Seconds, "Latency of the outbound topic publish call.");
        metrics::describe_histogram!("metadata_lookup_duration_seconds", Unit::Seconds, "Latency of the alarm metadata lookup.");

        Self {
            publish_duration_seconds: metrics::histogram!("publish_duration_seconds"),
            metadata_lookup_duration_seconds: metrics::histogram!("metadata_lookup_duration_seconds"),
        }
    }

    /// Increments the dispatch counter for the given final status.
    pub fn increment_dispatch(&self, status: DispatchStatus) {
        let status = match status {
            DispatchStatus::Success => "success",
            DispatchStatus::Failed => "failed",
        };
        metrics::counter!("dispatch_total", "status" => status).increment(1);
    }

    /// Increments the failure counter for an error kind.
    pub fn increment_failure(&self, kind: &'static str) {
        metrics::counter!("dispatch_failures_total", "kind" => kind).increment(1);
    }
}
