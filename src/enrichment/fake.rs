//! A fake metadata provider for tests.

use crate::core::{AlarmMetadata, AlarmMetadataProvider};
use crate::error::LookupError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct FakeMetadataProvider {
    records: Mutex<HashMap<String, Vec<AlarmMetadata>>>,
    fail: AtomicBool,
    calls: AtomicUsize,
}

impl FakeMetadataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a record returned for its alarm name.
    pub fn add_alarm(&self, metadata: AlarmMetadata) {
        self.records
            .lock()
            .unwrap()
            .entry(metadata.alarm_name.clone())
            .or_default()
            .push(metadata);
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AlarmMetadataProvider for FakeMetadataProvider {
    async fn describe(&self, alarm_name: &str) -> Result<Vec<AlarmMetadata>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(LookupError::Api(
                "Fake metadata provider configured to fail".to_string(),
            ));
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(alarm_name)
            .cloned()
            .unwrap_or_default())
    }
}
