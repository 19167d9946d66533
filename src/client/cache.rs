//! Client-side snapshot of every record

use crate::core::record::TrainingRecord;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// The last successfully fetched record set
///
/// Replaced in full on every fetch, never merged or patched. Readers holding a
/// [`snapshot`](Self::snapshot) keep seeing the set they took.
#[derive(Debug, Clone)]
pub struct RecordCache {
    records: Arc<[TrainingRecord]>,
    generation: u64,
    fetched_at: Option<DateTime<Utc>>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self {
            records: Arc::from(Vec::new()),
            generation: 0,
            fetched_at: None,
        }
    }

    /// Swap in a freshly fetched record set
    pub fn replace(&mut self, records: Vec<TrainingRecord>) {
        self.records = Arc::from(records);
        self.generation += 1;
        self.fetched_at = Some(Utc::now());
    }

    pub fn records(&self) -> &[TrainingRecord] {
        &self.records
    }

    /// Shared handle to the current snapshot
    pub fn snapshot(&self) -> Arc<[TrainingRecord]> {
        Arc::clone(&self.records)
    }

    /// Number of fetches applied so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// When the current snapshot was fetched; `None` before the first fetch
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn find(&self, id: &Uuid) -> Option<&TrainingRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for RecordCache {
    fn default() -> Self {
        Self::new()
    }
}
