//! Append-only log of settled bets.
//!
//! The log has no size bound; every bet ever placed since the last reset is kept
//! and rewritten with each commit.

use crate::games::types::HistoryRecord;
use serde::{Deserialize, Serialize};

/// Ordered history, serialized as a plain JSON array
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct HistoryLog {
    records: Vec<HistoryRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record after every existing one
    pub fn append(&mut self, record: HistoryRecord) {
        self.records.push(record);
    }

    /// All records in insertion order
    pub fn all(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }

    pub fn into_records(self) -> Vec<HistoryRecord> {
        self.records
    }
}
