//! Bounded history of past evaluations.
//!
//! The ledger is the only shared mutable state in the core. One lock
//! guards the whole push-then-evict sequence, so concurrent appends are
//! never lost, the bound is never overshot, and readers never observe a
//! half-applied append.

use std::collections::VecDeque;

use parking_lot::RwLock;
use tracing::trace;

use crate::types::EvaluationRecord;

/// Number of records retained when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 20;

/// Insertion-ordered FIFO of evaluation records with a fixed capacity.
#[derive(Debug)]
pub struct HistoryLedger {
    /// Oldest first.
    records: RwLock<VecDeque<EvaluationRecord>>,
    capacity: usize,
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLedger {
    /// Create an empty ledger holding at most [`DEFAULT_CAPACITY`] records.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty ledger with a custom bound. A zero capacity is
    /// raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: RwLock::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity,
        }
    }

    /// Append a record, evicting the oldest entries beyond capacity.
    pub fn append(&self, record: EvaluationRecord) {
        let mut records = self.records.write();
        self.push_evicting(&mut records, record);
    }

    /// Append a record and copy the resulting contents, newest first, under
    /// the same write guard. The returned history always starts with
    /// `record`, whatever other writers are doing.
    pub fn append_and_snapshot(&self, record: EvaluationRecord) -> Vec<EvaluationRecord> {
        let mut records = self.records.write();
        self.push_evicting(&mut records, record);
        records.iter().rev().cloned().collect()
    }

    fn push_evicting(&self, records: &mut VecDeque<EvaluationRecord>, record: EvaluationRecord) {
        records.push_back(record);

        let mut evicted = 0usize;
        while records.len() > self.capacity {
            records.pop_front();
            evicted += 1;
        }

        trace!(len = records.len(), evicted, "ledger append");
    }

    /// Copy of the current contents, newest first.
    pub fn snapshot(&self) -> Vec<EvaluationRecord> {
        self.records.read().iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
