//! # Triage Queue - Priority Ordering and Cancellation
//!
//! Implements the core waiting-list data structure.
//!
//! ## Data Structures
//!
//! - `by_id`: O(1) lookup by patient id (duplicate detection, cancellation)
//! - `by_priority`: O(log n) ordered structure (BTreeMap keyed by `QueueKey`)
//!
//! ## Invariants Enforced
//!
//! - One pending claim per patient id (checked in `admit()`)
//! - Every entry in `by_priority` is Pending and has an `by_id` entry, and
//!   vice versa
//! - `next()` removes from both structures and flips the status in one step
//! - A cancelled entry leaves both structures immediately

use super::entities::PatientEntry;
use super::errors::{EntryViolation, TriageError};
use super::value_objects::{QueueKey, QueueStatus, Snapshot};
use crate::config::{TriageConfig, MAX_EXPECTED_CAPACITY};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

/// Patient priority queue with an id index.
///
/// Provides O(log n) operations for:
/// - Admitting entries
/// - Extracting the next entry to attend
/// - Cancelling an entry by patient id
///
/// The ordered structure is never exposed; callers read it through
/// [`TriageQueue::snapshot`].
#[derive(Debug, Clone)]
pub struct TriageQueue {
    /// Configuration.
    config: TriageConfig,

    /// Pending entries indexed by patient id.
    by_id: HashMap<String, QueueKey>,

    /// Pending entries in service order.
    by_priority: BTreeMap<QueueKey, PatientEntry>,

    /// Next admission ticket.
    next_ticket: u64,
}

impl TriageQueue {
    /// Creates a new empty queue.
    ///
    /// The index is pre-sized to `expected_capacity`, capped at
    /// [`MAX_EXPECTED_CAPACITY`] even if the config was never validated.
    pub fn new(config: TriageConfig) -> Self {
        Self {
            by_id: HashMap::with_capacity(
                config.expected_capacity.min(MAX_EXPECTED_CAPACITY),
            ),
            by_priority: BTreeMap::new(),
            next_ticket: 0,
            config,
        }
    }

    /// Creates a queue with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(TriageConfig::default())
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    /// Returns the number of pending entries.
    pub fn len(&self) -> usize {
        self.by_priority.len()
    }

    /// Returns true if nobody is waiting.
    pub fn is_empty(&self) -> bool {
        self.by_priority.is_empty()
    }

    /// Checks if a patient has a pending entry.
    pub fn contains(&self, patient_id: &str) -> bool {
        self.by_id.contains_key(patient_id)
    }

    /// Gets a pending entry by patient id.
    pub fn get(&self, patient_id: &str) -> Option<&PatientEntry> {
        self.by_id
            .get(patient_id)
            .and_then(|key| self.by_priority.get(key))
    }

    /// Returns the 1-based place in line of a pending patient.
    pub fn position(&self, patient_id: &str) -> Option<usize> {
        let key = self.by_id.get(patient_id)?;
        Some(self.by_priority.range(..key).count() + 1)
    }

    /// Admits an entry.
    ///
    /// # Errors
    /// - `InvalidEntry` if the entry is not Pending or its id is shorter than
    ///   the configured minimum
    /// - `DuplicateEntry` if the patient already has a pending entry
    pub fn admit(&mut self, entry: PatientEntry) -> Result<(), TriageError> {
        if !entry.is_pending() {
            return Err(TriageError::InvalidEntry(EntryViolation::NotPending {
                id: entry.id().clone(),
                status: entry.status(),
            }));
        }

        let len = entry.id().char_len();
        if len < self.config.min_patient_id_len {
            return Err(TriageError::InvalidEntry(
                EntryViolation::PatientIdTooShort {
                    id: entry.id().to_string(),
                    len,
                    min: self.config.min_patient_id_len,
                },
            ));
        }

        if self.by_id.contains_key(entry.id().as_str()) {
            return Err(TriageError::DuplicateEntry(entry.id().clone()));
        }

        let key = QueueKey::for_entry(&entry, self.next_ticket);
        self.next_ticket += 1;

        self.by_id.insert(entry.id().to_string(), key);
        self.by_priority.insert(key, entry);

        Ok(())
    }

    /// Extracts the highest-priority pending entry, moving it to InProgress.
    ///
    /// Returns `None` when nobody is waiting. The entry is not re-queued.
    pub fn next(&mut self) -> Option<PatientEntry> {
        let (_, mut entry) = self.by_priority.pop_first()?;
        self.by_id.remove(entry.id().as_str());

        // Entries in by_priority are always Pending
        let started = entry.begin_treatment();
        debug_assert!(started.is_ok(), "queued entry was not pending: {:?}", started);
        Some(entry)
    }

    /// Cancels a pending entry.
    ///
    /// Returns the cancelled entry, or `None` if the patient had no pending
    /// entry.
    pub fn cancel(&mut self, patient_id: &str) -> Option<PatientEntry> {
        let key = self.by_id.remove(patient_id)?;
        let mut entry = self.by_priority.remove(&key)?;

        let cancelled = entry.cancel();
        debug_assert!(cancelled.is_ok(), "queued entry was not pending: {:?}", cancelled);
        Some(entry)
    }

    /// Enumerates pending entries in service order.
    ///
    /// The returned iterator borrows the queue, so no mutation can happen
    /// while it is alive. Clone it to restart.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(self.by_priority.values())
    }

    /// Gets the queue status.
    pub fn status(&self, now: DateTime<Utc>) -> QueueStatus {
        QueueStatus::from_entries(self.by_priority.values(), now)
    }
}

impl Default for TriageQueue {
    fn default() -> Self {
        Self::with_defaults()
    }
}
