//! # Triage Service
//!
//! Thread-safe handle around one [`TriageQueue`], shared by every desk session.
//!
//! ## Thread Safety
//!
//! The queue sits behind a single `RwLock`. `admit`, `next` and `cancel` take
//! the write lock; `snapshot`, `status` and lookups take the read lock and copy
//! what they need before releasing it, so callers never hold a borrow into the
//! queue across a mutation.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

use crate::config::TriageConfig;
use crate::domain::{PatientEntry, QueueSnapshot, QueueStatus, TriageError, TriageQueue};
use crate::ports::inbound::TriageApi;
use crate::ports::outbound::{ArrivalClock, SystemArrivalClock};

/// Shared triage queue.
///
/// Cheap to clone; clones share the same queue.
#[derive(Clone)]
pub struct TriageService {
    queue: Arc<RwLock<TriageQueue>>,
    clock: Arc<dyn ArrivalClock>,
}

impl TriageService {
    /// Creates a service with the system clock.
    pub fn new(config: TriageConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemArrivalClock))
    }

    /// Creates a service with a custom arrival clock.
    pub fn with_clock(config: TriageConfig, clock: Arc<dyn ArrivalClock>) -> Self {
        Self {
            queue: Arc::new(RwLock::new(TriageQueue::new(config))),
            clock,
        }
    }

    /// Returns the arrival clock used by `request_turn`.
    pub fn clock(&self) -> &dyn ArrivalClock {
        self.clock.as_ref()
    }

    /// Renders the waiting list while holding the read lock.
    ///
    /// `f` sees the live ordered view; no mutation can interleave with it.
    pub fn with_snapshot<R>(&self, f: impl FnOnce(crate::domain::Snapshot<'_>) -> R) -> R {
        let queue = self.queue.read();
        f(queue.snapshot())
    }
}

impl Default for TriageService {
    fn default() -> Self {
        Self::new(TriageConfig::default())
    }
}

impl std::fmt::Debug for TriageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriageService")
            .field("waiting", &self.queue.read().len())
            .finish_non_exhaustive()
    }
}

impl TriageApi for TriageService {
    fn admit(&self, entry: PatientEntry) -> Result<(), TriageError> {
        let patient_id = entry.id().to_string();
        let priority = entry.priority();

        let waiting = {
            let mut queue = self.queue.write();
            queue.admit(entry)?;
            queue.len()
        };

        debug!(%patient_id, %priority, waiting, "Entry admitted");
        Ok(())
    }

    fn request_turn(
        &self,
        patient_id: &str,
        name: &str,
        priority: &str,
    ) -> Result<PatientEntry, TriageError> {
        let entry = PatientEntry::from_raw(patient_id, name, priority, self.clock.next_arrival())?;
        self.admit(entry.clone())?;
        Ok(entry)
    }

    fn next(&self) -> Option<PatientEntry> {
        let (entry, waiting) = {
            let mut queue = self.queue.write();
            let entry = queue.next();
            (entry, queue.len())
        };

        match &entry {
            Some(entry) => debug!(
                patient_id = %entry.id(),
                priority = %entry.priority(),
                waiting,
                "Entry extracted"
            ),
            None => debug!("Next requested on empty queue"),
        }
        entry
    }

    fn cancel(&self, patient_id: &str) -> Option<PatientEntry> {
        let cancelled = self.queue.write().cancel(patient_id);
        debug!(patient_id, found = cancelled.is_some(), "Cancel requested");
        cancelled
    }

    fn snapshot(&self) -> QueueSnapshot {
        let queue = self.queue.read();
        queue.snapshot().collect()
    }

    fn get(&self, patient_id: &str) -> Option<PatientEntry> {
        self.queue.read().get(patient_id).cloned()
    }

    fn position(&self, patient_id: &str) -> Option<usize> {
        self.queue.read().position(patient_id)
    }

    fn status(&self) -> QueueStatus {
        let now = self.clock.now();
        self.queue.read().status(now)
    }

    fn len(&self) -> usize {
        self.queue.read().len()
    }

    fn is_empty(&self) -> bool {
        self.queue.read().is_empty()
    }
}
