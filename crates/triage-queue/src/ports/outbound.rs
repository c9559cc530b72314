//! Outbound (Driven) ports for the triage queue.
//!
//! These traits define what the queue needs from its environment.

use crate::domain::Arrival;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of arrival stamps.
///
/// Abstracted to allow testing with deterministic time.
pub trait ArrivalClock: Send + Sync {
    /// Returns the current wall-clock time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns a new arrival stamp. Sequences must be strictly increasing.
    fn next_arrival(&self) -> Arrival;
}

/// Process-wide arrival counter shared by every `SystemArrivalClock`.
static ARRIVAL_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Default system clock.
///
/// All instances draw from one process-wide counter, so entries built by
/// different sessions still order consistently.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemArrivalClock;

impl ArrivalClock for SystemArrivalClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn next_arrival(&self) -> Arrival {
        let sequence = ARRIVAL_SEQUENCE.fetch_add(1, Ordering::SeqCst) + 1;
        Arrival::new(sequence, self.now())
    }
}

/// Mock clock for testing.
#[cfg(test)]
pub struct MockArrivalClock {
    sequence: AtomicU64,
    time: parking_lot::Mutex<DateTime<Utc>>,
}

#[cfg(test)]
impl MockArrivalClock {
    pub fn new(initial: DateTime<Utc>) -> Self {
        Self {
            sequence: AtomicU64::new(0),
            time: parking_lot::Mutex::new(initial),
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        let mut time = self.time.lock();
        *time += chrono::Duration::seconds(secs);
    }
}

#[cfg(test)]
impl ArrivalClock for MockArrivalClock {
    fn now(&self) -> DateTime<Utc> {
        *self.time.lock()
    }

    fn next_arrival(&self) -> Arrival {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        Arrival::new(sequence, self.now())
    }
}
