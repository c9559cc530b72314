//! Value objects for the triage queue.
//!
//! Immutable types used for ordering, display rows and status reporting.

use super::entities::{PatientEntry, PatientStatus, PriorityClass};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::btree_map;
use std::fmt::Write as _;

/// Default format for arrival instants in display rows.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Returns true if chrono accepts every specifier in `format`.
pub fn is_valid_timestamp_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Formats an instant, using [`DEFAULT_TIMESTAMP_FORMAT`] when `format` is
/// not a valid strftime string.
pub fn format_instant(at: DateTime<Utc>, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", at.format(format)).is_err() {
        out.clear();
        out.push_str(&at.format(DEFAULT_TIMESTAMP_FORMAT).to_string());
    }
    out
}

/// Position of a pending entry in the ordered structure.
///
/// Implements `Ord` such that a lower rank comes first.
/// Ties are broken by arrival sequence, then by admission ticket.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct QueueKey {
    /// Priority rank (lower = served first).
    pub rank: u8,
    /// Arrival sequence (earlier = served first within a class).
    pub arrival: u64,
    /// Admission ticket, unique per queue.
    pub ticket: u64,
}

impl QueueKey {
    /// Creates a key for an entry admitted with the given ticket.
    pub fn for_entry(entry: &PatientEntry, ticket: u64) -> Self {
        Self {
            rank: entry.priority().rank(),
            arrival: entry.arrival().sequence,
            ticket,
        }
    }
}

impl Ord for QueueKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.arrival.cmp(&other.arrival))
            .then_with(|| self.ticket.cmp(&other.ticket))
    }
}

impl PartialOrd for QueueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Borrowed, ordered view over the pending entries of a queue.
///
/// Cloning the iterator restarts the enumeration from the same point in time.
/// The queue cannot be mutated while a `Snapshot` is alive.
#[derive(Clone, Debug)]
pub struct Snapshot<'a> {
    inner: btree_map::Values<'a, QueueKey, PatientEntry>,
}

impl<'a> Snapshot<'a> {
    pub(crate) fn new(inner: btree_map::Values<'a, QueueKey, PatientEntry>) -> Self {
        Self { inner }
    }
}

impl<'a> Iterator for Snapshot<'a> {
    type Item = &'a PatientEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Snapshot<'_> {}

/// Owned point-in-time copy of the pending entries, in service order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    entries: Vec<PatientEntry>,
}

impl QueueSnapshot {
    pub fn new(entries: Vec<PatientEntry>) -> Self {
        Self { entries }
    }

    /// Enumerates the entries in service order. May be called repeatedly.
    pub fn iter(&self) -> std::slice::Iter<'_, PatientEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the entries as display rows.
    pub fn rows(&self, timestamp_format: &str) -> Vec<QueueRow> {
        super::services::render_rows(self.iter(), timestamp_format)
    }

    /// Status summary of exactly these entries.
    pub fn status(&self, now: DateTime<Utc>) -> QueueStatus {
        QueueStatus::from_entries(self.iter(), now)
    }
}

impl<'a> IntoIterator for &'a QueueSnapshot {
    type Item = &'a PatientEntry;
    type IntoIter = std::slice::Iter<'a, PatientEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> FromIterator<&'a PatientEntry> for QueueSnapshot {
    fn from_iter<I: IntoIterator<Item = &'a PatientEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().cloned().collect())
    }
}

/// One display row of the waiting list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueRow {
    /// 1-based place in line.
    pub position: usize,
    pub patient_id: String,
    pub name: String,
    pub priority: PriorityClass,
    pub status: PatientStatus,
    /// Arrival instant, formatted.
    pub arrived_at: String,
}

impl QueueRow {
    pub fn from_entry(position: usize, entry: &PatientEntry, timestamp_format: &str) -> Self {
        Self {
            position,
            patient_id: entry.id().to_string(),
            name: entry.name().to_string(),
            priority: entry.priority(),
            status: entry.status(),
            arrived_at: format_instant(entry.arrival().recorded_at, timestamp_format),
        }
    }
}

/// Queue status summary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStatus {
    /// Number of pending entries.
    pub waiting: usize,
    /// Pending Critical entries.
    pub critical: usize,
    /// Pending Urgent entries.
    pub urgent: usize,
    /// Pending Regular entries.
    pub regular: usize,
    /// How long the longest-waiting entry has been waiting, in seconds.
    pub oldest_wait_secs: u64,
}

impl QueueStatus {
    /// Summarizes pending entries as of `now`.
    ///
    /// Arrivals stamped after `now` count as zero wait.
    pub fn from_entries<'a>(
        entries: impl IntoIterator<Item = &'a PatientEntry>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut status = Self::default();

        for entry in entries {
            status.waiting += 1;
            match entry.priority() {
                PriorityClass::Critical => status.critical += 1,
                PriorityClass::Urgent => status.urgent += 1,
                PriorityClass::Regular => status.regular += 1,
            }

            let waited = now
                .signed_duration_since(entry.arrival().recorded_at)
                .num_seconds()
                .max(0) as u64;
            status.oldest_wait_secs = status.oldest_wait_secs.max(waited);
        }

        status
    }

    /// Count for one class.
    pub fn count_for(&self, priority: PriorityClass) -> usize {
        match priority {
            PriorityClass::Critical => self.critical,
            PriorityClass::Urgent => self.urgent,
            PriorityClass::Regular => self.regular,
        }
    }
}
