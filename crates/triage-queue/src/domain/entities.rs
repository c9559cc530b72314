//! Core domain entities for the triage queue.
//!
//! Defines the patient entry, its priority class and the entry state machine.

use super::errors::{EntryViolation, TransitionError, TriageError};
use crate::ports::outbound::{ArrivalClock, SystemArrivalClock};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Minimum number of characters in a patient identifier.
pub const MIN_PATIENT_ID_LEN: usize = 8;

/// Priority class of a patient.
///
/// Ordering goes through the explicit rank table in [`PriorityClass::rank`]:
/// a lower rank is served first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityClass {
    /// Life-threatening, served before everything else.
    Critical,
    /// Needs attention soon.
    Urgent,
    /// Everything else.
    Regular,
}

impl PriorityClass {
    /// All classes, in service order.
    pub const ALL: [PriorityClass; 3] = [Self::Critical, Self::Urgent, Self::Regular];

    /// Service rank (1 = first).
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 1,
            Self::Urgent => 2,
            Self::Regular => 3,
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Urgent => "Urgent",
            Self::Regular => "Regular",
        }
    }
}

impl Ord for PriorityClass {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for PriorityClass {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PriorityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PriorityClass {
    type Err = TriageError;

    /// Accepts the class name (any case), the front desk's Spanish labels,
    /// or the numeric rank.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "critical" | "critico" | "crítico" | "1" => Ok(Self::Critical),
            "urgent" | "urgente" | "2" => Ok(Self::Urgent),
            "regular" | "3" => Ok(Self::Regular),
            _ => Err(TriageError::InvalidEntry(EntryViolation::UnknownPriority(
                raw.to_string(),
            ))),
        }
    }
}

/// Entry status.
///
/// State machine:
/// ```text
/// [PENDING] ──next──→ [IN_PROGRESS] ──complete──→ [COMPLETED]
///     │
///     └── cancel ──→ [CANCELLED]
/// ```
///
/// `IN_PROGRESS` and `CANCELLED` are terminal as far as the queue is
/// concerned. `complete` is driven by the owning application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatientStatus {
    /// Waiting in the queue.
    #[default]
    Pending,
    /// Taken off the queue and being attended.
    InProgress,
    /// Attended; set by the owning application.
    Completed,
    /// Withdrawn before being attended.
    Cancelled,
}

impl PatientStatus {
    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Returns true for states that still hold a claim on a patient id.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validated patient identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PatientId(String);

impl PatientId {
    /// Parses an identifier with the default minimum length.
    ///
    /// # Errors
    /// `InvalidEntry` when shorter than [`MIN_PATIENT_ID_LEN`] characters.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TriageError> {
        Self::parse_with_min_len(raw, MIN_PATIENT_ID_LEN)
    }

    /// Parses an identifier against an explicit minimum length.
    pub fn parse_with_min_len(raw: impl Into<String>, min: usize) -> Result<Self, TriageError> {
        let raw = raw.into();
        let len = raw.chars().count();
        if len < min {
            return Err(TriageError::InvalidEntry(
                EntryViolation::PatientIdTooShort { id: raw, len, min },
            ));
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PatientId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PatientId {
    type Error = TriageError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl From<PatientId> for String {
    fn from(id: PatientId) -> Self {
        id.0
    }
}

/// Arrival stamp of an entry.
///
/// `sequence` is strictly monotonic per clock and is the only part used for
/// ordering. `recorded_at` is wall-clock time kept for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Arrival {
    /// Monotonic arrival counter.
    pub sequence: u64,
    /// Wall-clock time of arrival.
    pub recorded_at: DateTime<Utc>,
}

impl Arrival {
    /// Creates an arrival stamp.
    pub fn new(sequence: u64, recorded_at: DateTime<Utc>) -> Self {
        Self {
            sequence,
            recorded_at,
        }
    }
}

/// One patient's claim on the queue.
///
/// Fields are read-only outside the crate. Status changes happen through the
/// queue (`next`, `cancel`) or, for completion, through [`PatientEntry::complete`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientEntry {
    id: PatientId,
    name: String,
    priority: PriorityClass,
    status: PatientStatus,
    arrival: Arrival,
}

impl PatientEntry {
    /// Creates a pending entry stamped by the process-wide arrival clock.
    ///
    /// # Errors
    /// `InvalidEntry` when the patient id is too short.
    pub fn new(
        patient_id: impl Into<String>,
        name: impl Into<String>,
        priority: PriorityClass,
    ) -> Result<Self, TriageError> {
        let arrival = SystemArrivalClock.next_arrival();
        Self::with_arrival(patient_id, name, priority, arrival)
    }

    /// Creates a pending entry with an explicit arrival stamp.
    pub fn with_arrival(
        patient_id: impl Into<String>,
        name: impl Into<String>,
        priority: PriorityClass,
        arrival: Arrival,
    ) -> Result<Self, TriageError> {
        Ok(Self {
            id: PatientId::parse(patient_id)?,
            name: name.into(),
            priority,
            status: PatientStatus::Pending,
            arrival,
        })
    }

    /// Creates a pending entry from operator-entered text.
    ///
    /// # Errors
    /// `InvalidEntry` for a short id or an unknown priority class.
    pub fn from_raw(
        patient_id: &str,
        name: &str,
        priority: &str,
        arrival: Arrival,
    ) -> Result<Self, TriageError> {
        let id = PatientId::parse(patient_id)?;
        let priority = priority.parse()?;
        Ok(Self {
            id,
            name: name.to_string(),
            priority,
            status: PatientStatus::Pending,
            arrival,
        })
    }

    pub fn id(&self) -> &PatientId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> PriorityClass {
        self.priority
    }

    pub fn status(&self) -> PatientStatus {
        self.status
    }

    pub fn arrival(&self) -> Arrival {
        self.arrival
    }

    /// Returns true if the entry is waiting in a queue.
    pub fn is_pending(&self) -> bool {
        self.status == PatientStatus::Pending
    }

    /// Moves the entry to InProgress. Only the queue calls this, on extraction.
    pub(crate) fn begin_treatment(&mut self) -> Result<(), TransitionError> {
        self.transition(PatientStatus::Pending, PatientStatus::InProgress)
    }

    /// Moves the entry to Cancelled. Only the queue calls this.
    pub(crate) fn cancel(&mut self) -> Result<(), TransitionError> {
        self.transition(PatientStatus::Pending, PatientStatus::Cancelled)
    }

    /// Marks an attended entry as Completed.
    ///
    /// # Errors
    /// Returns `TransitionError` unless the entry is InProgress.
    pub fn complete(&mut self) -> Result<(), TransitionError> {
        self.transition(PatientStatus::InProgress, PatientStatus::Completed)
    }

    fn transition(
        &mut self,
        expected: PatientStatus,
        to: PatientStatus,
    ) -> Result<(), TransitionError> {
        if self.status != expected {
            return Err(TransitionError {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}
