//! Triage queue error types.
//!
//! Every error here is recoverable by the caller. An empty queue on `next`
//! and an unknown id on `cancel` are not errors and have no variant.

use super::entities::{PatientId, PatientStatus};
use thiserror::Error;

/// Triage queue error type.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TriageError {
    /// The entry is malformed or not admissible.
    #[error("Invalid entry: {0}")]
    InvalidEntry(EntryViolation),

    /// The patient already has a pending claim on the queue.
    #[error("Duplicate entry: patient {0} is already waiting")]
    DuplicateEntry(PatientId),
}

/// Why an entry was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EntryViolation {
    #[error("patient id '{id}' has {len} characters, minimum is {min}")]
    PatientIdTooShort { id: String, len: usize, min: usize },

    #[error("unknown priority class '{0}'")]
    UnknownPriority(String),

    #[error("entry for {id} is {status}, only pending entries can be admitted")]
    NotPending { id: PatientId, status: PatientStatus },
}

/// Rejected entry status change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("cannot move entry from {from} to {to}")]
pub struct TransitionError {
    pub from: PatientStatus,
    pub to: PatientStatus,
}
