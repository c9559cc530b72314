//! # Inbound Port - TriageApi
//!
//! Primary driving port exposing the triage queue to front desk sessions.
//!
//! | Method | Desk action |
//! |--------|-------------|
//! | `admit` / `request_turn` | "request turn" |
//! | `next` | "attend next patient" |
//! | `cancel` | "cancel my turn" |
//! | `snapshot` | every display refresh |

use crate::domain::{PatientEntry, QueueSnapshot, QueueStatus, TriageError};

/// Primary API for the triage queue.
///
/// Implementations must serialize `admit`, `next` and `cancel` against each
/// other and against `snapshot`.
///
/// # Example
///
/// ```rust,ignore
/// use triage_queue::ports::TriageApi;
///
/// fn attend(desk: &impl TriageApi) {
///     match desk.next() {
///         Some(entry) => println!("Attending {}", entry.name()),
///         None => println!("Nobody is waiting"),
///     }
/// }
/// ```
pub trait TriageApi: Send + Sync {
    /// Admits a pending entry.
    ///
    /// # Errors
    /// - `InvalidEntry`: entry not Pending or id too short
    /// - `DuplicateEntry`: patient already waiting
    fn admit(&self, entry: PatientEntry) -> Result<(), TriageError>;

    /// Builds an entry from operator text, stamps it and admits it.
    ///
    /// Returns a copy of the admitted entry.
    fn request_turn(
        &self,
        patient_id: &str,
        name: &str,
        priority: &str,
    ) -> Result<PatientEntry, TriageError>;

    /// Extracts the next entry to attend, already InProgress.
    fn next(&self) -> Option<PatientEntry>;

    /// Cancels a pending entry, returning it as Cancelled.
    fn cancel(&self, patient_id: &str) -> Option<PatientEntry>;

    /// Point-in-time copy of the pending entries in service order.
    fn snapshot(&self) -> QueueSnapshot;

    /// Gets a copy of a pending entry.
    fn get(&self, patient_id: &str) -> Option<PatientEntry>;

    /// 1-based place in line of a pending patient.
    fn position(&self, patient_id: &str) -> Option<usize>;

    /// Gets the current queue status.
    fn status(&self) -> QueueStatus;

    /// Number of pending entries.
    fn len(&self) -> usize;

    /// Returns true if nobody is waiting.
    fn is_empty(&self) -> bool;
}
