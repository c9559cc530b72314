//! Domain services for the triage queue.
//!
//! Pure functions over entries, rows and status summaries.

use super::entities::PatientEntry;
use super::value_objects::{QueueRow, QueueStatus};
use std::cmp::Ordering;

/// Compares two entries in service order: rank first, then arrival sequence.
///
/// Entries with equal rank and arrival compare equal here; the queue breaks
/// that tie by admission order.
pub fn service_order(a: &PatientEntry, b: &PatientEntry) -> Ordering {
    a.priority()
        .cmp(&b.priority())
        .then_with(|| a.arrival().sequence.cmp(&b.arrival().sequence))
}

/// Returns true if the entries are in non-decreasing service order.
pub fn is_service_ordered<'a>(entries: impl IntoIterator<Item = &'a PatientEntry>) -> bool {
    let mut previous: Option<&PatientEntry> = None;
    for entry in entries {
        if let Some(prev) = previous {
            if service_order(prev, entry) == Ordering::Greater {
                return false;
            }
        }
        previous = Some(entry);
    }
    true
}

/// Renders entries as numbered display rows.
pub fn render_rows<'a>(
    entries: impl IntoIterator<Item = &'a PatientEntry>,
    timestamp_format: &str,
) -> Vec<QueueRow> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| QueueRow::from_entry(i + 1, entry, timestamp_format))
        .collect()
}

/// One-line summary of a queue status for status bars.
pub fn status_line(status: &QueueStatus) -> String {
    format!(
        "Patients waiting: {} (critical {}, urgent {}, regular {}) | longest wait {}s",
        status.waiting, status.critical, status.urgent, status.regular, status.oldest_wait_secs
    )
}
