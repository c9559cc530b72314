//! # Domain Layer - Triage Queue
//!
//! Pure queue logic. Nothing in this layer logs or performs I/O.
//!
//! ## Components
//!
//! - `entities`: PatientEntry, PriorityClass, PatientStatus, PatientId, Arrival
//! - `queue`: TriageQueue with ordered structure and id index
//! - `services`: Ordering checks, row rendering, status line
//! - `value_objects`: QueueKey, Snapshot, QueueSnapshot, QueueRow, QueueStatus
//! - `errors`: TriageError enumeration

pub mod entities;
pub mod errors;
pub mod queue;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use queue::*;
pub use services::*;
pub use value_objects::*;
