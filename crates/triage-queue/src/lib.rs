//! # Triage Queue
//!
//! Priority-ordered waiting list of patients with arrival-order tie-breaking.
//!
//! ## Purpose
//!
//! Holds patients awaiting care, hands out the next patient to attend, and
//! lets patients withdraw. Everything around it (forms, logins, records) is
//! the host application's business.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | One pending claim per patient id | `domain/queue.rs` - `admit()` index check |
//! | Critical < Urgent < Regular, then arrival, then admission | `domain/value_objects.rs` - `QueueKey` |
//! | Ordered structure holds only Pending entries | `domain/queue.rs` - `next()` / `cancel()` remove from both indices |
//! | Patient id at least 8 characters | `domain/entities.rs` - `PatientId::parse()` |
//!
//! ## Entry Lifecycle
//!
//! ```text
//! [PENDING] ──next──→ [IN_PROGRESS] ──complete (host)──→ [COMPLETED]
//!     │
//!     └── cancel ──→ [CANCELLED]
//! ```
//!
//! | Stage | Method | Effect |
//! |-------|--------|--------|
//! | Admit | `queue.admit()` | Entry becomes reachable by `next`/`cancel` |
//! | Next | `queue.next()` | Removed from the queue, returned InProgress |
//! | Cancel | `queue.cancel()` | Removed from the queue, returned Cancelled |
//! | Complete | `entry.complete()` | Host marks an attended entry done |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      OUTER LAYER                                │
//! │  service.rs - TriageService (RwLock-shared queue)               │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MIDDLE LAYER                               │
//! │  ports/inbound.rs  - TriageApi trait                            │
//! │  ports/outbound.rs - ArrivalClock trait                         │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      INNER LAYER                                │
//! │  domain/entities.rs      - PatientEntry, PriorityClass, status  │
//! │  domain/queue.rs         - TriageQueue                          │
//! │  domain/services.rs      - ordering checks, rows, status line   │
//! │  domain/value_objects.rs - QueueKey, snapshots, rows, status    │
//! │  domain/errors.rs        - TriageError enum                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use config::{ConfigError, TriageConfig, MAX_EXPECTED_CAPACITY};
pub use domain::*;
pub use ports::*;
pub use service::TriageService;
