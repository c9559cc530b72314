//! Ports layer for the triage queue.
//!
//! Defines the hexagonal architecture port traits:
//! - Inbound (Driving) ports: API exposed to front desk sessions
//! - Outbound (Driven) ports: Dependencies on the outside world

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
