//! # Triage Desk Library
//!
//! Front desk console for the triage queue. The `triage-desk` binary wires
//! these modules to stdin, the tracing subscriber and Ctrl-C.
//!
//! ## Modules
//!
//! - `config` - `DeskConfig`, file and environment loading
//! - `commands` - console line parsing
//! - `desk` - `FrontDesk` command execution and the refresh tick
//! - `errors` - `DeskError`

pub mod commands;
pub mod config;
pub mod desk;
pub mod errors;

pub use commands::Command;
pub use config::{load_config, load_config_from, DeskConfig};
pub use desk::{render_table, run_refresh, FrontDesk, Outcome};
pub use errors::DeskError;
