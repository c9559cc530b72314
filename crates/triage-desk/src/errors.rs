//! Error types for the front desk.

use std::path::PathBuf;
use thiserror::Error;
use triage_queue::{TransitionError, TriageError};

/// All errors the desk reports to the operator or to `main`.
#[derive(Debug, Error)]
pub enum DeskError {
    /// Configuration value out of range or malformed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for `DeskConfig`
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[source] serde_json::Error),

    #[error("Unknown command '{0}' (type 'help')")]
    UnknownCommand(String),

    #[error("'{command}' needs a {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// Queue rejected the request
    #[error(transparent)]
    Triage(#[from] TriageError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// `complete` for a patient this desk is not attending
    #[error("Patient {0} is not being attended at this desk")]
    NotAttending(String),

    /// `admit` for a patient this desk is still attending
    #[error("Patient {0} is still being attended at this desk; complete the visit first")]
    StillAttending(String),

    #[error("Failed to export waiting list: {0}")]
    Export(#[source] serde_json::Error),
}
