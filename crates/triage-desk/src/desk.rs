//! # Front Desk
//!
//! Executes operator commands against a shared [`TriageService`] and keeps
//! track of the patients this desk is currently attending.
//!
//! ```text
//! admit ──→ [queue] ──next──→ [attending] ──complete──→ done
//!              │
//!              └── cancel ──→ withdrawn
//! ```

use std::collections::HashMap;
use std::fmt::Write as _;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};
use triage_queue::{status_line, ArrivalClock, PatientEntry, QueueRow, TriageApi, TriageService};

use crate::commands::{Command, HELP};
use crate::errors::DeskError;

/// Result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to show the operator; the desk keeps running.
    Continue(String),
    /// The operator closed the desk.
    Quit,
}

/// One front desk session.
pub struct FrontDesk {
    service: TriageService,
    /// Entries taken off the queue and not yet completed, by patient id.
    attending: HashMap<String, PatientEntry>,
    timestamp_format: String,
}

impl FrontDesk {
    pub fn new(service: TriageService, timestamp_format: impl Into<String>) -> Self {
        Self {
            service,
            attending: HashMap::new(),
            timestamp_format: timestamp_format.into(),
        }
    }

    pub fn service(&self) -> &TriageService {
        &self.service
    }

    /// Number of patients currently being attended at this desk.
    pub fn attending_count(&self) -> usize {
        self.attending.len()
    }

    /// Parses and executes one console line.
    ///
    /// Returns `Ok(None)` for blank and comment lines.
    pub fn handle_line(&mut self, line: &str) -> Result<Option<Outcome>, DeskError> {
        match Command::parse(line)? {
            Some(command) => self.execute(command).map(Some),
            None => Ok(None),
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome, DeskError> {
        let message = match command {
            Command::Admit {
                patient_id,
                priority,
                name,
            } => {
                if self.attending.contains_key(&patient_id) {
                    return Err(DeskError::StillAttending(patient_id));
                }
                let entry = self.service.request_turn(&patient_id, &name, &priority)?;
                let position = self.service.position(&patient_id).unwrap_or_default();
                info!(%patient_id, priority = %entry.priority(), position, "Turn requested");
                format!(
                    "Admitted {} ({}) as {}, position {} of {}",
                    entry.id(),
                    entry.name(),
                    entry.priority(),
                    position,
                    self.service.len()
                )
            }
            Command::Next => match self.service.next() {
                Some(entry) => {
                    info!(patient_id = %entry.id(), priority = %entry.priority(), "Attending patient");
                    let mut message = format!(
                        "Now attending {} {} ({})",
                        entry.id(),
                        entry.name(),
                        entry.priority()
                    );
                    // Admitted again elsewhere while still being attended here
                    if let Some(mut earlier) = self.attending.insert(entry.id().to_string(), entry) {
                        earlier.complete()?;
                        warn!(
                            patient_id = %earlier.id(),
                            arrival = earlier.arrival().sequence,
                            "Earlier visit still open, marked completed"
                        );
                        message.push_str("; earlier visit marked completed");
                    }
                    message
                }
                None => "No patients waiting".to_string(),
            },
            Command::Complete { patient_id } => {
                let mut entry = self
                    .attending
                    .remove(&patient_id)
                    .ok_or_else(|| DeskError::NotAttending(patient_id.clone()))?;
                entry.complete()?;
                info!(%patient_id, "Patient attended");
                format!("Completed {} {}", entry.id(), entry.name())
            }
            Command::Cancel { patient_id } => match self.service.cancel(&patient_id) {
                Some(entry) => {
                    info!(%patient_id, "Turn cancelled");
                    format!("Cancelled turn for {} {}", entry.id(), entry.name())
                }
                None => format!("No pending turn for {}", patient_id),
            },
            Command::List => {
                let rows = self.service.snapshot().rows(&self.timestamp_format);
                if rows.is_empty() {
                    "No patients waiting".to_string()
                } else {
                    render_table(&rows)
                }
            }
            Command::Status => format!(
                "{} | attending {}",
                status_line(&self.service.status()),
                self.attending.len()
            ),
            Command::Export => {
                let rows = self.service.snapshot().rows(&self.timestamp_format);
                serde_json::to_string_pretty(&rows).map_err(DeskError::Export)?
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };

        Ok(Outcome::Continue(message))
    }
}

/// Renders rows as a fixed-width table with a header line.
pub fn render_table(rows: &[QueueRow]) -> String {
    let mut out = format!(
        "{:>3}  {:<12} {:<24} {:<9} {:<12} {}",
        "#", "ID", "NAME", "PRIORITY", "STATUS", "ARRIVED"
    );
    for row in rows {
        // Writing to a String cannot fail
        let _ = write!(
            out,
            "\n{:>3}  {:<12} {:<24} {:<9} {:<12} {}",
            row.position,
            row.patient_id,
            row.name,
            row.priority.label(),
            row.status.label(),
            row.arrived_at
        );
    }
    out
}

/// Background refresh tick.
///
/// Every `period` takes a snapshot of the queue and logs the status line,
/// until `shutdown` flips to true or its sender is dropped.
pub async fn run_refresh(service: TriageService, period: Duration, mut shutdown: watch::Receiver<bool>) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // One read for both the status line and the head of the line
                let snapshot = service.snapshot();
                let status = snapshot.status(service.clock().now());
                info!("{}", status_line(&status));
                if let Some(first) = snapshot.iter().next() {
                    debug!(patient_id = %first.id(), priority = %first.priority(), "Next in line");
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    debug!("Refresh task stopping");
                    break;
                }
            }
        }
    }
}

/// Logs a command failure the way the console loop reports it.
pub fn report(err: &DeskError) {
    match err {
        DeskError::UnknownCommand(_) | DeskError::MissingArgument { .. } => {
            debug!(error = %err, "Rejected console input")
        }
        _ => warn!(error = %err, "Command failed"),
    }
}
