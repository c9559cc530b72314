//! # Triage Desk
//!
//! Line-oriented front desk for the triage queue.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, `TRIAGE_CONFIG` file, env overrides)
//! 2. Initialize logging (`RUST_LOG`, else the configured `log_level`)
//! 3. Create the shared queue and spawn the refresh tick
//! 4. Read operator commands until `quit`, end of input or Ctrl-C

use anyhow::{Context, Result};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use triage_desk::desk::report;
use triage_desk::{load_config, run_refresh, FrontDesk, Outcome};
use triage_queue::{TriageApi, TriageService};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = load_config().context("Failed to load desk configuration")?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log filter")?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(
        min_patient_id_len = config.queue.min_patient_id_len,
        refresh_interval_ms = config.refresh_interval_ms,
        "Starting triage desk"
    );

    let service = TriageService::new(config.queue.clone());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let refresh = (config.refresh_interval_ms > 0).then(|| {
        tokio::spawn(run_refresh(
            service.clone(),
            Duration::from_millis(config.refresh_interval_ms),
            shutdown_rx,
        ))
    });

    let mut desk = FrontDesk::new(service, config.timestamp_format.clone());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    println!("Triage desk ready. Type 'help' for commands.");

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("Shutdown signal received");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read console input")? else {
                    debug!("Console input closed");
                    break;
                };
                match desk.handle_line(&line) {
                    Ok(Some(Outcome::Continue(text))) => println!("{}", text),
                    Ok(Some(Outcome::Quit)) => break,
                    Ok(None) => {}
                    Err(err) => {
                        report(&err);
                        println!("Error: {}", err);
                    }
                }
            }
        }
    }

    // Graceful shutdown
    if desk.attending_count() > 0 {
        warn!(
            attending = desk.attending_count(),
            "Closing desk with patients still being attended"
        );
    }
    if shutdown_tx.send(true).is_err() {
        debug!("Refresh task was not running");
    }
    if let Some(handle) = refresh {
        handle.await.context("Refresh task failed")?;
    }

    info!(waiting = desk.service().len(), "Triage desk closed");
    Ok(())
}
