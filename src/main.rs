//! passenger-xml binary.
//!
//! Loads the passenger dataset, then serves it as XML until SIGINT/SIGTERM.
//! Startup failures are printed to stderr and exit with status 1 before
//! any socket is bound.

use std::process::ExitCode;

use clap::Parser;

use passenger_xml::config::Cli;
use passenger_xml::lifecycle::{self, signals, Shutdown};
use passenger_xml::observability::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    logging::init_logging(&config.observability);

    tracing::info!("passenger-xml v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        input = %config.dataset.input.display(),
        host = %config.listener.host,
        port = config.listener.port,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    if let Err(e) = signals::spawn_signal_listener(shutdown) {
        eprintln!("Failed to install signal handlers: {e}");
        return ExitCode::FAILURE;
    }

    match lifecycle::run(config, receiver).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
