//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the dataset before anything is bound
//! - Start the optional metrics exporter, then publish dataset gauges
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listener starts last (traffic only when ready)

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::ServiceConfig;
use crate::dataset::{self, Dataset, LoadError};
use crate::http::HttpServer;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Failed to start metrics exporter: {0}")]
    Metrics(String),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Load the dataset named by the configuration.
pub fn load_dataset(config: &ServiceConfig) -> Result<Arc<Dataset>, StartupError> {
    Ok(Arc::new(dataset::load(&config.dataset.input)?))
}

/// Bind the configured host and port.
pub async fn bind(config: &ServiceConfig) -> Result<TcpListener, StartupError> {
    let host = config.listener.host.as_str();
    let port = config.listener.port;

    TcpListener::bind((host, port))
        .await
        .map_err(|source| StartupError::Bind {
            address: format!("{host}:{port}"),
            source,
        })
}

/// Run the service: load, bind, serve until `shutdown` fires.
pub async fn run(
    config: ServiceConfig,
    shutdown: broadcast::Receiver<()>,
) -> Result<(), StartupError> {
    let dataset = load_dataset(&config)?;

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|e: std::net::AddrParseError| StartupError::Metrics(e.to_string()))?;
        metrics::init_metrics(addr).map_err(|e| StartupError::Metrics(e.to_string()))?;
    }

    // The exporter must be installed before this, or the write is lost.
    metrics::record_dataset_size(dataset.len());

    let listener = bind(&config).await?;

    tracing::info!(
        url = %config.listener.url(),
        records = dataset.len(),
        "Server running"
    );

    HttpServer::new(dataset, &config.timeouts)
        .run(listener, shutdown)
        .await
        .map_err(StartupError::Serve)
}
