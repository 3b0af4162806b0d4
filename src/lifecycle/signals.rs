//! OS signal handling.
//!
//! SIGINT (Ctrl+C) and, on unix, SIGTERM both request a graceful shutdown.
//! Handlers are registered before the listener task is spawned, so a
//! signal that arrives during startup is not lost.

use std::io;

use tokio::signal;
use tokio::task::JoinHandle;

use crate::lifecycle::Shutdown;

/// Register signal handlers, then spawn a task that triggers `shutdown`
/// on the first signal.
///
/// Must be called from within a Tokio runtime.
#[cfg(unix)]
pub fn spawn_signal_listener(shutdown: Shutdown) -> io::Result<JoinHandle<()>> {
    use signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    Ok(tokio::spawn(async move {
        tokio::select! {
            _ = interrupt.recv() => tracing::info!("SIGINT received"),
            _ = terminate.recv() => tracing::info!("SIGTERM received"),
        }
        shutdown.trigger();
    }))
}

#[cfg(not(unix))]
pub fn spawn_signal_listener(shutdown: Shutdown) -> io::Result<JoinHandle<()>> {
    Ok(tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Ctrl+C received");
                shutdown.trigger();
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl+C"),
        }
    }))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::process::Command;
    use std::time::Duration;

    #[tokio::test]
    async fn test_terminate_triggers_shutdown() {
        let shutdown = Shutdown::new();
        let mut receiver = shutdown.subscribe();
        let listener = spawn_signal_listener(shutdown).unwrap();

        let status = Command::new("kill")
            .args(["-TERM", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        tokio::time::timeout(Duration::from_secs(5), receiver.recv())
            .await
            .expect("shutdown not triggered")
            .unwrap();
        listener.await.unwrap();
    }
}
