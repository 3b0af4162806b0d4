//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::io::Write;
use std::net::SocketAddr;
use std::time::Duration;

use passenger_xml::config::ServiceConfig;
use passenger_xml::lifecycle::{self, Shutdown, StartupError};
use tempfile::NamedTempFile;
use tokio::task::JoinHandle;

pub const TITANIC_SAMPLE: &str = r#"[{"Name":"Alice","Survived":1,"Age":22,"Ticket":"T1"},{"Name":"Bob","Survived":0,"Age":30,"Ticket":"T2"}]"#;

/// Write dataset text to a temporary file that lives as long as the handle.
pub fn write_dataset(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Configuration bound to 127.0.0.1 on `port`, reading `input`.
pub fn config_for(addr: SocketAddr, input: &NamedTempFile) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.host = addr.ip().to_string();
    config.listener.port = addr.port();
    config.dataset.input = input.path().to_path_buf();
    config
}

/// A running service and the handles needed to stop it.
pub struct RunningService {
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), StartupError>>,
    pub base_url: String,
}

impl RunningService {
    pub async fn stop(self) -> Result<(), StartupError> {
        self.shutdown.trigger();
        self.handle.await.unwrap()
    }
}

/// Start the full service (load, bind, serve) and wait until it accepts.
pub async fn start_service(config: ServiceConfig) -> RunningService {
    let base_url = format!("http://{}:{}", config.listener.host, config.listener.port);
    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    let handle = tokio::spawn(lifecycle::run(config, receiver));

    let client = client();
    for _ in 0..50 {
        if client.get(format!("{base_url}/favicon.ico")).send().await.is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    RunningService {
        shutdown,
        handle,
        base_url,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
