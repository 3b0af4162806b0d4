//! Command-line flags.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::ServiceConfig;
use crate::config::validation::validate_config;

#[derive(Debug, Parser)]
#[command(name = "passenger-xml")]
#[command(version, about = "Serve a passenger dataset as XML over HTTP", long_about = None)]
pub struct Cli {
    /// Path to the input file (JSON array or JSON lines) [default: titanic.json]
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Address to listen on [default: localhost]
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on [default: 3000]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Optional TOML configuration file; flags take precedence over it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Merge defaults, the optional config file and explicit flags.
    pub fn into_config(self) -> Result<ServiceConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServiceConfig::default(),
        };

        if let Some(input) = self.input {
            config.dataset.input = input;
        }
        if let Some(host) = self.host {
            config.listener.host = host;
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}
