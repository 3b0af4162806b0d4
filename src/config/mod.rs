//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file (loader.rs)
//!     → command-line flags (cli.rs)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the service runs with no flags at all
//! - Explicit flags override the file, the file overrides defaults
//! - Validation separates syntactic (serde) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use loader::{load_config, ConfigError};
pub use schema::{
    DatasetConfig, ListenerConfig, LogFormat, ObservabilityConfig, ServiceConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
