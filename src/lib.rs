//! Passenger dataset XML service.
//!
//! # Architecture Overview
//!
//! ```text
//!     startup                         per request
//!     ───────                         ───────────
//!     input file                      GET /any/path?survived=true&age=true
//!         │                               │
//!         ▼                               ▼
//!     ┌──────────┐   Arc<Dataset>    ┌──────────┐    ┌───────────┐    ┌──────────┐
//!     │ dataset  │──────────────────▶│  http    │───▶│ passenger │───▶│  render  │
//!     │ loader   │                   │ handler  │    │ filter +  │    │   xml    │
//!     └──────────┘                   └──────────┘    │ normalize │    └──────────┘
//!                                                    └───────────┘
//!
//!     Cross-cutting: config, observability, lifecycle
//! ```
//!
//! The dataset is loaded once before the listener is bound and shared
//! read-only with every request.

// Core pipeline
pub mod dataset;
pub mod passenger;
pub mod render;

// Service surface
pub mod config;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use dataset::{Dataset, LoadError, RawRecord};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
