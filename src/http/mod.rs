//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, graceful shutdown)
//!     → middleware.rs (request metrics, handler timeout)
//!     → request.rs (request ID, query flags)
//!     → handlers.rs (filter → normalize → project → serialize)
//!     → response.rs (XML success body, JSON error body)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{QueryFlags, UuidRequestId, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{AppState, HttpServer};
