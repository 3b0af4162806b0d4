//! Passenger view over raw records.
//!
//! # Data Flow
//! ```text
//! &[RawRecord]
//!     → filter.rs (order-preserving predicate, borrows records)
//!     → normalize.rs (alias resolution + sentinels → NormalizedPassenger)
//!     → normalize.rs (projection → Projection, never exposes survival)
//! ```
//!
//! # Design Decisions
//! - Each logical field has a fixed alias table, checked in order
//! - Presence is a key-exists check, so `0` and `false` count as values
//! - Everything here is pure and allocation is per request

pub mod filter;
pub mod normalize;

pub use filter::{filter, is_survivor, Predicate};
pub use normalize::{normalize, project, FieldAliases, NormalizedPassenger, Projection};
