//! Dataset ingestion subsystem.
//!
//! # Data Flow
//! ```text
//! input file (UTF-8)
//!     → loader.rs (whole file as one JSON array?)
//!         yes → array mode: each object element is a record
//!         no  → line mode: each non-blank line decoded on its own
//!     → record.rs (RawRecord, Dataset)
//!     → Arc<Dataset> shared with the HTTP layer
//! ```
//!
//! # Design Decisions
//! - The two formats are mutually exclusive; one whole-file parse picks the mode
//! - Undecodable lines are skipped with a warning, never fatal on their own
//! - A dataset with zero records is refused at construction

pub mod loader;
pub mod record;

pub use loader::{load, parse, LoadError};
pub use record::{Dataset, RawRecord, SourceFormat};
