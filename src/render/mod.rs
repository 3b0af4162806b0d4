//! Response document rendering.

pub mod xml;

pub use xml::{serialize, SerializeError};
