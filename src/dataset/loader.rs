//! Input file decoding.
//!
//! # Responsibilities
//! - Read the input file as UTF-8 text
//! - Decide between array mode and line mode with a single parse attempt
//! - Decode records, skipping (and logging) anything undecodable
//!
//! # Design Decisions
//! - The whole file is parsed once; only a top-level JSON array
//!   selects array mode. Anything else, including a lone object on one
//!   line, is handled in line mode.
//! - Non-object array elements and non-object lines are skipped like
//!   undecodable lines

use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::dataset::record::{Dataset, RawRecord, SourceFormat};

/// Fatal errors raised while loading the dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot find input file: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read input file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Input is neither a JSON array nor JSON lines ({skipped} undecodable {format} entries)")]
    Unparseable { format: SourceFormat, skipped: usize },

    #[error("Input contains no passenger records")]
    EmptyDataset,
}

/// Result of decoding one format: the records kept and the count dropped.
struct Decoded {
    records: Vec<RawRecord>,
    skipped: usize,
}

/// Load and decode the dataset at `path`.
pub fn load(path: &Path) -> Result<Dataset, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    tracing::info!(
        path = %path.display(),
        bytes = content.len(),
        "Input file read"
    );

    let dataset = parse(&content)?;

    tracing::info!(
        path = %path.display(),
        format = %dataset.format(),
        records = dataset.len(),
        skipped = dataset.skipped(),
        "Dataset loaded"
    );

    Ok(dataset)
}

/// Decode dataset text that has already been read into memory.
pub fn parse(content: &str) -> Result<Dataset, LoadError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let (format, decoded) = match serde_json::from_str::<Value>(content) {
        Ok(Value::Array(items)) => (SourceFormat::JsonArray, decode_array(items)),
        _ => (SourceFormat::JsonLines, decode_lines(content)),
    };

    Dataset::new(decoded.records, format, decoded.skipped)
}

fn decode_array(items: Vec<Value>) -> Decoded {
    let mut records = Vec::with_capacity(items.len());
    let mut skipped = 0;

    for (index, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(fields) => records.push(RawRecord::new(fields)),
            other => {
                skipped += 1;
                tracing::warn!(
                    index,
                    kind = value_kind(&other),
                    "Skipping non-object array element"
                );
            }
        }
    }

    Decoded { records, skipped }
}

fn decode_lines(content: &str) -> Decoded {
    let mut records = Vec::new();
    let mut skipped = 0;

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(fields)) => records.push(RawRecord::new(fields)),
            Ok(other) => {
                skipped += 1;
                tracing::warn!(
                    line = index + 1,
                    kind = value_kind(&other),
                    "Skipping non-object line"
                );
            }
            Err(e) => {
                skipped += 1;
                tracing::warn!(line = index + 1, error = %e, "Skipping undecodable line");
            }
        }
    }

    Decoded { records, skipped }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
