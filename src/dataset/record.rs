//! In-memory record types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dataset::loader::LoadError;

/// One passenger entry exactly as decoded from the input file.
///
/// No schema is enforced: key casing and presence vary between records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Look up a key. Present-but-null keys return `Some(Value::Null)`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// How the input file was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// The whole file is one JSON array.
    JsonArray,
    /// One JSON object per line.
    JsonLines,
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::JsonArray => write!(f, "json-array"),
            SourceFormat::JsonLines => write!(f, "json-lines"),
        }
    }
}

/// The full, immutable sequence of records for the process lifetime.
///
/// Always holds at least one record.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<RawRecord>,
    format: SourceFormat,
    skipped: usize,
}

impl Dataset {
    /// Build a dataset, refusing an empty record list.
    ///
    /// `skipped` counts candidates that failed to decode. When nothing
    /// decoded but something was skipped the input is unparseable rather
    /// than merely empty.
    pub fn new(
        records: Vec<RawRecord>,
        format: SourceFormat,
        skipped: usize,
    ) -> Result<Self, LoadError> {
        if records.is_empty() {
            return Err(if skipped > 0 {
                LoadError::Unparseable { format, skipped }
            } else {
                LoadError::EmptyDataset
            });
        }

        Ok(Self {
            records,
            format,
            skipped,
        })
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RawRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    /// Number of lines or elements dropped during decoding.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a RawRecord;
    type IntoIter = std::slice::Iter<'a, RawRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_dataset_refused() {
        let err = Dataset::new(Vec::new(), SourceFormat::JsonArray, 0).unwrap_err();
        assert!(matches!(err, LoadError::EmptyDataset));
    }

    #[test]
    fn test_all_skipped_is_unparseable() {
        let err = Dataset::new(Vec::new(), SourceFormat::JsonLines, 3).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Unparseable { skipped: 3, format: SourceFormat::JsonLines }
        ));
    }

    #[test]
    fn test_null_key_is_present() {
        let r = record(json!({"Age": null}));
        assert!(r.contains_key("Age"));
        assert_eq!(r.get("Age"), Some(&Value::Null));
        assert_eq!(r.get("age"), None);
    }
}
