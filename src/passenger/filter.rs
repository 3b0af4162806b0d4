//! Record filtering.
//!
//! The survival predicate reads only the `Survived` key and accepts:
//! - boolean `true`
//! - a JSON number equal to 1 (`1`, `1.0`)
//! - a string whose trimmed text parses as a number equal to 1 (`"1"`, `" 1.0 "`)
//!
//! Everything else, including a missing key, `null` and `"true"`, does not match.

use serde_json::Value;

use crate::dataset::RawRecord;

const SURVIVED_KEY: &str = "Survived";

/// Record selection predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Predicate {
    /// Every record matches.
    #[default]
    All,
    /// Only records whose `Survived` value coerces to 1.
    Survived,
}

impl Predicate {
    pub fn matches(&self, record: &RawRecord) -> bool {
        match self {
            Predicate::All => true,
            Predicate::Survived => record.get(SURVIVED_KEY).is_some_and(is_survivor),
        }
    }
}

/// Coerce a survival value to a boolean.
pub fn is_survivor(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => s.trim().parse::<f64>().is_ok_and(|n| n == 1.0),
        _ => false,
    }
}

/// Keep the records matching `predicate`, in source order.
pub fn filter<'a, I>(records: I, predicate: Predicate) -> Vec<&'a RawRecord>
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    records
        .into_iter()
        .filter(|record| predicate.matches(record))
        .collect()
}
