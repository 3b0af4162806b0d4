//! Field resolution and projection.

use serde_json::Value;

use crate::dataset::RawRecord;

/// Ordered alias list for one logical field.
///
/// The first alias present in the record wins. When none is present the
/// sentinel is used, if any.
#[derive(Debug, Clone, Copy)]
pub struct FieldAliases {
    /// Output element name.
    pub field: &'static str,
    /// Source keys, checked in order. Case-sensitive.
    pub aliases: &'static [&'static str],
    /// Value substituted when every alias is absent.
    pub sentinel: Option<&'static str>,
}

impl FieldAliases {
    /// Return the value of the first present alias.
    pub fn resolve<'a>(&self, record: &'a RawRecord) -> Option<&'a Value> {
        self.aliases.iter().find_map(|key| record.get(key))
    }

    /// Resolve, falling back to the sentinel. `None` only for fields
    /// without a sentinel.
    pub fn resolve_or_sentinel(&self, record: &RawRecord) -> Option<Value> {
        self.resolve(record)
            .cloned()
            .or_else(|| self.sentinel.map(|s| Value::String(s.to_string())))
    }
}

pub const NAME: FieldAliases = FieldAliases {
    field: "name",
    aliases: &["Name", "name"],
    sentinel: Some("Unknown"),
};

pub const AGE: FieldAliases = FieldAliases {
    field: "age",
    aliases: &["Age", "age"],
    sentinel: Some("N/A"),
};

pub const TICKET: FieldAliases = FieldAliases {
    field: "ticket",
    aliases: &["Ticket", "ticket"],
    sentinel: Some("N/A"),
};

pub const SURVIVED: FieldAliases = FieldAliases {
    field: "survived",
    aliases: &["Survived", "survived"],
    sentinel: None,
};

/// A record with canonical field names and sentinel defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPassenger {
    pub name: Value,
    pub age: Value,
    pub ticket: Value,
    pub survived: Option<Value>,
}

/// Resolve every logical field of a raw record. Never fails.
pub fn normalize(record: &RawRecord) -> NormalizedPassenger {
    NormalizedPassenger {
        name: with_sentinel(&NAME, record),
        age: with_sentinel(&AGE, record),
        ticket: with_sentinel(&TICKET, record),
        survived: SURVIVED.resolve(record).cloned(),
    }
}

fn with_sentinel(aliases: &FieldAliases, record: &RawRecord) -> Value {
    aliases.resolve_or_sentinel(record).unwrap_or(Value::Null)
}

/// The subset of passenger fields written to the response.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub name: Value,
    pub age: Option<Value>,
    pub ticket: Value,
}

impl Projection {
    /// Fields in output order: name, age (if projected), ticket.
    pub fn fields(&self) -> Vec<(&'static str, &Value)> {
        let mut fields = Vec::with_capacity(3);
        fields.push((NAME.field, &self.name));
        if let Some(age) = &self.age {
            fields.push((AGE.field, age));
        }
        fields.push((TICKET.field, &self.ticket));
        fields
    }
}

/// Select the output fields. Survival status is never projected.
pub fn project(passenger: NormalizedPassenger, include_age: bool) -> Projection {
    Projection {
        name: passenger.name,
        age: include_age.then_some(passenger.age),
        ticket: passenger.ticket,
    }
}
