//! Route handlers.

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::dataset::Dataset;
use crate::http::request::QueryFlags;
use crate::http::response::{self, ApiError};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::passenger::{filter, normalize, project, Projection};
use crate::render::{self, SerializeError};

/// Build the XML document for one set of query flags.
pub fn render_passengers(
    dataset: &Dataset,
    flags: QueryFlags,
) -> Result<(String, usize), SerializeError> {
    let projections: Vec<Projection> = filter(dataset, flags.predicate())
        .into_iter()
        .map(|record| project(normalize(record), flags.include_age))
        .collect();

    let document = render::serialize(&projections)?;
    Ok((document, projections.len()))
}

/// Serves the dataset on every path except `/favicon.ico`.
pub async fn passengers(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let flags = QueryFlags::parse(query.as_deref());
    let (document, count) = render_passengers(&state.dataset, flags)?;

    tracing::debug!(
        survived_only = flags.survived_only,
        include_age = flags.include_age,
        passengers = count,
        "Rendered passenger document"
    );

    metrics::record_records_served(count);
    Ok(response::xml(document))
}

pub async fn favicon() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset;

    const SAMPLE: &str = r#"[{"Name":"Alice","Survived":1,"Age":22,"Ticket":"T1"},{"Name":"Bob","Survived":0,"Age":30,"Ticket":"T2"}]"#;

    #[test]
    fn test_survivors_with_age() {
        let data = dataset::parse(SAMPLE).unwrap();
        let flags = QueryFlags { survived_only: true, include_age: true };

        let (xml, count) = render_passengers(&data, flags).unwrap();
        assert_eq!(count, 1);
        assert_eq!(xml.matches("<passenger>").count(), 1);
        assert!(xml.contains("<name>Alice</name>"));
        assert!(xml.contains("<age>22</age>"));
        assert!(xml.contains("<ticket>T1</ticket>"));
        assert!(!xml.contains("Bob"));
    }

    #[test]
    fn test_everyone_without_age() {
        let data = dataset::parse(SAMPLE).unwrap();

        let (xml, count) = render_passengers(&data, QueryFlags::default()).unwrap();
        assert_eq!(count, 2);
        assert_eq!(xml.matches("<passenger>").count(), 2);
        assert!(!xml.contains("<age>"));
        assert!(!xml.contains("<survived"));
    }

    #[test]
    fn test_no_survivors_yields_empty_root() {
        let data = dataset::parse(r#"{"name":"Carl","Survived":0}"#).unwrap();
        let flags = QueryFlags { survived_only: true, include_age: false };

        let (xml, count) = render_passengers(&data, flags).unwrap();
        assert_eq!(count, 0);
        assert!(xml.contains("passengers"));
        assert!(!xml.contains("<passenger>"));
    }
}
