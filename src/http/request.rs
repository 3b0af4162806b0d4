//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4)
//! - Parse the `survived` and `age` query flags
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Query parsing never fails; a flag is on only for the literal `true`

use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::passenger::Predicate;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Request ID generator backed by UUID v4.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Per-request output switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryFlags {
    /// Only passengers whose survival value coerces to 1.
    pub survived_only: bool,
    /// Include the `age` element.
    pub include_age: bool,
}

impl QueryFlags {
    /// Parse a raw query string. The first occurrence of a key wins.
    pub fn parse(query: Option<&str>) -> Self {
        let mut survived = None;
        let mut age = None;

        for (key, value) in url::form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            match &*key {
                "survived" if survived.is_none() => survived = Some(value == "true"),
                "age" if age.is_none() => age = Some(value == "true"),
                _ => {}
            }
        }

        Self {
            survived_only: survived.unwrap_or(false),
            include_age: age.unwrap_or(false),
        }
    }

    pub fn predicate(&self) -> Predicate {
        if self.survived_only {
            Predicate::Survived
        } else {
            Predicate::All
        }
    }
}
