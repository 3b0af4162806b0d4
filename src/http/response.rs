//! Response construction.
//!
//! # Responsibilities
//! - Wrap rendered XML with status and headers
//! - Map request failures (errors and panics) to a 500 JSON body
//!
//! # Design Decisions
//! - Every pipeline response carries `Access-Control-Allow-Origin: *`
//! - Failures are isolated to the request; the server keeps running

use std::any::Any;
use std::time::Duration;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::render::SerializeError;

pub const XML_CONTENT_TYPE: &str = "application/xml";

/// Body of every 500 response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// Failure while building a response for one request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request handling failed");
        internal_error(self.to_string())
    }
}

/// 200 response carrying an XML document.
pub fn xml(body: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XML_CONTENT_TYPE),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        body,
    )
        .into_response()
}

/// 500 response with a JSON `{error, message}` body.
pub fn internal_error(message: impl Into<String>) -> Response {
    let body = ErrorBody {
        error: "Internal Server Error",
        message: message.into(),
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(body),
    )
        .into_response()
}

/// Panic handler for `CatchPanicLayer`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "request handler panicked".to_string()
    };

    tracing::error!(message = %message, "Request handler panicked");
    internal_error(message)
}
