//! Request middleware.
//!
//! # Responsibilities
//! - Record request count and latency for every response, including
//!   panics turned into 500s by the layer below
//! - Bound handler time; an expired request gets the JSON error body

use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::response::ApiError;
use crate::observability::metrics;

pub async fn record_metrics(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let response = next.run(request).await;
    metrics::record_request(response.status().as_u16(), start_time);
    response
}

pub async fn enforce_timeout(
    State(limit): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(limit_secs = limit.as_secs(), "Request timed out");
            ApiError::Timeout(limit).into_response()
        }
    }
}
