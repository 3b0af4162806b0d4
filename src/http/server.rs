//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, metrics, panic recovery, timeout)
//! - Bind server to listener
//! - Stop accepting on shutdown and drain in-flight requests

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::TimeoutConfig;
use crate::dataset::Dataset;
use crate::http::handlers::{favicon, passengers};
use crate::http::middleware::{enforce_timeout, record_metrics};
use crate::http::request::UuidRequestId;
use crate::http::response::panic_response;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
}

/// HTTP server for the passenger dataset.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over an already loaded dataset.
    pub fn new(dataset: Arc<Dataset>, timeouts: &TimeoutConfig) -> Self {
        let state = AppState { dataset };
        let router = Router::new()
            .route("/favicon.ico", any(favicon))
            .route("/", any(passengers))
            .route("/{*path}", any(passengers))
            .with_state(state);

        Self {
            router: with_middleware(router, timeouts),
        }
    }

    /// The fully layered router, for driving without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Apply the middleware stack. Outermost layer first.
pub fn with_middleware(router: Router, timeouts: &TimeoutConfig) -> Router {
    let limit = Duration::from_secs(timeouts.request_secs);

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(record_metrics))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(middleware::from_fn_with_state(limit, enforce_timeout)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::routing::get;
    use metrics::{
        Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit,
    };
    use std::sync::Mutex;
    use tower::ServiceExt;

    use crate::dataset;

    fn server() -> HttpServer {
        let data = dataset::parse(
            "{\"Name\":\"Alice\",\"Survived\":1,\"Age\":22,\"Ticket\":\"T1\"}\n{\"name\":\"bob\",\"Survived\":0}\n",
        )
        .unwrap();
        HttpServer::new(Arc::new(data), &TimeoutConfig::default())
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_favicon_bypasses_pipeline() {
        let response = server()
            .router()
            .oneshot(Request::get("/favicon.ico").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(body_text(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_any_path_serves_xml() {
        for path in ["/", "/passengers", "/a/b/c?age=true", "/?survived=true"] {
            let response = server()
                .router()
                .oneshot(Request::get(path).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK, "path {path}");
            assert_eq!(response.headers()[header::CONTENT_TYPE], "application/xml");
            assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
            assert!(response.headers().contains_key("x-request-id"));
        }
    }

    #[tokio::test]
    async fn test_other_methods_handled_uniformly() {
        let response = server()
            .router()
            .oneshot(Request::post("/anything").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("<name>bob</name>"));
    }

    #[tokio::test]
    async fn test_incoming_request_id_propagated() {
        let response = server()
            .router()
            .oneshot(
                Request::get("/")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }

    async fn exploding() -> &'static str {
        panic!("pipeline exploded")
    }

    async fn stalled() -> &'static str {
        tokio::time::sleep(Duration::from_secs(10)).await;
        "too late"
    }

    /// Captures the `status` label of every request counter increment.
    #[derive(Default)]
    struct StatusRecorder {
        statuses: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder for StatusRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            if key.name() == "passenger_requests_total" {
                let mut statuses = self.statuses.lock().unwrap();
                statuses.extend(
                    key.labels()
                        .filter(|label| label.key() == "status")
                        .map(|label| label.value().to_string()),
                );
            }
            Counter::noop()
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }

    #[tokio::test]
    async fn test_panic_becomes_json_500() {
        let router = with_middleware(
            Router::new().route("/", get(exploding)),
            &TimeoutConfig::default(),
        );

        let response = router
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(body["message"], "pipeline exploded");
    }

    #[tokio::test]
    async fn test_timeout_becomes_json_500() {
        let timeouts = TimeoutConfig { request_secs: 1 };
        let router = with_middleware(Router::new().route("/", get(stalled)), &timeouts);

        let response = router
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert!(response.headers().contains_key("x-request-id"));

        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(body["message"], "Request timed out after 1s");
    }

    #[tokio::test]
    async fn test_every_response_counted() {
        let recorder = StatusRecorder::default();
        let statuses = recorder.statuses.clone();
        let _guard = metrics::set_default_local_recorder(&recorder);

        let router = with_middleware(
            Router::new()
                .route("/boom", get(exploding))
                .route("/ok", get(|| async { "ok" }))
                .route("/favicon.ico", any(favicon)),
            &TimeoutConfig::default(),
        );

        for path in ["/boom", "/ok", "/favicon.ico"] {
            router
                .clone()
                .oneshot(Request::get(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
        }

        assert_eq!(*statuses.lock().unwrap(), vec!["500", "200", "204"]);
    }
}
