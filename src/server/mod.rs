//! Axum HTTP server for the clause pipeline and support chat.

pub mod error;
pub mod routes;

use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::error;

pub use error::{ApiError, ErrorBody};

use crate::llm::TextGenerator;
use crate::stages::PipelineConfig;

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Text generator; `None` when no API key is configured
    pub generator: Option<Arc<dyn TextGenerator>>,
    /// Stage settings for the clause pipeline
    pub pipeline: Arc<PipelineConfig>,
    /// Upper bound on one clause pipeline run
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, pipeline: PipelineConfig) -> Self {
        Self {
            generator,
            pipeline: Arc::new(pipeline),
            request_timeout: Duration::from_secs(120),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/generate-clauses",
            post(routes::generate_clauses).options(routes::preflight),
        )
        .route("/api/chat", post(routes::chat).options(routes::preflight))
        .route("/api/health", get(routes::health))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the router on an already-bound listener until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Turn a handler panic into a 500 JSON error
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unexpected error".to_string()
    };

    error!("Handler panicked: {}", detail);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(detail))).into_response()
}
