use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Serialize;

use super::{ApiError, AppState};
use crate::llm::{GenerationError, TextGenerator, Unconfigured};
use crate::models::{ChatReply, ChatRequest, ClauseRequest, PipelineResult};
use crate::stages::{PipelineError, process};
use crate::support;

static UNCONFIGURED: Unconfigured = Unconfigured;

/// POST /api/generate-clauses
/// Rewrite clauses and review them for the given state
pub async fn generate_clauses(
    State(state): State<AppState>,
    payload: Result<Json<ClauseRequest>, JsonRejection>,
) -> Result<Json<PipelineResult>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let generator: &dyn TextGenerator = state.generator.as_deref().unwrap_or(&UNCONFIGURED);

    let result = tokio::time::timeout(
        state.request_timeout,
        process(generator, &request, &state.pipeline),
    )
    .await
    .map_err(|_| PipelineError::Generation(GenerationError::Timeout))??;

    Ok(Json(result))
}

/// POST /api/chat
/// Support chat; degrades to a static reply instead of failing
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let reply = support::respond(state.generator.as_deref(), &request.messages).await;
    Ok(Json(reply))
}

/// OPTIONS preflight for the POST endpoints
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub generator: bool,
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        generator: state.generator.is_some(),
    })
}
