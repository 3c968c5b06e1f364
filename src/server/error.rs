use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::stages::PipelineError;

/// Error returned from HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("{0}")]
    BadRequest(String),
}

/// JSON error body; `normalizedState` is only set for invalid states
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_state: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            normalized_state: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        let (status, body) = match self {
            ApiError::Pipeline(PipelineError::InvalidState { normalized, .. }) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: message,
                    normalized_state: Some(normalized),
                },
            ),
            ApiError::Pipeline(e) if e.is_validation() => {
                (StatusCode::BAD_REQUEST, ErrorBody::new(message))
            }
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, ErrorBody::new(message)),
            ApiError::Pipeline(_) => {
                error!("Clause pipeline failed: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(message))
            }
        };

        (status, Json(body)).into_response()
    }
}
