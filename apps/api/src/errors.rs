use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::generator::ProposalError;
use crate::llm_client::GenerationError;
use crate::models::proposal::ValidationError;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl From<ProposalError> for AppError {
    fn from(err: ProposalError) -> Self {
        match err {
            ProposalError::Invalid(e) => AppError::Validation(e),
            ProposalError::GenerationFailed(e) => AppError::Generation(e),
            ProposalError::Render(e) => AppError::Render(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string()),
            AppError::Generation(GenerationError::Timeout(_)) => {
                tracing::error!("Generation timed out: {self}");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "GENERATION_TIMEOUT",
                    "The generation backend did not answer in time. Please try again.".to_string(),
                )
            }
            AppError::Generation(e) => {
                tracing::error!("Generation error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_ERROR",
                    format!("Error generating proposal: {e}. Please check that GOOGLE_API_KEY is set correctly."),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "RENDER_ERROR", e.to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
