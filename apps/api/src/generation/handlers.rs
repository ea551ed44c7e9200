//! Axum route handlers for the Proposal API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::errors::AppError;
use crate::generation::generator::GenerateResponse;
use crate::models::proposal::ProposalRequest;
use crate::render::{FILE_NAME, MIME_TYPE};
use crate::state::AppState;

/// POST /api/v1/proposals
///
/// Generates a proposal and returns its text plus document metadata.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<ProposalRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let proposal = state.proposals.generate(&request).await?;
    Ok(Json(proposal.into()))
}

/// POST /api/v1/proposals/document
///
/// Generates a proposal and returns the rendered PDF as a download.
pub async fn handle_generate_document(
    State(state): State<AppState>,
    Json(request): Json<ProposalRequest>,
) -> Result<Response, AppError> {
    let proposal = state.proposals.generate(&request).await?;

    let disposition = format!("attachment; filename=\"{FILE_NAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, MIME_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        proposal.document.bytes,
    )
        .into_response())
}
