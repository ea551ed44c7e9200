//! Proposal generation: orchestrates the full pipeline for one request.
//!
//! Flow: validate → build_prompt → GenerationClient::complete (once, with
//! timeout) → render_document (spawn_blocking) → return.
//!
//! Nothing is retried, cached, or kept between calls. The backend text is
//! rendered verbatim; section inspection only reports.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::generation::prompt_builder::build_prompt;
use crate::generation::sections::{inspect_sections, SectionReport};
use crate::llm_client::{GenerationClient, GenerationError};
use crate::models::proposal::{ProposalRequest, ValidationError};
use crate::render::{render_document, RenderError, RenderedDocument};

// ────────────────────────────────────────────────────────────────────────────
// Outcome types
// ────────────────────────────────────────────────────────────────────────────

/// The three ways a `generate` call can fail. None of them is retried.
#[derive(Debug, Error)]
pub enum ProposalError {
    /// A required field was blank. The backend was not called.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The backend failed or timed out. Nothing was rendered.
    #[error("generation failed: {0}")]
    GenerationFailed(#[from] GenerationError),

    /// Rendering failed on text the backend returned.
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}

/// A successful generation: the raw backend text and its rendered document.
#[derive(Debug, Clone)]
pub struct GeneratedProposal {
    pub proposal_text: String,
    pub document: RenderedDocument,
    /// Present for structured requests only.
    pub sections: Option<SectionReport>,
    /// Local time of the server, so the printed date matches its calendar.
    pub generated_at: DateTime<Local>,
}

/// JSON view of a generated proposal (the document bytes travel separately).
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub proposal_text: String,
    pub page_count: usize,
    pub file_name: &'static str,
    pub generated_at: DateTime<Local>,
    pub sections: Option<SectionReport>,
}

impl From<GeneratedProposal> for GenerateResponse {
    fn from(proposal: GeneratedProposal) -> Self {
        GenerateResponse {
            proposal_text: proposal.proposal_text,
            page_count: proposal.document.page_count,
            file_name: crate::render::FILE_NAME,
            generated_at: proposal.generated_at,
            sections: proposal.sections,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Service
// ────────────────────────────────────────────────────────────────────────────

/// Entry point for proposal generation. Cheap to share; holds no per-call state.
#[derive(Clone)]
pub struct ProposalService {
    client: Arc<dyn GenerationClient>,
    timeout: Duration,
}

impl ProposalService {
    pub fn new(client: Arc<dyn GenerationClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Runs one request through validate → prompt → backend → render.
    pub async fn generate(
        &self,
        request: &ProposalRequest,
    ) -> Result<GeneratedProposal, ProposalError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("generate_proposal", %request_id, mode = request.mode());
        self.generate_inner(request).instrument(span).await
    }

    async fn generate_inner(
        &self,
        request: &ProposalRequest,
    ) -> Result<GeneratedProposal, ProposalError> {
        let started = Instant::now();

        let prompt = build_prompt(request).map_err(|e| {
            info!("Rejected request: {e}");
            e
        })?;
        tracing::debug!(prompt_chars = prompt.len(), "Prompt built");

        let proposal_text = self.complete_with_timeout(&prompt).await.map_err(|e| {
            warn!(auth = e.is_auth(), "Generation failed: {e}");
            e
        })?;

        let sections = match request {
            ProposalRequest::Structured(_) => {
                let report = inspect_sections(&proposal_text);
                if !report.is_complete() {
                    warn!(
                        missing = ?report.missing,
                        "Generated proposal is missing requested sections; rendering as-is"
                    );
                }
                Some(report)
            }
            ProposalRequest::Personalized(_) => None,
        };

        // CPU-bound layout + serialization off the async executor.
        let generated_at = Local::now();
        let text = proposal_text.clone();
        let client_info = request.client_info().to_string();
        let document = tokio::task::spawn_blocking(move || {
            render_document(Some(&text), Some(&client_info), generated_at)
        })
        .await
        .map_err(|e| RenderError::Task(e.to_string()))??;

        info!(
            pages = document.page_count,
            bytes = document.bytes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Proposal generated"
        );

        Ok(GeneratedProposal {
            proposal_text,
            document,
            sections,
            generated_at,
        })
    }

    async fn complete_with_timeout(&self, prompt: &str) -> Result<String, GenerationError> {
        match tokio::time::timeout(self.timeout, self.client.complete(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout(self.timeout)),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
