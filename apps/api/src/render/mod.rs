//! Document rendering: layout + PDF serialization of a generated proposal.
//!
//! `render_document` is pure: identical inputs produce identical bytes, and
//! inputs that differ only in `generated_at` differ only inside the timestamp
//! line, whatever the two dates are. Documents live in memory; nothing touches
//! the filesystem.

pub mod pdf;

use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, TimeZone};
use thiserror::Error;

use crate::layout::{default_page_geometry, layout_document};

/// Suggested download name for the artifact.
pub const FILE_NAME: &str = "upwork_proposal.pdf";
pub const MIME_TYPE: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("missing render input: {0}")]
    MissingInput(&'static str),

    #[error("PDF serialization failed: {0}")]
    Pdf(String),

    #[error("render task failed: {0}")]
    Task(String),
}

/// A finished PDF. Cheap to clone.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Bytes,
    pub page_count: usize,
}

/// Lays out and serializes the proposal document.
///
/// `None` for either text is a contract violation (`MissingInput`); an empty
/// string is valid and renders as blank content. The printed date is the
/// calendar date in `generated_at`'s own zone.
pub fn render_document<Tz: TimeZone>(
    proposal_text: Option<&str>,
    client_info: Option<&str>,
    generated_at: DateTime<Tz>,
) -> Result<RenderedDocument, RenderError>
where
    Tz::Offset: fmt::Display,
{
    let proposal_text = proposal_text.ok_or(RenderError::MissingInput("proposal_text"))?;
    let client_info = client_info.ok_or(RenderError::MissingInput("client_info"))?;

    let layout = layout_document(
        proposal_text,
        client_info,
        generated_at,
        &default_page_geometry(),
    );
    let bytes = pdf::write_pdf(&layout)?;

    Ok(RenderedDocument {
        bytes: Bytes::from(bytes),
        page_count: layout.page_count(),
    })
}
