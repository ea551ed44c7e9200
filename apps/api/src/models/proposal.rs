//! Request types for the two proposal modes.

use serde::Deserialize;
use thiserror::Error;

/// Inputs for a single proposal generation, tagged by mode.
///
/// Fields default to empty strings so a missing field reaches validation
/// (and a `ValidationError`) instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ProposalRequest {
    /// Mode A: fixed six-section template.
    Structured(StructuredRequest),
    /// Mode B: free-form persuasive letter.
    Personalized(PersonalizedRequest),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StructuredRequest {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub skills_to_consider: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonalizedRequest {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub portfolio_links: Option<String>,
    #[serde(default)]
    pub client_info: Option<String>,
}

/// One or more required fields were empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

impl ProposalRequest {
    pub fn mode(&self) -> &'static str {
        match self {
            ProposalRequest::Structured(_) => "structured",
            ProposalRequest::Personalized(_) => "personalized",
        }
    }

    /// Checks every required field for the selected mode.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required: Vec<(&'static str, &str)> = match self {
            ProposalRequest::Structured(r) => vec![
                ("job_description", r.job_description.as_str()),
                ("skills_to_consider", r.skills_to_consider.as_str()),
            ],
            ProposalRequest::Personalized(r) => vec![
                ("job_description", r.job_description.as_str()),
                ("skills", r.skills.as_str()),
                ("experience", r.experience.as_str()),
            ],
        };

        let missing: Vec<&'static str> = required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }

    /// Client notes printed in the document. Mode A never carries any.
    pub fn client_info(&self) -> &str {
        match self {
            ProposalRequest::Structured(_) => "",
            ProposalRequest::Personalized(r) => r.client_info.as_deref().unwrap_or(""),
        }
    }
}
