//! Prompt construction: maps a validated `ProposalRequest` to one prompt string.
//!
//! Pure and deterministic. Caller text is inserted verbatim, never trimmed or
//! escaped, and exactly once per field.

use std::fmt::Write as _;

use crate::generation::prompts::{
    PERSONALIZED_DIRECTIVES, PERSONALIZED_EXPERIENCE_LABEL, PERSONALIZED_INTRO,
    PERSONALIZED_JOB_LABEL, PERSONALIZED_PORTFOLIO_LABEL, PERSONALIZED_SKILLS_LABEL,
    STRUCTURED_FORMAT, STRUCTURED_GUIDELINES, STRUCTURED_JOB_LABEL, STRUCTURED_SKILLS_LABEL,
};
use crate::models::proposal::{
    PersonalizedRequest, ProposalRequest, StructuredRequest, ValidationError,
};

/// Validates the request, then renders the prompt for its mode.
pub fn build_prompt(request: &ProposalRequest) -> Result<String, ValidationError> {
    request.validate()?;

    Ok(match request {
        ProposalRequest::Structured(r) => structured_prompt(r),
        ProposalRequest::Personalized(r) => personalized_prompt(r),
    })
}

/// Mode A: format skeleton, then style guidelines, then the labelled inputs.
fn structured_prompt(request: &StructuredRequest) -> String {
    let mut prompt = String::with_capacity(
        STRUCTURED_FORMAT.len() + request.job_description.len() + request.skills_to_consider.len() + 512,
    );

    prompt.push_str(STRUCTURED_FORMAT);
    prompt.push_str("\n\nImportant guidelines:\n");
    for guideline in STRUCTURED_GUIDELINES {
        let _ = writeln!(prompt, "- {guideline}");
    }

    prompt.push_str("\nUse this information:\n");
    let _ = writeln!(prompt, "{STRUCTURED_JOB_LABEL} {}", request.job_description);
    let _ = write!(prompt, "{STRUCTURED_SKILLS_LABEL} {}", request.skills_to_consider);

    prompt
}

/// Mode B: four labelled blocks, then the numbered directives.
fn personalized_prompt(request: &PersonalizedRequest) -> String {
    let portfolio = request.portfolio_links.as_deref().unwrap_or("");

    let mut prompt = String::new();
    prompt.push_str(PERSONALIZED_INTRO);
    prompt.push_str("\n\n");

    for (label, value) in [
        (PERSONALIZED_JOB_LABEL, request.job_description.as_str()),
        (PERSONALIZED_SKILLS_LABEL, request.skills.as_str()),
        (PERSONALIZED_EXPERIENCE_LABEL, request.experience.as_str()),
        (PERSONALIZED_PORTFOLIO_LABEL, portfolio),
    ] {
        let _ = writeln!(prompt, "{label}\n{value}\n");
    }

    prompt.push_str("Follow these directives:\n");
    for (i, directive) in PERSONALIZED_DIRECTIVES.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {directive}", i + 1);
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structured(jd: &str, skills: &str) -> ProposalRequest {
        ProposalRequest::Structured(StructuredRequest {
            job_description: jd.to_string(),
            skills_to_consider: skills.to_string(),
        })
    }

    fn personalized(links: Option<&str>) -> ProposalRequest {
        ProposalRequest::Personalized(PersonalizedRequest {
            job_description: "Need a Shopify storefront redesign".to_string(),
            skills: "Liquid, JavaScript, Figma".to_string(),
            experience: "Rebuilt checkout for a 40k SKU retailer".to_string(),
            portfolio_links: links.map(str::to_string),
            client_info: Some("Acme Outdoor".to_string()),
        })
    }

    #[test]
    fn test_structured_prompt_contains_inputs_exactly_once() {
        let jd = "Build a REST API in Python for an inventory service";
        let skills = "Python, FastAPI, PostgreSQL";
        let prompt = build_prompt(&structured(jd, skills)).unwrap();

        assert_eq!(prompt.matches(jd).count(), 1);
        assert_eq!(prompt.matches(skills).count(), 1);
        assert!(prompt.contains(&format!("Job Description: {jd}")));
        assert!(prompt.contains(&format!("Technical Skills to Consider: {skills}")));
    }

    #[test]
    fn test_structured_prompt_names_all_six_sections() {
        let prompt = build_prompt(&structured("Data pipeline", "Rust, Kafka")).unwrap();
        for label in [
            "Title:",
            "[Opening paragraph",
            "Relevant Experience",
            "Technical Implementation",
            "Delivery Plan",
            "[Closing paragraph",
        ] {
            assert!(prompt.contains(label), "prompt missing section {label:?}");
        }
        for phase in ["Phase 1:", "Phase 2:", "Phase 3:"] {
            assert!(prompt.contains(phase));
        }
    }

    #[test]
    fn test_structured_prompt_order_is_format_guidelines_inputs() {
        let prompt = build_prompt(&structured("Data pipeline", "Rust, Kafka")).unwrap();
        let format_at = prompt.find("Delivery Plan").unwrap();
        let guidelines_at = prompt.find("Important guidelines:").unwrap();
        let inputs_at = prompt.find("Job Description: Data pipeline").unwrap();
        assert!(format_at < guidelines_at && guidelines_at < inputs_at);
        assert_eq!(prompt.matches("\n- ").count(), STRUCTURED_GUIDELINES.len());
    }

    #[test]
    fn test_structured_prompt_keeps_caller_text_verbatim() {
        let jd = "  Leading spaces and {braces} and\nnewlines  ";
        let prompt = build_prompt(&structured(jd, "Go")).unwrap();
        assert_eq!(prompt.matches(jd).count(), 1);
    }

    #[test]
    fn test_personalized_prompt_has_blocks_and_seven_directives() {
        let prompt = build_prompt(&personalized(Some("https://github.com/acme"))).unwrap();

        for label in ["Job Description:", "Skills:", "Experience:", "Portfolio Links:"] {
            assert!(prompt.contains(label), "prompt missing block {label:?}");
        }
        assert!(prompt.contains("https://github.com/acme"));
        for n in 1..=7 {
            assert!(prompt.contains(&format!("\n{n}. ")), "missing directive {n}");
        }
        assert!(!prompt.contains("\n8. "));
        assert!(prompt.contains("200 and 300 words"));
    }

    #[test]
    fn test_personalized_prompt_keeps_empty_portfolio_block() {
        let prompt = build_prompt(&personalized(None)).unwrap();
        assert!(prompt.contains("Portfolio Links:\n\n\nFollow these directives:"));
    }

    #[test]
    fn test_personalized_prompt_omits_client_info() {
        let prompt = build_prompt(&personalized(None)).unwrap();
        assert!(!prompt.contains("Acme Outdoor"));
    }

    #[test]
    fn test_empty_required_field_fails_before_construction() {
        let err = build_prompt(&structured("   ", "Rust")).unwrap_err();
        assert_eq!(err.missing, vec!["job_description"]);

        let request = ProposalRequest::Personalized(PersonalizedRequest {
            job_description: "Job".to_string(),
            skills: String::new(),
            experience: "\t".to_string(),
            portfolio_links: None,
            client_info: None,
        });
        let err = build_prompt(&request).unwrap_err();
        assert_eq!(err.missing, vec!["skills", "experience"]);
    }
}
