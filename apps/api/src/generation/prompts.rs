// All prompt text for proposal generation.
// The backend has no output schema, so the prompt is the only lever on
// structure: mode A repeats the layout as both a skeleton and style rules.

/// Mode A output skeleton. Section names here must match `sections::EXPECTED_MARKERS`.
pub const STRUCTURED_FORMAT: &str = r#"Create a professional Upwork proposal with exactly this structure and format:

Title: "Proposal: [Brief Project Description]"

[Opening paragraph explaining the understanding of the project and proposed solution without any bullet points]

Relevant Experience
[A paragraph describing relevant technical achievements and project completions without mentioning years of experience or using bullet points. Focus on completed projects and their impacts.]

Technical Implementation
[A detailed paragraph explaining the technical approach and methodology. Include specific technologies and how they will work together. No bullet points or subheadings.]

Delivery Plan
Phase 1: [Single line describing initial phase]
Phase 2: [Single line describing development phase]
Phase 3: [Single line describing final phase]

[Closing paragraph with a brief call to action for discussion]"#;

/// Mode A style directives, rendered as a dash list.
pub const STRUCTURED_GUIDELINES: [&str; 5] = [
    "Keep the tone professional and confident",
    "Do not use bullet points anywhere in the proposal",
    "Don't mention personal experience or years of experience",
    "Be specific and technical in the implementation section",
    "Structure the content with clear headings",
];

pub const STRUCTURED_JOB_LABEL: &str = "Job Description:";
pub const STRUCTURED_SKILLS_LABEL: &str = "Technical Skills to Consider:";

/// Mode B opening line.
pub const PERSONALIZED_INTRO: &str =
    "Write a persuasive Upwork proposal for the job below, tailored to the freelancer described.";

pub const PERSONALIZED_JOB_LABEL: &str = "Job Description:";
pub const PERSONALIZED_SKILLS_LABEL: &str = "Skills:";
pub const PERSONALIZED_EXPERIENCE_LABEL: &str = "Experience:";
pub const PERSONALIZED_PORTFOLIO_LABEL: &str = "Portfolio Links:";

/// Mode B directives, rendered as a numbered list.
pub const PERSONALIZED_DIRECTIVES: [&str; 7] = [
    "Open with a compelling hook that shows you understand the client's project",
    "Address the client's specific needs and pain points from the job description",
    "Highlight the skills and experience above that are most relevant to this job",
    "State a clear value proposition: what the client gains by hiring this freelancer",
    "End with a call to action inviting the client to discuss next steps",
    "Keep the tone professional yet friendly",
    "Keep the proposal between 200 and 300 words",
];
