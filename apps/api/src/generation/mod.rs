// Proposal generation: prompt building, the generate pipeline, and its HTTP handlers.
// All backend calls go through llm_client; nothing here talks to Gemini directly.

pub mod generator;
pub mod handlers;
pub mod prompt_builder;
pub mod prompts;
pub mod sections;
