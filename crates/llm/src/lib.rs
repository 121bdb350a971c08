//! Language-model steps.
//!
//! The model is a black box that takes a system and a user message and
//! returns JSON-ish text. Everything it returns goes through `pmforge-coerce`
//! before the rest of the system sees it.

mod client;
mod error;
mod prompts;
mod steps;

pub use client::{LlmClient, OpenAiClient};
pub use error::LlmError;
pub use prompts::{STRUCTURE_PROMPT, artifact_prompt};
pub use steps::{
    ARTIFACT_TEMPERATURE, DEFAULT_MAX_CONTEXT_CHARS, STRUCTURE_TEMPERATURE, generate_artifact,
    structure_document, stub_context,
};
