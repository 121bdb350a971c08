use crate::client::LlmClient;
use crate::error::LlmError;
use crate::prompts::{STRUCTURE_PROMPT, artifact_prompt, artifact_user_message, structure_user_message};
use pmforge_coerce::{coerce, coerce_context};
use pmforge_types::{
    ArtifactContent, ArtifactType, DocumentType, Language, ProjectMetadata, StructuredContext,
};

pub const STRUCTURE_TEMPERATURE: f32 = 0.2;
pub const ARTIFACT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_CONTEXT_CHARS: usize = 28_000;

const UNNAMED_PROJECT: &str = "Untitled project";

/// Asks the model to structure extracted document text.
///
/// Only the first `max_chars` characters are sent.
pub async fn structure_document(
    client: &dyn LlmClient,
    text: &str,
    project_name: &str,
    max_chars: usize,
) -> Result<StructuredContext, LlmError> {
    let total = text.chars().count();
    let chunk = match text.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            log::warn!("Document text truncated from {} to {} chars", total, max_chars);
            &text[..cut]
        }
        None => text,
    };

    let reply = client
        .complete_json(
            STRUCTURE_PROMPT,
            &structure_user_message(project_name, chunk),
            STRUCTURE_TEMPERATURE,
        )
        .await?;
    Ok(coerce_context(reply.as_str(), project_name)?)
}

/// Asks the model for one artifact and coerces the reply to its shape.
pub async fn generate_artifact(
    client: &dyn LlmClient,
    context: &StructuredContext,
    metadata: &ProjectMetadata,
    kind: ArtifactType,
) -> Result<ArtifactContent, LlmError> {
    let reply = client
        .complete_json(
            artifact_prompt(kind),
            &artifact_user_message(context, metadata, kind),
            ARTIFACT_TEMPERATURE,
        )
        .await?;
    log::debug!("Coercing {} reply of {} chars", kind, reply.len());
    Ok(coerce(kind, reply.as_str())?)
}

/// The context used when no model is configured.
pub fn stub_context(project_name: &str) -> StructuredContext {
    let project_name = if project_name.trim().is_empty() {
        UNNAMED_PROJECT
    } else {
        project_name
    };
    StructuredContext {
        project_name: project_name.to_string(),
        document_type: DocumentType::Contract,
        language: Language::Es,
        scope_summary: "Text extracted. No model API key is configured, so it was not structured."
            .to_string(),
        ..Default::default()
    }
}
