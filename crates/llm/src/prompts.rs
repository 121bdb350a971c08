//! System prompts and user-message templates.
//!
//! Every prompt asks for a bare JSON object. Enum values are requested with
//! the exact Spanish literals the coercion layer accepts.

use pmforge_types::{ArtifactType, ProjectMetadata, StructuredContext};

/// System prompt for turning extracted document text into a structured context.
pub const STRUCTURE_PROMPT: &str = r#"You analyse project documents (contracts, statements of work, RFPs) and extract structured information.

Read the text extracted from a PDF and reply ONLY with a valid JSON object with exactly this structure (no markdown, no comments):
{
  "project_name": "string (project name if present, otherwise a short summary)",
  "document_type": "contract" | "sow" | "rfp" | "annex",
  "language": "es" | "en",
  "scope_summary": "string (1-3 paragraph summary of the scope)",
  "deliverables": [{"name": "string", "description": "string", "evidence": "string (clause or section reference)"}],
  "obligations": ["string"],
  "sla": ["string"],
  "penalties": ["string"],
  "milestones": ["string"],
  "payment_terms": ["string"],
  "constraints": ["string"],
  "assumptions": ["string"],
  "risks_raw": [{"description": "string", "evidence": "string"}],
  "stakeholders_raw": [{"role": "string", "interest": "string", "evidence": "string"}]
}

Rules: use empty arrays [] when a field has no data. evidence may be empty. language is "es" or "en" according to the document language. Infer document_type from the content. Reply with the JSON only."#;

const CHARTER_PROMPT: &str = r#"Write a Project Charter from the project context.
Reply ONLY with a valid JSON object with this structure:
{
  "project_name": "string",
  "scope_summary": "string (2-3 paragraphs)",
  "objectives": ["string"],
  "deliverables": [{"name": "string", "description": "string"}],
  "milestones": [{"name": "string", "date_estimate": "string or null"}],
  "constraints": ["string"],
  "assumptions": ["string"],
  "budget_summary": "string",
  "duration_summary": "string",
  "stakeholders": [{"role": "string", "responsibility": "string"}],
  "approval_criteria": ["string"]
}"#;

const RISK_REGISTER_PROMPT: &str = r#"Write a Risk Register from the project context.
Reply ONLY with a valid JSON object with this structure:
{
  "risks": [{
    "id": number,
    "description": "string",
    "probability": "alta" | "media" | "baja",
    "impact": "alto" | "medio" | "bajo",
    "severity": "critico" | "alto" | "medio" | "bajo",
    "mitigation": "string",
    "owner": "string",
    "status": "abierto"
  }]
}
List at least 5-10 risks relevant to the project. severity follows from probability x impact."#;

const STAKEHOLDER_REGISTER_PROMPT: &str = r#"Write a Stakeholder Register from the project context.
Reply ONLY with a valid JSON object with this structure:
{
  "stakeholders": [{
    "id": number,
    "name_role": "string (stakeholder name or role)",
    "interest": "string (main interest in the project)",
    "influence": "alta" | "media" | "baja",
    "engagement_strategy": "string (how to manage them)"
  }]
}
List at least 5 relevant stakeholders."#;

const WBS_PROMPT: &str = r#"Write a WBS (Work Breakdown Structure) from the project context.
Reply ONLY with a valid JSON object with this structure:
{
  "phases": [{
    "id": "1",
    "name": "string (phase name)",
    "children": [{
      "id": "1.1",
      "name": "string (deliverable or work package)",
      "children": [{"id": "1.1.1", "name": "string (task)"}]
    }]
  }]
}
Organise it into phases, deliverables and tasks with hierarchical numbering (1, 1.1, 1.1.1)."#;

const BACKLOG_PROMPT: &str = r#"Write a Product Backlog from the project context.
Reply ONLY with a valid JSON object with this structure:
{
  "phases": [{
    "id": "1",
    "name": "string (epic or theme)",
    "children": [{
      "id": "1.1",
      "name": "string (user story or feature)",
      "children": [{"id": "1.1.1", "name": "string (task or sub-task)"}]
    }]
  }]
}
Organise it into epics, user stories and tasks."#;

/// System prompt for generating one artifact type.
pub fn artifact_prompt(kind: ArtifactType) -> &'static str {
    match kind {
        ArtifactType::Charter => CHARTER_PROMPT,
        ArtifactType::RiskRegister => RISK_REGISTER_PROMPT,
        ArtifactType::StakeholderRegister => STAKEHOLDER_REGISTER_PROMPT,
        ArtifactType::Wbs => WBS_PROMPT,
        ArtifactType::Backlog => BACKLOG_PROMPT,
    }
}

pub(crate) fn structure_user_message(project_name: &str, text: &str) -> String {
    format!("Project name (metadata): {project_name}\n\n---\nDocument text:\n\n{text}")
}

pub(crate) fn artifact_user_message(
    context: &StructuredContext,
    metadata: &ProjectMetadata,
    kind: ArtifactType,
) -> String {
    let context_json = serde_json::to_string_pretty(context).unwrap_or_else(|_| "{}".to_string());
    format!(
        "Project: {}\nIndustry: {}\nEstimated duration: {}\nEstimated budget: {}\nMethodology: {}\n\n\
         Structured document context:\n{}\n\nGenerate the artifact: {}",
        metadata.name,
        metadata.industry,
        metadata.duration_estimate,
        metadata.budget_estimate,
        metadata.methodology,
        context_json,
        kind.title()
    )
}
