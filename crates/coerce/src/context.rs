use crate::error::CoerceError;
use crate::fields::Fields;
use crate::{RawOutput, as_object, parse_model_json};
use pmforge_types::{
    ContextDeliverable, DocumentType, Language, RawRisk, RawStakeholder, StructuredContext,
};
use serde_json::{Map, Value};

/// Coerces the document-structuring reply into a `StructuredContext`.
///
/// `project_name` is used when the reply carries no textual project name.
pub fn coerce_context<'a>(
    raw: impl Into<RawOutput<'a>>,
    project_name: &str,
) -> Result<StructuredContext, CoerceError> {
    match raw.into() {
        RawOutput::Text(text) => Ok(context_from_object(&parse_model_json(text)?, project_name)),
        RawOutput::Value(value) => Ok(context_from_object(as_object(value)?, project_name)),
    }
}

fn context_from_object(object: &Map<String, Value>, project_name: &str) -> StructuredContext {
    let f = Fields::new(object);
    let document_type = object
        .get("document_type")
        .and_then(Value::as_str)
        .and_then(|tag| DocumentType::ALL.into_iter().find(|t| t.as_str() == tag))
        .unwrap_or_default();
    let language = match object.get("language").and_then(Value::as_str) {
        Some("en") => Language::En,
        _ => Language::Es,
    };

    StructuredContext {
        project_name: object
            .get("project_name")
            .and_then(Value::as_str)
            .map_or_else(|| project_name.to_string(), str::to_string),
        document_type,
        language,
        scope_summary: object
            .get("scope_summary")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        deliverables: f.list("deliverables", |d, _| ContextDeliverable {
            name: d.text("name"),
            description: d.text("description"),
            evidence: d.text("evidence"),
        }),
        obligations: f.text_list("obligations"),
        sla: f.text_list("sla"),
        penalties: f.text_list("penalties"),
        milestones: f.text_list("milestones"),
        payment_terms: f.text_list("payment_terms"),
        constraints: f.text_list("constraints"),
        assumptions: f.text_list("assumptions"),
        risks_raw: f.list("risks_raw", |r, _| RawRisk {
            description: r.text("description"),
            evidence: r.text("evidence"),
        }),
        stakeholders_raw: f.list("stakeholders_raw", |s, _| RawStakeholder {
            role: s.text("role"),
            interest: s.text("interest"),
            evidence: s.text("evidence"),
        }),
    }
}
