//! Schema coercion for language-model output.
//!
//! Model replies are loosely typed: fields go missing, enums drift, ids are
//! omitted and arrays sometimes arrive as strings. This crate turns any JSON
//! object into the strict shape of an artifact type, and fails only when the
//! reply is not a JSON object at all.
//!
//! ```ignore
//! use pmforge_coerce::coerce;
//! use pmforge_types::ArtifactType;
//!
//! let content = coerce(ArtifactType::RiskRegister, "```json\n{\"risks\": [{}]}\n```")?;
//! ```

mod artifacts;
mod context;
mod error;
mod fence;
mod fields;

pub use artifacts::MAX_TREE_DEPTH;
pub use context::coerce_context;
pub use error::CoerceError;
pub use fence::strip_code_fences;
pub use fields::stringify;

use pmforge_types::{ArtifactContent, ArtifactType};
use serde_json::{Map, Value};

/// Untrusted model output: either the raw reply text or an already parsed value.
#[derive(Debug, Clone, Copy)]
pub enum RawOutput<'a> {
    Text(&'a str),
    Value(&'a Value),
}

impl<'a> From<&'a str> for RawOutput<'a> {
    fn from(text: &'a str) -> Self {
        RawOutput::Text(text)
    }
}

impl<'a> From<&'a String> for RawOutput<'a> {
    fn from(text: &'a String) -> Self {
        RawOutput::Text(text.as_str())
    }
}

impl<'a> From<&'a Value> for RawOutput<'a> {
    fn from(value: &'a Value) -> Self {
        RawOutput::Value(value)
    }
}

/// Coerces raw model output into the strict shape for `kind`.
///
/// Text input is stripped of markdown code fences and parsed first. Missing,
/// extra or wrongly typed fields never fail; they are normalized.
pub fn coerce<'a>(
    kind: ArtifactType,
    raw: impl Into<RawOutput<'a>>,
) -> Result<ArtifactContent, CoerceError> {
    match raw.into() {
        RawOutput::Text(text) => {
            let parsed = parse_model_json(text)?;
            Ok(artifacts::coerce_object(kind, &parsed))
        }
        RawOutput::Value(value) => {
            let object = as_object(value)?;
            Ok(artifacts::coerce_object(kind, object))
        }
    }
}

/// Strips code fences from a model reply and parses it as a JSON object.
pub fn parse_model_json(text: &str) -> Result<Map<String, Value>, CoerceError> {
    let body = strip_code_fences(text);
    let value: Value = serde_json::from_str(body)
        .map_err(|e| CoerceError::MalformedModelOutput(format!("invalid JSON: {e}")))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(CoerceError::MalformedModelOutput(format!(
            "expected a JSON object, got {}",
            fields::kind_name(&other)
        ))),
    }
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, CoerceError> {
    value.as_object().ok_or_else(|| {
        CoerceError::MalformedModelOutput(format!(
            "expected a JSON object, got {}",
            fields::kind_name(value)
        ))
    })
}
