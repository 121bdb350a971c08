//! One normalization rule per field kind.

use itertools::Itertools;
use pmforge_types::{ClosedSet, RowId};
use serde_json::{Map, Value};

/// Converts any JSON value into its text form. `null` becomes the empty string.
///
/// Floats print in shortest form, so `1e6` is `1000000` and `1.0` is `1`.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify).join(","),
        Value::Object(_) => value.to_string(),
    }
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Read-only view over an untrusted JSON object. A non-object value behaves as
/// an object with no fields, so malformed list elements still coerce.
#[derive(Clone, Copy)]
pub(crate) struct Fields<'a> {
    object: Option<&'a Map<String, Value>>,
}

static EMPTY: Value = Value::Null;

impl<'a> Fields<'a> {
    pub(crate) fn new(object: &'a Map<String, Value>) -> Self {
        Self { object: Some(object) }
    }

    pub(crate) fn of(value: &'a Value) -> Self {
        Self { object: value.as_object() }
    }

    fn get(&self, key: &str) -> &'a Value {
        self.object.and_then(|o| o.get(key)).unwrap_or(&EMPTY)
    }

    /// Text field: stringified, missing or null becomes `""`.
    pub(crate) fn text(&self, key: &str) -> String {
        stringify(self.get(key))
    }

    /// Text field with aliases: the first key holding a non-null value wins.
    pub(crate) fn text_any(&self, keys: &[&str]) -> String {
        keys.iter()
            .map(|k| self.get(k))
            .find(|v| !v.is_null())
            .map(stringify)
            .unwrap_or_default()
    }

    /// Optional text: present only when the source value is truthy.
    pub(crate) fn optional_text(&self, key: &str) -> Option<String> {
        let value = self.get(key);
        is_truthy(value).then(|| stringify(value))
    }

    /// List of text: every element stringified; a non-sequence becomes empty.
    pub(crate) fn text_list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Null => "null".to_string(),
                    item => stringify(item),
                })
                .collect(),
            other => {
                if !other.is_null() {
                    log::debug!("Field '{}' is {}, not a list; using []", key, kind_name(other));
                }
                Vec::new()
            }
        }
    }

    /// List of objects: every element coerced with `element`, receiving its
    /// 1-based position. Malformed elements are kept in best-effort shape.
    pub(crate) fn list<T>(&self, key: &str, element: impl Fn(Fields<'a>, usize) -> T) -> Vec<T> {
        match self.get(key) {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| element(Fields::of(item), i + 1))
                .collect(),
            other => {
                if !other.is_null() {
                    log::debug!("Field '{}' is {}, not a list; using []", key, kind_name(other));
                }
                Vec::new()
            }
        }
    }

    /// Raw child values of a sequence field, or an empty slice.
    pub(crate) fn sequence(&self, key: &str) -> &'a [Value] {
        match self.get(key) {
            Value::Array(items) => items.as_slice(),
            _ => &[],
        }
    }

    /// Enum field: lower-cased literal if allowed, otherwise the fallback.
    pub(crate) fn closed<E: ClosedSet>(&self, key: &str) -> E {
        let literal = stringify(self.get(key)).to_lowercase();
        E::from_literal(&literal).unwrap_or_else(|| {
            if !literal.is_empty() {
                log::debug!(
                    "Field '{}' value '{}' is not allowed; using '{}'",
                    key,
                    literal,
                    E::FALLBACK.as_str()
                );
            }
            E::FALLBACK
        })
    }

    /// Numeric row id: numbers are kept, anything else becomes `position`.
    pub(crate) fn row_id(&self, key: &str, position: usize) -> RowId {
        match self.get(key) {
            Value::Number(n) => RowId(n.clone()),
            _ => RowId::from_position(position),
        }
    }
}
