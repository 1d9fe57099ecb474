//! Structural validation at both edges of the generation service.
//!
//! - [`validate_request`] gates what callers send in.
//! - [`validate_model_payload`] gates what the provider sends back.
//!
//! Both are pure functions over a `serde_json::Value`; neither checks content quality.

use crate::catalogue::{Difficulty, LegalArea};
use crate::error::ValidationError;
use crate::scenario::{GenerationRequest, ScenarioContent};
use serde_json::{Map, Value};

const AREA_FIELD: &str = "area";
const DIFFICULTY_FIELD: &str = "difficulty";
const CUSTOM_PROMPT_FIELD: &str = "customPrompt";

/// Validates an inbound generation request.
///
/// Both required fields are checked for presence before either is checked for membership, so a
/// request missing `difficulty` reports `MissingField` even when its `area` is also unknown.
///
/// # Errors
///
/// - [`ValidationError::InvalidType`] if `raw` is not an object, or `customPrompt` is present but
///   not a string.
/// - [`ValidationError::MissingField`] if `area` or `difficulty` is absent, `null` or `""`.
/// - [`ValidationError::InvalidEnum`] if either is present but outside its closed set.
pub fn validate_request(raw: &Value) -> Result<GenerationRequest, ValidationError> {
    let obj = raw.as_object().ok_or(ValidationError::InvalidType {
        field: "<root>",
        expected: "a JSON object",
    })?;

    let area_raw = required(obj, AREA_FIELD)?;
    let difficulty_raw = required(obj, DIFFICULTY_FIELD)?;

    let area = area_raw
        .as_str()
        .and_then(LegalArea::from_tag)
        .ok_or_else(|| ValidationError::InvalidEnum {
            field: AREA_FIELD,
            value: area_raw.to_string(),
        })?;

    let difficulty = difficulty_raw
        .as_str()
        .and_then(Difficulty::from_tag)
        .ok_or_else(|| ValidationError::InvalidEnum {
            field: DIFFICULTY_FIELD,
            value: difficulty_raw.to_string(),
        })?;

    let custom_prompt = match obj.get(CUSTOM_PROMPT_FIELD) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.as_str()),
        Some(_) => {
            return Err(ValidationError::InvalidType {
                field: CUSTOM_PROMPT_FIELD,
                expected: "a string",
            })
        }
    };

    Ok(GenerationRequest::new(area, difficulty, custom_prompt))
}

fn required<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, ValidationError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField(field)),
        Some(Value::String(s)) if s.is_empty() => Err(ValidationError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

/// Validates the JSON object returned by the provider.
///
/// This uses `serde_path_to_error` to name the first missing or mistyped field (for example
/// `parties.lawyers[1]`). Keys outside the expected shape are ignored.
///
/// # Errors
///
/// Returns [`ValidationError::MalformedPayload`] describing the offending path.
pub fn validate_model_payload(raw: &Value) -> Result<ScenarioContent, ValidationError> {
    serde_path_to_error::deserialize::<_, ScenarioContent>(raw).map_err(|err| {
        let path = err.path().to_string();
        let source = err.into_inner();
        let path = if path.is_empty() || path == "." {
            "<root>"
        } else {
            path.as_str()
        };
        ValidationError::MalformedPayload(format!("schema mismatch at {path}: {source}"))
    })
}
