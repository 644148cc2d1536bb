//! Incoming plan request payload.
//!
//! The payload is a loose JSON object. Only six keys are read and each one is
//! coerced to a [`FieldText`] at the boundary: the value's text plus whether
//! the original JSON value was truthy.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Name used in the summary when the caller does not supply one.
pub const DEFAULT_PREFERRED_NAME: &str = "Bruin";

/// Term used in the summary when the caller does not supply one.
pub const DEFAULT_TERM: &str = "upcoming term";

/// A request field coerced to text.
///
/// `truthy` is false for `false`, `0`, `0.0`, `""`, `[]` and `{}`. Such values still
/// contribute their text to the description but count as absent for defaults
/// and echo selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldText {
    text: String,
    truthy: bool,
}

impl FieldText {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_truthy(&self) -> bool {
        self.truthy
    }

    fn from_json(value: Value) -> Option<Self> {
        let truthy = match &value {
            Value::Null => return None,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
        };
        let text = match value {
            Value::String(s) => s,
            other => other.to_string(),
        };
        Some(Self { text, truthy })
    }
}

impl From<String> for FieldText {
    fn from(text: String) -> Self {
        let truthy = !text.is_empty();
        Self { text, truthy }
    }
}

impl From<&str> for FieldText {
    fn from(text: &str) -> Self {
        Self::from(text.to_string())
    }
}

/// A request for a one-shot plan.
///
/// All fields are optional. `null` values are treated as absent; numbers,
/// booleans, arrays and objects are kept as their JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlanRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub request: Option<FieldText>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub scenario: Option<FieldText>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub goal: Option<FieldText>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub problem: Option<FieldText>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub preferred_name: Option<FieldText>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub term: Option<FieldText>,
}

impl PlanRequest {
    /// Parse a raw request body.
    ///
    /// Never fails: an empty body, invalid JSON, or JSON that is not an
    /// object all produce the default (empty) request.
    pub fn from_body(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::default();
        }
        let value = match serde_json::from_slice::<Value>(body) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "unparseable plan request body, treating as empty");
                return Self::default();
            }
        };
        Self::from_value(value)
    }

    /// Build a request from an already-parsed JSON value.
    ///
    /// Anything other than a JSON object yields the default request.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            tracing::debug!("plan request body is not a JSON object, treating as empty");
            return Self::default();
        }
        // Every field accepts any JSON value, so an object always deserializes.
        Self::deserialize(value).unwrap_or_default()
    }

    /// The lower-cased free text used for scenario detection.
    ///
    /// `request`, `scenario`, `goal` and `problem` joined by single spaces;
    /// missing fields contribute an empty string.
    pub fn description(&self) -> String {
        [&self.request, &self.scenario, &self.goal, &self.problem]
            .iter()
            .map(|field| field.as_ref().map_or("", FieldText::as_str))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// Preferred name, or [`DEFAULT_PREFERRED_NAME`] when missing or falsy.
    pub fn preferred_name(&self) -> &str {
        truthy(&self.preferred_name).unwrap_or(DEFAULT_PREFERRED_NAME)
    }

    /// Term, or [`DEFAULT_TERM`] when missing or falsy.
    pub fn term(&self) -> &str {
        truthy(&self.term).unwrap_or(DEFAULT_TERM)
    }

    /// The text echoed back by the fallback plan: `request`, then `scenario`,
    /// then the empty string.
    pub fn echo(&self) -> &str {
        truthy(&self.request)
            .or_else(|| truthy(&self.scenario))
            .unwrap_or("")
    }
}

fn truthy(field: &Option<FieldText>) -> Option<&str> {
    field
        .as_ref()
        .filter(|f| f.is_truthy())
        .map(FieldText::as_str)
}

/// Accept any JSON value and keep it as text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<FieldText>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(FieldText::from_json(Value::deserialize(deserializer)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_default() {
        assert_eq!(PlanRequest::from_body(b""), PlanRequest::default());
    }

    #[test]
    fn malformed_body_is_default() {
        assert_eq!(PlanRequest::from_body(b"{not json"), PlanRequest::default());
        assert_eq!(PlanRequest::from_body(b"ucla orientation"), PlanRequest::default());
    }

    #[test]
    fn non_object_json_is_default() {
        assert_eq!(PlanRequest::from_body(b"[1, 2, 3]"), PlanRequest::default());
        assert_eq!(PlanRequest::from_body(b"\"ucla orientation\""), PlanRequest::default());
        assert_eq!(PlanRequest::from_body(b"null"), PlanRequest::default());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let req = PlanRequest::from_body(br#"{"request": "x", "extra": {"a": 1}}"#);
        assert_eq!(req.request.as_ref().map(FieldText::as_str), Some("x"));
    }

    #[test]
    fn non_string_values_are_coerced_to_text() {
        let req = PlanRequest::from_body(
            br#"{"request": 42, "scenario": true, "goal": ["ucla"], "problem": null}"#,
        );
        assert_eq!(req.request.as_ref().map(FieldText::as_str), Some("42"));
        assert_eq!(req.scenario.as_ref().map(FieldText::as_str), Some("true"));
        assert_eq!(req.goal.as_ref().map(FieldText::as_str), Some(r#"["ucla"]"#));
        assert_eq!(req.problem, None);
    }

    #[test]
    fn falsy_values_count_as_absent() {
        let req = PlanRequest::from_body(
            br#"{"request": false, "scenario": "book a flight", "preferred_name": 0, "term": []}"#,
        );
        assert_eq!(req.echo(), "book a flight");
        assert_eq!(req.preferred_name(), DEFAULT_PREFERRED_NAME);
        assert_eq!(req.term(), DEFAULT_TERM);
        assert_eq!(req.description(), "false book a flight  ");

        let req = PlanRequest::from_body(br#"{"request": {}, "scenario": 0.0}"#);
        assert_eq!(req.echo(), "");
    }

    #[test]
    fn truthy_non_strings_are_used_as_text() {
        let req = PlanRequest::from_body(br#"{"request": 7, "preferred_name": true}"#);
        assert_eq!(req.echo(), "7");
        assert_eq!(req.preferred_name(), "true");
    }

    #[test]
    fn description_joins_four_fields_and_lowercases() {
        let req = PlanRequest {
            request: Some("Need HELP".into()),
            goal: Some("UCLA".into()),
            ..Default::default()
        };
        assert_eq!(req.description(), "need help  ucla ");
    }

    #[test]
    fn description_of_empty_request_is_three_spaces() {
        assert_eq!(PlanRequest::default().description(), "   ");
    }

    #[test]
    fn defaults_apply_to_missing_and_empty_values() {
        let req = PlanRequest {
            preferred_name: Some(String::new().into()),
            ..Default::default()
        };
        assert_eq!(req.preferred_name(), DEFAULT_PREFERRED_NAME);
        assert_eq!(req.term(), DEFAULT_TERM);

        let req = PlanRequest {
            preferred_name: Some("Ana".into()),
            term: Some("Fall 2024".into()),
            ..Default::default()
        };
        assert_eq!(req.preferred_name(), "Ana");
        assert_eq!(req.term(), "Fall 2024");
    }

    #[test]
    fn echo_prefers_request_then_scenario() {
        let both = PlanRequest {
            request: Some("book a flight".into()),
            scenario: Some("travel".into()),
            ..Default::default()
        };
        assert_eq!(both.echo(), "book a flight");

        let scenario_only = PlanRequest {
            request: Some(String::new().into()),
            scenario: Some("travel".into()),
            ..Default::default()
        };
        assert_eq!(scenario_only.echo(), "travel");

        let goal_only = PlanRequest {
            goal: Some("ignored".into()),
            ..Default::default()
        };
        assert_eq!(goal_only.echo(), "");
    }
}
