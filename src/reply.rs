//! Typed view of the assistant service's reply.
//!
//! The service answers with a loosely shaped JSON object. It is inspected once,
//! here, and turned into a [`ChatReply`] whose [`ReplyKind`] says which result
//! the reply is primarily about. Rendering never looks at raw JSON again except
//! for sections that are shown pretty-printed on purpose.
//!
//! # Example
//!
//! ```rust
//! use healthcare_assistant_ui::reply::{ChatReply, ReplyKind};
//!
//! let reply = ChatReply::from_value(serde_json::json!({
//!     "intent": "general",
//!     "answer": { "text": "Hello" }
//! }))
//! .unwrap();
//! assert_eq!(reply.kind, ReplyKind::General);
//! assert_eq!(reply.answer.as_deref(), Some("Hello"));
//! ```

use serde::Serialize;
use serde_json::{Map, Value};

use crate::backend::DispatchError;

/// Which result a reply is primarily about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    /// Conversational answer (`intent == "general"`).
    General,
    /// Normalised requirement, usually with test cases and an ISO review.
    Requirement,
    /// Test cases without a requirement.
    TestCases,
    /// ISO findings on their own.
    IsoValidation,
}

/// A section that is either a list of recognised items or an opaque value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", content = "value", rename_all = "snake_case")]
pub enum Listing<T> {
    /// Every element was an object.
    Items(Vec<T>),
    /// Anything else; shown pretty-printed.
    Raw(Value),
}

impl<T> Listing<T> {
    fn from_value(value: Value, item: fn(&Map<String, Value>) -> T) -> Self {
        match &value {
            Value::Array(elements) if elements.iter().all(Value::is_object) => Self::Items(
                elements
                    .iter()
                    .filter_map(Value::as_object)
                    .map(item)
                    .collect(),
            ),
            _ => Self::Raw(value),
        }
    }
}

/// One generated test case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestCase {
    pub test_case_id: String,
    pub title: String,
    pub expected_result: String,
    pub preconditions: Vec<String>,
    pub steps: Vec<String>,
}

impl TestCase {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            test_case_id: field_text(obj, "test_case_id"),
            title: field_text(obj, "title"),
            expected_result: field_text(obj, "expected_result"),
            preconditions: field_list(obj, "preconditions"),
            steps: field_list(obj, "steps"),
        }
    }
}

/// One ISO compliance verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IsoFinding {
    pub test_case_id: String,
    pub compliant: bool,
    pub related_iso_refs: String,
    pub suggestions: String,
    pub missing_elements: String,
    pub req_id: String,
}

impl IsoFinding {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            test_case_id: field_text(obj, "test_case_id"),
            compliant: obj.get("compliant").is_some_and(truthy),
            related_iso_refs: field_text(obj, "related_iso_refs"),
            suggestions: field_text(obj, "suggestions"),
            missing_elements: field_text(obj, "missing_elements"),
            req_id: field_text(obj, "req_id"),
        }
    }

    /// Human-readable verdict.
    #[must_use]
    pub fn verdict(&self) -> &'static str {
        if self.compliant {
            "Compliant ✅"
        } else {
            "❌ Not Compliant"
        }
    }
}

/// A reply from the assistant service, classified once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub kind: ReplyKind,
    /// `answer.text`, when non-blank.
    pub answer: Option<String>,
    pub requirement: Option<Value>,
    pub test_cases: Option<Listing<TestCase>>,
    pub iso_validation: Option<Listing<IsoFinding>>,
}

impl ChatReply {
    /// Classify a decoded response body.
    ///
    /// Precedence: `intent == "general"`, then `requirement`, then
    /// `test_cases`, then `iso_validation`. `null` counts as absent.
    pub fn from_value(value: Value) -> Result<Self, DispatchError> {
        let Value::Object(mut map) = value else {
            return Err(DispatchError::malformed(format!(
                "expected a JSON object, got {}",
                json_type(&value)
            )));
        };

        let general = map.get("intent").and_then(Value::as_str) == Some("general");
        let answer = map
            .get("answer")
            .and_then(|a| a.get("text"))
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(ToString::to_string);
        let requirement = take_present(&mut map, "requirement");
        let test_cases =
            take_present(&mut map, "test_cases").map(|v| Listing::from_value(v, TestCase::from_object));
        let iso_validation = take_present(&mut map, "iso_validation")
            .map(|v| Listing::from_value(v, IsoFinding::from_object));

        let kind = if general {
            ReplyKind::General
        } else if requirement.is_some() {
            ReplyKind::Requirement
        } else if test_cases.is_some() {
            ReplyKind::TestCases
        } else if iso_validation.is_some() {
            ReplyKind::IsoValidation
        } else {
            return Err(DispatchError::malformed(
                "reply has none of intent, requirement, test_cases or iso_validation",
            ));
        };

        Ok(Self {
            kind,
            answer,
            requirement,
            test_cases,
            iso_validation,
        })
    }

    /// Test-case ids in reply order, when the section is a list.
    #[must_use]
    pub fn test_case_ids(&self) -> Vec<&str> {
        match &self.test_cases {
            Some(Listing::Items(items)) => items.iter().map(|tc| tc.test_case_id.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

/// Pretty-print a JSON value the way result sections show it.
#[must_use]
pub fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn take_present(map: &mut Map<String, Value>, key: &str) -> Option<Value> {
    map.remove(key).filter(|v| !v.is_null())
}

fn field_text(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key).map(text_of).unwrap_or_default()
}

fn field_list(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .map(text_of)
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            let text = text_of(other);
            if text.is_empty() { Vec::new() } else { vec![text] }
        }
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(text_of)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "compliant"
        ),
        _ => false,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
