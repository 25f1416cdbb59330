//! Survey schema and response data model.
//!
//! Questions carry their type as a plain name so that an unrecognized type
//! surfaces as [`Error::UnknownQuestionType`] when the schema is encoded,
//! instead of being defaulted away during deserialization.
//!
//! Raw answers arrive as JSON values whose shape depends on the question
//! type. [`Answer::resolve`] turns one of them into the typed [`Answer`]
//! union exactly once, before vectorization.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Recognized question types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Free text.
    Text,
    /// Numeric answer.
    Integer,
    /// Exactly one option.
    Single,
    /// Any subset of the options.
    Multiple,
}

impl QuestionType {
    /// Name used in survey schemas.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::Integer => "integer",
            QuestionType::Single => "single",
            QuestionType::Multiple => "multiple",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "text" => Ok(QuestionType::Text),
            "integer" => Ok(QuestionType::Integer),
            "single" => Ok(QuestionType::Single),
            "multiple" => Ok(QuestionType::Multiple),
            _ => Err(()),
        }
    }
}

/// One question of a survey schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique key within the survey.
    pub id: String,
    /// Declared type name.
    #[serde(rename = "type")]
    pub kind: String,
    /// Ordered choice labels (single/multiple only).
    #[serde(default)]
    pub options: Vec<String>,
}

impl Question {
    /// Create a question with no options.
    pub fn new(id: impl Into<String>, kind: QuestionType) -> Self {
        Self {
            id: id.into(),
            kind: kind.as_str().to_string(),
            options: Vec::new(),
        }
    }

    /// Set the choice labels.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Parse the declared type.
    pub fn question_type(&self) -> Result<QuestionType> {
        self.kind
            .parse()
            .map_err(|()| Error::UnknownQuestionType {
                question_id: self.id.clone(),
                type_name: self.kind.clone(),
            })
    }
}

/// Survey schema: an id and its questions in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    /// Survey identifier.
    pub id: String,
    /// Questions in schema order.
    pub questions: Vec<Question>,
}

impl Survey {
    /// Create a survey.
    pub fn new(id: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            id: id.into(),
            questions,
        }
    }
}

/// One respondent's answers, keyed by question id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Response identifier.
    pub id: String,
    /// Survey this response belongs to.
    pub survey_id: String,
    /// Raw answers as delivered by the caller.
    #[serde(default)]
    pub answers: HashMap<String, Value>,
}

impl Response {
    /// Create a response with no answers.
    pub fn new(id: impl Into<String>, survey_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            survey_id: survey_id.into(),
            answers: HashMap::new(),
        }
    }

    /// Add a raw answer.
    pub fn with_answer(mut self, question_id: impl Into<String>, value: impl Into<Value>) -> Self {
        let _ = self.answers.insert(question_id.into(), value.into());
        self
    }
}

/// Typed answer, resolved from a raw value given its question's type.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Free text.
    Text(String),
    /// Numeric value.
    Integer(f64),
    /// Selected option label.
    Single(String),
    /// Selected option labels.
    Multiple(Vec<String>),
}

impl Answer {
    /// Resolve a raw answer for a question of type `kind`.
    ///
    /// Returns `None` when the value's shape does not fit the type; the
    /// encoder then applies that type's default.
    pub fn resolve(kind: QuestionType, raw: &Value) -> Option<Answer> {
        match (kind, raw) {
            (QuestionType::Integer, Value::Number(n)) => n.as_f64().map(Answer::Integer),
            (QuestionType::Integer, Value::String(s)) => {
                s.trim().parse::<f64>().ok().filter(|v| v.is_finite()).map(Answer::Integer)
            }
            (QuestionType::Text, Value::String(s)) => Some(Answer::Text(s.clone())),
            (QuestionType::Single, Value::String(s)) => Some(Answer::Single(s.clone())),
            (QuestionType::Multiple, Value::Array(items)) => Some(Answer::Multiple(
                items
                    .iter()
                    .map(|v| match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_question_type_roundtrip_names() {
        for kind in [
            QuestionType::Text,
            QuestionType::Integer,
            QuestionType::Single,
            QuestionType::Multiple,
        ] {
            assert_eq!(kind.as_str().parse::<QuestionType>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_question_type_rejected() {
        let q = Question {
            id: "q9".into(),
            kind: "slider".into(),
            options: vec![],
        };
        assert_eq!(
            q.question_type(),
            Err(Error::UnknownQuestionType {
                question_id: "q9".into(),
                type_name: "slider".into(),
            })
        );
    }

    #[test]
    fn test_resolve_integer_accepts_numeric_strings() {
        assert_eq!(
            Answer::resolve(QuestionType::Integer, &json!(" 42 ")),
            Some(Answer::Integer(42.0))
        );
        assert_eq!(Answer::resolve(QuestionType::Integer, &json!("abc")), None);
        assert_eq!(Answer::resolve(QuestionType::Integer, &json!(true)), None);
    }

    #[test]
    fn test_resolve_shape_mismatch_is_missing() {
        assert_eq!(Answer::resolve(QuestionType::Text, &json!(12)), None);
        assert_eq!(Answer::resolve(QuestionType::Single, &json!(["A"])), None);
        assert_eq!(Answer::resolve(QuestionType::Multiple, &json!("A")), None);
    }

    #[test]
    fn test_resolve_multiple_keeps_every_element() {
        assert_eq!(
            Answer::resolve(QuestionType::Multiple, &json!(["A", 2, null])),
            Some(Answer::Multiple(vec!["A".into(), "2".into(), "null".into()]))
        );
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let survey: Survey = serde_json::from_value(json!({
            "id": "s1",
            "questions": [
                {"id": "q1", "type": "single", "options": ["A", "B"]},
                {"id": "q2", "type": "text"}
            ]
        }))
        .unwrap();
        assert_eq!(survey.questions[1].options, Vec::<String>::new());

        let response: Response = serde_json::from_value(json!({
            "id": "r1",
            "surveyId": "s1",
            "answers": {"q1": "B", "q2": "hello"}
        }))
        .unwrap();
        assert_eq!(response.survey_id, "s1");
        assert_eq!(response.answers["q1"], json!("B"));
    }
}
