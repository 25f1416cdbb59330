//! Feature encoding: one response → one numeric vector.
//!
//! Each question contributes exactly one scalar, in schema order:
//!
//! | Type | Value | Default |
//! |------|-------|---------|
//! | integer | the number | `0` |
//! | single | 0-based index of the option | `-1` (missing or not an option) |
//! | multiple | number of selected options | `0` |
//! | text | length in characters | `0` |
//!
//! Text length counts Unicode scalar values, not UTF-16 code units: a
//! character outside the Basic Multilingual Plane (most emoji) counts as 1
//! here where a UTF-16 `length` would report 2.
//!
//! The schema is checked once in [`FeatureEncoder::new`]; an unrecognized
//! question type fails there rather than being defaulted.

use crate::error::Result;
use crate::survey::{Answer, Question, QuestionType, Response, Survey};
use tracing::trace;

/// Ordered per-question features of one response.
pub type FeatureVector = Vec<f64>;

/// Encoder bound to one survey schema.
#[derive(Debug, Clone)]
pub struct FeatureEncoder<'a> {
    questions: Vec<(&'a Question, QuestionType)>,
}

impl<'a> FeatureEncoder<'a> {
    /// Validate the schema and build an encoder for it.
    pub fn new(survey: &'a Survey) -> Result<Self> {
        Self::from_questions(&survey.questions)
    }

    /// Build an encoder over an explicit question list.
    pub fn from_questions(questions: &'a [Question]) -> Result<Self> {
        let questions = questions
            .iter()
            .map(|q| q.question_type().map(|kind| (q, kind)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { questions })
    }

    /// Length of every vector this encoder produces.
    pub fn dimension(&self) -> usize {
        self.questions.len()
    }

    /// Encode one response.
    pub fn encode(&self, response: &Response) -> FeatureVector {
        self.questions
            .iter()
            .map(|&(question, kind)| {
                let answer = response.answers.get(&question.id).and_then(|raw| {
                    let resolved = Answer::resolve(kind, raw);
                    if resolved.is_none() {
                        trace!(
                            response = %response.id,
                            question = %question.id,
                            %kind,
                            "answer shape does not match question type, using default"
                        );
                    }
                    resolved
                });
                encode_answer(question, kind, answer.as_ref())
            })
            .collect()
    }

    /// Encode every response, preserving order.
    pub fn encode_all(&self, responses: &[Response]) -> Vec<FeatureVector> {
        responses.iter().map(|r| self.encode(r)).collect()
    }
}

fn encode_answer(question: &Question, kind: QuestionType, answer: Option<&Answer>) -> f64 {
    match (kind, answer) {
        (QuestionType::Integer, Some(Answer::Integer(v))) => *v,
        (QuestionType::Integer, _) => 0.0,
        (QuestionType::Single, Some(Answer::Single(choice))) => question
            .options
            .iter()
            .position(|opt| opt == choice)
            .map_or(-1.0, |idx| idx as f64),
        (QuestionType::Single, _) => -1.0,
        (QuestionType::Multiple, Some(Answer::Multiple(selected))) => selected.len() as f64,
        (QuestionType::Multiple, _) => 0.0,
        (QuestionType::Text, Some(Answer::Text(text))) => text.chars().count() as f64,
        (QuestionType::Text, _) => 0.0,
    }
}
