//! Quiz entities and the sanitization rules applied to model output
//!
//! A language model is asked for `{"questions": [...]}` but may return any
//! shape. [`QuizSet::from_model_output`] coerces whatever arrives into a
//! structurally valid set; it only gives up when `questions` is not an array.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value_objects::QuestionCount;

/// Most options a question may carry after sanitization
pub const MAX_OPTIONS: usize = 4;

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// Question identifier (model-supplied or 1-based position)
    pub id: String,
    /// Question text
    pub question: String,
    /// Answer choices, at most [`MAX_OPTIONS`]
    pub options: Vec<String>,
    /// Index into `options`
    pub correct_answer: usize,
    /// Why the correct answer is correct
    pub explanation: String,
}

impl QuizQuestion {
    /// Coerce one raw array element into a question
    ///
    /// `position` is the zero-based index of the element and supplies the id
    /// when the model omitted one.
    pub fn sanitize(raw: &Value, position: usize) -> Self {
        let options: Vec<String> = match raw.get("options") {
            Some(Value::Array(items)) => items
                .iter()
                .take(MAX_OPTIONS)
                .map(|item| coerce_string(item).unwrap_or_default())
                .collect(),
            _ => Vec::new(),
        };

        let correct_answer = raw
            .get("correctAnswer")
            .and_then(whole_number)
            .and_then(|index| usize::try_from(index).ok())
            .filter(|&index| index < options.len().max(1))
            .unwrap_or(0);

        Self {
            id: raw
                .get("id")
                .and_then(coerce_string)
                .unwrap_or_else(|| (position + 1).to_string()),
            question: raw
                .get("question")
                .and_then(coerce_string)
                .unwrap_or_default(),
            options,
            correct_answer,
            explanation: raw
                .get("explanation")
                .and_then(coerce_string)
                .unwrap_or_default(),
        }
    }
}

/// An ordered set of questions generated for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSet {
    /// Questions in model order, never more than `requested_count`
    pub questions: Vec<QuizQuestion>,
    /// Size the client asked for (after clamping)
    #[serde(skip)]
    pub requested_count: QuestionCount,
}

impl QuizSet {
    /// Sanitize parsed model output
    ///
    /// Returns `None` when the value has no `questions` array; every other
    /// defect is repaired rather than rejected.
    pub fn from_model_output(parsed: &Value, requested_count: QuestionCount) -> Option<Self> {
        let Value::Array(items) = parsed.get("questions")? else {
            return None;
        };

        let questions = items
            .iter()
            .take(requested_count.as_usize())
            .enumerate()
            .map(|(position, raw)| QuizQuestion::sanitize(raw, position))
            .collect();

        Some(Self {
            questions,
            requested_count,
        })
    }

    /// Number of questions in the set
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the model produced no questions
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Stringify a JSON value; `null` counts as absent
fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Accept integral JSON numbers, including floats such as `2.0`
fn whole_number(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    if !f.is_finite() || f.fract() != 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let whole = f as i64;
    Some(whole)
}
