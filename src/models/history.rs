use serde::{Deserialize, Serialize};

use super::QuestionId;

/// One submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEvent {
    #[serde(rename = "id")]
    pub question_id: QuestionId,
    #[serde(rename = "correct")]
    pub was_correct: bool,
}

/// Every answer the user ever submitted, plus running totals.
///
/// Serialized as `{"correct": n, "wrong": n, "answered": [...]}` so existing
/// saved progress keeps loading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerHistory {
    #[serde(rename = "correct")]
    pub correct_count: usize,
    #[serde(rename = "wrong")]
    pub wrong_count: usize,
    #[serde(rename = "answered")]
    pub events: Vec<AnswerEvent>,
}

impl AnswerHistory {
    pub fn total(&self) -> usize {
        self.correct_count + self.wrong_count
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.total() == 0
    }

    pub fn push(&mut self, event: AnswerEvent) {
        if event.was_correct {
            self.correct_count += 1;
        } else {
            self.wrong_count += 1;
        }
        self.events.push(event);
    }
}
