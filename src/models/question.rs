use std::fmt;

use serde::{Deserialize, Serialize};

/// Letters offered by every true/false question: "Certo" and "Errado".
pub const TRUE_FALSE_LETTERS: [char; 2] = ['C', 'E'];

/// Stable question identifier.
///
/// Datasets spell ids either as JSON numbers or strings; both forms are kept
/// as text so `1` and `"1"` name the same question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct QuestionId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl From<RawId> for QuestionId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        }
    }
}

impl From<QuestionId> for String {
    fn from(id: QuestionId) -> Self {
        id.0
    }
}

impl From<u64> for QuestionId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl QuestionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Alternative {
    pub letter: char,
    pub text: String,
}

/// Answer format of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    TrueFalse,
    MultipleChoice { alternatives: Vec<Alternative> },
}

/// A single exam question. Built only through validation, so the answer
/// key always names one of the question's options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "QuestionRecord")]
pub struct Question {
    pub id: QuestionId,
    pub year: u16,
    pub subject: String,
    pub question_number: u32,
    pub statement: String,
    pub image_url: Option<String>,
    pub kind: QuestionKind,
    pub correct_answer: char,
}

/// Why a dataset record could not become a [`Question`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidQuestion {
    #[error("question {id}: unknown type {kind:?} (expected \"C\" or \"A\")")]
    UnknownType { id: QuestionId, kind: String },

    #[error("question {id}: multiple choice question without alternatives")]
    MissingAlternatives { id: QuestionId },

    #[error("question {id}: alternative letter {letter} appears more than once")]
    DuplicateLetter { id: QuestionId, letter: char },

    #[error("question {id}: correct answer {answer:?} is not one of its options")]
    AnswerNotAnOption { id: QuestionId, answer: String },
}

/// Question as it appears in the dataset file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub year: u16,
    pub subject: String,
    #[serde(default)]
    pub question_number: u32,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub statement: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub alternatives: Option<Vec<Alternative>>,
    pub correct_answer: String,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = InvalidQuestion;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        let id = record.id;
        let kind = match record.kind.as_str() {
            "C" => QuestionKind::TrueFalse,
            "A" => {
                let alternatives = match record.alternatives {
                    Some(alternatives) if !alternatives.is_empty() => alternatives,
                    _ => return Err(InvalidQuestion::MissingAlternatives { id }),
                };
                for (i, alt) in alternatives.iter().enumerate() {
                    if alternatives[..i].iter().any(|a| a.letter == alt.letter) {
                        return Err(InvalidQuestion::DuplicateLetter {
                            id,
                            letter: alt.letter,
                        });
                    }
                }
                QuestionKind::MultipleChoice { alternatives }
            }
            other => {
                return Err(InvalidQuestion::UnknownType {
                    id,
                    kind: other.to_string(),
                });
            }
        };

        let mut chars = record.correct_answer.trim().chars();
        let correct_answer = match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_ascii_uppercase(),
            _ => {
                return Err(InvalidQuestion::AnswerNotAnOption {
                    id,
                    answer: record.correct_answer,
                });
            }
        };

        let question = Question {
            id,
            year: record.year,
            subject: record.subject,
            question_number: record.question_number,
            statement: record.statement,
            image_url: record.image_url,
            kind,
            correct_answer,
        };

        if !question.accepts(correct_answer) {
            return Err(InvalidQuestion::AnswerNotAnOption {
                id: question.id,
                answer: record.correct_answer,
            });
        }

        Ok(question)
    }
}

impl Question {
    /// Alternatives of a multiple choice question; empty for true/false.
    pub fn alternatives(&self) -> &[Alternative] {
        match &self.kind {
            QuestionKind::TrueFalse => &[],
            QuestionKind::MultipleChoice { alternatives } => alternatives,
        }
    }

    /// Letters that can be submitted as an answer, in display order.
    pub fn options(&self) -> Vec<char> {
        match &self.kind {
            QuestionKind::TrueFalse => TRUE_FALSE_LETTERS.to_vec(),
            QuestionKind::MultipleChoice { alternatives } => {
                alternatives.iter().map(|a| a.letter).collect()
            }
        }
    }

    pub fn accepts(&self, letter: char) -> bool {
        let letter = letter.to_ascii_uppercase();
        match &self.kind {
            QuestionKind::TrueFalse => TRUE_FALSE_LETTERS.contains(&letter),
            QuestionKind::MultipleChoice { alternatives } => alternatives
                .iter()
                .any(|a| a.letter.to_ascii_uppercase() == letter),
        }
    }

    pub fn is_correct(&self, letter: char) -> bool {
        letter.to_ascii_uppercase() == self.correct_answer
    }

    /// Human readable label for an answer letter of this question.
    pub fn answer_label(&self, letter: char) -> String {
        match (&self.kind, letter.to_ascii_uppercase()) {
            (QuestionKind::TrueFalse, 'C') => "CERTO".to_string(),
            (QuestionKind::TrueFalse, 'E') => "ERRADO".to_string(),
            (_, other) => other.to_string(),
        }
    }
}
