//! Statistics derived from the answer history.
//!
//! Everything here is recomputed from scratch on each call.

use std::collections::{BTreeMap, HashMap};

use crate::models::{AnswerHistory, Question, QuestionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverallStatistic {
    pub correct_count: usize,
    pub wrong_count: usize,
    pub total: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectStatistic {
    pub subject: String,
    pub total_questions: usize,
    /// Raw answer events, so repeated attempts count more than once.
    pub answered_count: usize,
    pub correct_count: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearStatistic {
    pub year: u16,
    pub total_questions: usize,
    pub answered_count: usize,
    /// Answered events relative to the year's question count.
    pub progress: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub overall: OverallStatistic,
    /// Ascending by subject label.
    pub by_subject: Vec<SubjectStatistic>,
    /// Most recent year first.
    pub by_year: Vec<YearStatistic>,
}

/// Performance band used to colour percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Good,
    Fair,
    Poor,
}

impl Grade {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            70.. => Grade::Good,
            50..=69 => Grade::Fair,
            _ => Grade::Poor,
        }
    }
}

/// `100 * part / whole` rounded half up; 0 when `whole` is 0.
pub fn round_percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((200 * part + whole) / (2 * whole)) as u32
}

#[derive(Default)]
struct Tally {
    total: usize,
    answered: usize,
    correct: usize,
}

pub fn aggregate(questions: &[Question], history: &AnswerHistory) -> Statistics {
    let overall = OverallStatistic {
        correct_count: history.correct_count,
        wrong_count: history.wrong_count,
        total: history.total(),
        percentage: round_percentage(history.correct_count, history.total()),
    };

    let by_id: HashMap<&QuestionId, &Question> = questions.iter().map(|q| (&q.id, q)).collect();

    let mut subjects: BTreeMap<&str, Tally> = BTreeMap::new();
    let mut years: BTreeMap<u16, Tally> = BTreeMap::new();
    for question in questions {
        subjects.entry(question.subject.as_str()).or_default().total += 1;
        years.entry(question.year).or_default().total += 1;
    }

    for event in &history.events {
        // Events for questions no longer in the bank only count overall.
        let Some(question) = by_id.get(&event.question_id) else {
            continue;
        };
        if let Some(tally) = subjects.get_mut(question.subject.as_str()) {
            tally.answered += 1;
            if event.was_correct {
                tally.correct += 1;
            }
        }
        if let Some(tally) = years.get_mut(&question.year) {
            tally.answered += 1;
        }
    }

    let by_subject = subjects
        .into_iter()
        .map(|(subject, tally)| SubjectStatistic {
            subject: subject.to_string(),
            total_questions: tally.total,
            answered_count: tally.answered,
            correct_count: tally.correct,
            percentage: round_percentage(tally.correct, tally.answered),
        })
        .collect();

    let by_year = years
        .into_iter()
        .rev()
        .map(|(year, tally)| YearStatistic {
            year,
            total_questions: tally.total,
            answered_count: tally.answered,
            progress: round_percentage(tally.answered, tally.total),
        })
        .collect();

    Statistics {
        overall,
        by_subject,
        by_year,
    }
}
