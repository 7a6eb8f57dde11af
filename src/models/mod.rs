mod criteria;
mod history;
mod question;

pub use criteria::FilterCriteria;
pub use history::{AnswerEvent, AnswerHistory};
pub use question::{
    Alternative, InvalidQuestion, Question, QuestionId, QuestionKind, QuestionRecord,
    TRUE_FALSE_LETTERS,
};

/// Screen the study app is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Questions,
    Stats,
}
