mod bank;
mod loader;

pub use bank::QuestionBank;
pub use loader::{LoadError, load_questions_from_json};
