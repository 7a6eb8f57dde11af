use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::models::{Question, QuestionId};

use super::QuestionBank;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} must contain at least one question")]
    Empty(PathBuf),

    #[error("{path}: question id {id} appears more than once")]
    DuplicateId { path: PathBuf, id: QuestionId },
}

/// Loads and validates a JSON array of questions.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<QuestionBank, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let bank = parse_questions(&json_content, path)?;
    info!("Loaded {} questions from {}", bank.len(), path.display());
    Ok(bank)
}

fn parse_questions(json: &str, path: &Path) -> Result<QuestionBank, LoadError> {
    let questions: Vec<Question> = serde_json::from_str(json).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if questions.is_empty() {
        return Err(LoadError::Empty(path.to_path_buf()));
    }

    let mut seen: HashSet<&QuestionId> = HashSet::with_capacity(questions.len());
    for question in &questions {
        if !seen.insert(&question.id) {
            return Err(LoadError::DuplicateId {
                path: path.to_path_buf(),
                id: question.id.clone(),
            });
        }
    }

    Ok(QuestionBank::new(questions))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"[
        {"id": 1, "year": 2024, "subject": "Biologia", "questionNumber": 1, "type": "C",
         "statement": "Mitocôndrias produzem ATP.", "correctAnswer": "C"},
        {"id": 2, "year": 2023, "subject": "Química", "questionNumber": 12, "type": "A",
         "statement": "Qual é o símbolo do sódio?",
         "alternatives": [{"letter": "A", "text": "S"}, {"letter": "B", "text": "Na"},
                          {"letter": "C", "text": "So"}, {"letter": "D", "text": "N"}],
         "correctAnswer": "B"}
    ]"#;

    fn parse(json: &str) -> Result<QuestionBank, LoadError> {
        parse_questions(json, Path::new("questions.json"))
    }

    #[test]
    fn test_parse_dataset() {
        let bank = parse(DATASET).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.questions()[1].options(), vec!['A', 'B', 'C', 'D']);
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        assert!(matches!(parse("[]"), Err(LoadError::Empty(_))));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let json = r#"[
            {"id": 1, "year": 2024, "subject": "A", "type": "C", "correctAnswer": "C"},
            {"id": "1", "year": 2023, "subject": "B", "type": "C", "correctAnswer": "E"}
        ]"#;
        assert!(matches!(parse(json), Err(LoadError::DuplicateId { .. })));
    }

    #[test]
    fn test_invalid_question_is_a_parse_error() {
        let json = r#"[{"id": 1, "year": 2024, "subject": "A", "type": "C", "correctAnswer": "B"}]"#;
        assert!(matches!(parse(json), Err(LoadError::Parse { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = load_questions_from_json("/definitely/not/here/questions.json");
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
