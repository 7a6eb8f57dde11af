//! Question filtering by year, subject and free-text search.

use crate::models::{FilterCriteria, Question};

impl FilterCriteria {
    /// Returns true if `question` passes the year, subject and search clauses.
    pub fn matches(&self, question: &Question) -> bool {
        if self.year.is_some_and(|year| question.year != year) {
            return false;
        }
        if self
            .subject
            .as_deref()
            .is_some_and(|subject| question.subject != subject)
        {
            return false;
        }
        if self.search_text.is_empty() {
            return true;
        }

        let needle = self.search_text.to_lowercase();
        question.statement.to_lowercase().contains(&needle)
            || question.subject.to_lowercase().contains(&needle)
            || question
                .alternatives()
                .iter()
                .any(|alt| alt.text.to_lowercase().contains(&needle))
    }
}

/// Questions matching `criteria`, in bank order.
pub fn filter<'a>(questions: &'a [Question], criteria: &FilterCriteria) -> Vec<&'a Question> {
    questions.iter().filter(|q| criteria.matches(q)).collect()
}

/// Positions in `questions` of the questions matching `criteria`, ascending.
pub fn matching_indices(questions: &[Question], criteria: &FilterCriteria) -> Vec<usize> {
    questions
        .iter()
        .enumerate()
        .filter(|(_, q)| criteria.matches(q))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Alternative, QuestionId, QuestionKind};

    pub fn true_false(id: u64, subject: &str, year: u16, correct: char) -> Question {
        Question {
            id: QuestionId::from(id),
            year,
            subject: subject.to_string(),
            question_number: id as u32,
            statement: format!("Afirmação {}", id),
            image_url: None,
            kind: QuestionKind::TrueFalse,
            correct_answer: correct,
        }
    }

    pub fn multiple_choice(id: u64, subject: &str, year: u16, texts: &[&str], correct: char) -> Question {
        let alternatives = texts
            .iter()
            .zip('A'..='E')
            .map(|(text, letter)| Alternative {
                letter,
                text: text.to_string(),
            })
            .collect();
        Question {
            id: QuestionId::from(id),
            year,
            subject: subject.to_string(),
            question_number: id as u32,
            statement: format!("Questão {}", id),
            image_url: None,
            kind: QuestionKind::MultipleChoice { alternatives },
            correct_answer: correct,
        }
    }

    pub fn sample_bank() -> Vec<Question> {
        let mut photosynthesis = true_false(1, "Biologia", 2024, 'C');
        photosynthesis.statement = "A FOTOSSÍNTESE ocorre nos cloroplastos.".to_string();
        vec![
            photosynthesis,
            true_false(2, "História", 2023, 'E'),
            multiple_choice(3, "Física", 2024, &["inércia", "Energia cinética", "atrito"], 'B'),
            true_false(4, "Biologia", 2023, 'E'),
            true_false(5, "Matemática", 2022, 'C'),
        ]
    }

    fn ids(questions: &[&Question]) -> Vec<String> {
        questions.iter().map(|q| q.id.to_string()).collect()
    }

    #[test]
    fn test_default_criteria_keep_everything() {
        let bank = sample_bank();
        let result = filter(&bank, &FilterCriteria::default());
        assert_eq!(ids(&result), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_filter_by_year() {
        let bank = sample_bank();
        let criteria = FilterCriteria::new(None, Some(2024));
        assert_eq!(ids(&filter(&bank, &criteria)), vec!["1", "3"]);
    }

    #[test]
    fn test_filter_by_subject_is_case_sensitive() {
        let bank = sample_bank();
        let criteria = FilterCriteria::new(Some("Biologia".to_string()), None);
        assert_eq!(ids(&filter(&bank, &criteria)), vec!["1", "4"]);

        let criteria = FilterCriteria::new(Some("biologia".to_string()), None);
        assert!(filter(&bank, &criteria).is_empty());
    }

    #[test]
    fn test_search_ignores_case_across_fields() {
        let bank = sample_bank();

        // statement
        let result = filter(&bank, &FilterCriteria::search("fotossíntese"));
        assert_eq!(ids(&result), vec!["1"]);

        // subject
        let result = filter(&bank, &FilterCriteria::search("HIST"));
        assert_eq!(ids(&result), vec!["2"]);

        // alternative text
        let result = filter(&bank, &FilterCriteria::search("energia"));
        assert_eq!(ids(&result), vec!["3"]);
    }

    #[test]
    fn test_clauses_are_combined() {
        let bank = sample_bank();
        let criteria = FilterCriteria {
            year: Some(2023),
            subject: Some("Biologia".to_string()),
            search_text: "afirmação".to_string(),
        };
        assert_eq!(ids(&filter(&bank, &criteria)), vec!["4"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let bank = sample_bank();
        let criteria = FilterCriteria::new(None, Some(1999));
        assert!(filter(&bank, &criteria).is_empty());
        assert!(matching_indices(&bank, &criteria).is_empty());
    }

    #[test]
    fn test_result_partitions_bank_in_order() {
        let bank = sample_bank();
        let all_criteria = [
            FilterCriteria::default(),
            FilterCriteria::new(Some("Biologia".to_string()), Some(2024)),
            FilterCriteria::new(None, Some(2023)),
            FilterCriteria::search("ã"),
            FilterCriteria::search("zzz"),
        ];

        for criteria in &all_criteria {
            let indices = matching_indices(&bank, criteria);
            assert!(indices.windows(2).all(|w| w[0] < w[1]));
            for (i, question) in bank.iter().enumerate() {
                assert_eq!(indices.contains(&i), criteria.matches(question));
            }
            assert_eq!(filter(&bank, criteria).len(), indices.len());
        }
    }
}
