use crate::models::Question;

/// The full, immutable set of questions, in dataset order.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Distinct exam years, most recent first.
    pub fn years(&self) -> Vec<u16> {
        let mut years: Vec<u16> = self.questions.iter().map(|q| q.year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        years
    }

    /// Distinct subjects in ascending order.
    pub fn subjects(&self) -> Vec<&str> {
        let mut subjects: Vec<&str> = self.questions.iter().map(|q| q.subject.as_str()).collect();
        subjects.sort_unstable();
        subjects.dedup();
        subjects
    }

    pub fn count_by_subject(&self, subject: &str) -> usize {
        self.questions.iter().filter(|q| q.subject == subject).count()
    }

    pub fn count_by_year(&self, year: u16) -> usize {
        self.questions.iter().filter(|q| q.year == year).count()
    }
}
