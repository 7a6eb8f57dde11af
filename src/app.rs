use log::{debug, info, warn};

use crate::cursor::Cursor;
use crate::data::QuestionBank;
use crate::filter::matching_indices;
use crate::models::{AnswerHistory, FilterCriteria, Question, View};
use crate::stats::{Statistics, aggregate};
use crate::store::{DARK_MODE_KEY, KeyValueStore, load_json_or_default, save_json};
use crate::tracker::{AnswerTracker, Reveal};

/// Entry on the home screen that starts a study session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeEntry {
    AllQuestions,
    Subject(String),
    Year(u16),
}

/// Text being typed at the bottom of the screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search(String),
    Jump(String),
}

/// All state of a study session, independent of how it is drawn.
pub struct App<S: KeyValueStore> {
    pub view: View,
    bank: QuestionBank,
    criteria: FilterCriteria,
    filtered: Vec<usize>,
    cursor: Cursor,
    tracker: AnswerTracker<S>,
    home_entries: Vec<HomeEntry>,
    home_cursor: Cursor,
    input: InputMode,
    dark_mode: bool,
    confirming_reset: bool,
    status: Option<String>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(bank: QuestionBank, store: S) -> Self {
        let dark_mode: bool = load_json_or_default(&store, DARK_MODE_KEY);
        let tracker = AnswerTracker::load(store);

        let mut home_entries = vec![HomeEntry::AllQuestions];
        home_entries.extend(bank.subjects().into_iter().map(|s| HomeEntry::Subject(s.to_string())));
        home_entries.extend(bank.years().into_iter().map(HomeEntry::Year));
        let home_cursor = Cursor::new(home_entries.len());

        let criteria = FilterCriteria::default();
        let filtered = matching_indices(bank.questions(), &criteria);
        let cursor = Cursor::new(filtered.len());

        Self {
            view: View::Home,
            bank,
            criteria,
            filtered,
            cursor,
            tracker,
            home_entries,
            home_cursor,
            input: InputMode::Normal,
            dark_mode,
            confirming_reset: false,
            status: None,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn history(&self) -> &AnswerHistory {
        self.tracker.history()
    }

    pub fn revealed(&self) -> Option<&Reveal> {
        self.tracker.revealed()
    }

    pub fn store(&self) -> &S {
        self.tracker.store()
    }

    pub fn statistics(&self) -> Statistics {
        aggregate(self.bank.questions(), self.tracker.history())
    }

    pub fn filtered_questions(&self) -> Vec<&Question> {
        self.filtered
            .iter()
            .filter_map(|&i| self.bank.questions().get(i))
            .collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn current_index(&self) -> usize {
        self.cursor.index()
    }

    /// 1-based position of the current question, `None` when nothing matches.
    pub fn current_position(&self) -> Option<usize> {
        self.cursor.current().map(|i| i + 1)
    }

    pub fn current_question(&self) -> Option<&Question> {
        let position = self.cursor.current()?;
        let index = *self.filtered.get(position)?;
        self.bank.questions().get(index)
    }

    pub fn home_entries(&self) -> &[HomeEntry] {
        &self.home_entries
    }

    pub fn home_selection(&self) -> usize {
        self.home_cursor.index()
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn is_confirming_reset(&self) -> bool {
        self.confirming_reset
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Replaces the active criteria, starting again at the first match.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.filtered = matching_indices(self.bank.questions(), &criteria);
        self.cursor.reset(self.filtered.len());
        self.tracker.conceal();
        debug!(
            "Criteria {:?} match {} questions",
            criteria,
            self.filtered.len()
        );
        self.criteria = criteria;
    }

    pub fn start_study(&mut self, subject: Option<String>, year: Option<u16>) {
        self.set_criteria(FilterCriteria::new(subject, year));
        self.view = View::Questions;
    }

    /// Studies every question whose text mentions `text`.
    pub fn search(&mut self, text: &str) {
        self.set_criteria(FilterCriteria::search(text.trim()));
        self.view = View::Questions;
    }

    /// Narrows to the next subject, wrapping back to all subjects.
    /// The year and the search text are kept.
    pub fn cycle_subject(&mut self) {
        let subjects = self.bank.subjects();
        let subject = next_in_cycle(&subjects, self.criteria.subject.as_deref()).map(str::to_string);
        self.set_criteria(FilterCriteria {
            subject,
            ..self.criteria.clone()
        });
    }

    /// Narrows to the next year, most recent first, wrapping back to all years.
    /// The subject and the search text are kept.
    pub fn cycle_year(&mut self) {
        let year = next_in_cycle(&self.bank.years(), self.criteria.year);
        self.set_criteria(FilterCriteria {
            year,
            ..self.criteria.clone()
        });
    }

    pub fn go_home(&mut self) {
        self.view = View::Home;
        self.confirming_reset = false;
    }

    pub fn show_stats(&mut self) {
        self.view = View::Stats;
    }

    pub fn next_question(&mut self) -> bool {
        self.tracker.conceal();
        self.cursor.next()
    }

    pub fn previous_question(&mut self) -> bool {
        self.tracker.conceal();
        self.cursor.previous()
    }

    /// Jumps to the question at 0-based `index` of the filtered list.
    /// Out-of-range indexes, and the question already shown, leave the
    /// cursor and reveal state untouched.
    pub fn go_to_question(&mut self, index: usize) -> bool {
        if index >= self.cursor.len() || index == self.cursor.index() {
            return false;
        }
        self.tracker.conceal();
        self.cursor.go_to(index)
    }

    /// Answers the current question. Returns true if the answer was recorded.
    ///
    /// Ignored when nothing is selected, when `letter` is not an option of
    /// the question, or while the previous answer is still revealed.
    pub fn submit_answer(&mut self, letter: char) -> bool {
        let Some(question) = self.current_question() else {
            return false;
        };
        if !question.accepts(letter) {
            return false;
        }
        let id = question.id.clone();
        let correct = question.correct_answer;

        match self.tracker.record(id, letter, correct) {
            Ok(event) => event.is_some(),
            Err(e) => {
                warn!("Failed to save answer history: {}", e);
                self.status = Some(format!("Progress not saved: {}", e));
                true
            }
        }
    }

    pub fn home_next(&mut self) {
        self.home_cursor.next();
    }

    pub fn home_previous(&mut self) {
        self.home_cursor.previous();
    }

    pub fn start_selected(&mut self) {
        let Some(entry) = self.home_entries.get(self.home_cursor.index()).cloned() else {
            return;
        };
        match entry {
            HomeEntry::AllQuestions => self.start_study(None, None),
            HomeEntry::Subject(subject) => self.start_study(Some(subject), None),
            HomeEntry::Year(year) => self.start_study(None, Some(year)),
        }
    }

    pub fn begin_search(&mut self) {
        self.input = InputMode::Search(String::new());
    }

    pub fn begin_jump(&mut self) {
        self.input = InputMode::Jump(String::new());
    }

    pub fn input_push(&mut self, c: char) {
        match &mut self.input {
            InputMode::Search(text) => text.push(c),
            InputMode::Jump(text) if c.is_ascii_digit() => text.push(c),
            _ => {}
        }
    }

    pub fn input_pop(&mut self) {
        if let InputMode::Search(text) | InputMode::Jump(text) = &mut self.input {
            text.pop();
        }
    }

    pub fn cancel_input(&mut self) {
        self.input = InputMode::Normal;
    }

    pub fn submit_input(&mut self) {
        match std::mem::take(&mut self.input) {
            InputMode::Normal => {}
            InputMode::Search(text) => {
                if !text.trim().is_empty() {
                    self.search(&text);
                }
            }
            InputMode::Jump(text) => {
                let len = self.filtered_len();
                match text.parse::<usize>().ok().filter(|&n| n > 0 && n <= len) {
                    Some(n) => {
                        self.go_to_question(n - 1);
                    }
                    None => self.status = Some(format!("No question {} (1-{})", text, len)),
                }
            }
        }
    }

    pub fn request_reset(&mut self) {
        self.confirming_reset = true;
    }

    pub fn cancel_reset(&mut self) {
        self.confirming_reset = false;
    }

    /// Wipes the answer history after the user confirmed it.
    pub fn confirm_reset(&mut self) {
        if !self.confirming_reset {
            return;
        }
        self.confirming_reset = false;
        match self.tracker.reset() {
            Ok(()) => self.status = Some("Statistics cleared".to_string()),
            Err(e) => {
                warn!("Failed to save cleared history: {}", e);
                self.status = Some(format!("Statistics cleared but not saved: {}", e));
            }
        }
    }

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
        info!("Dark mode {}", if self.dark_mode { "on" } else { "off" });
        if let Err(e) = save_json(self.tracker.store_mut(), DARK_MODE_KEY, &self.dark_mode) {
            warn!("Failed to save theme preference: {}", e);
        }
    }
}

/// Next entry after `current`; `None` ("all") after the last one.
fn next_in_cycle<T: Copy + PartialEq>(options: &[T], current: Option<T>) -> Option<T> {
    match current.and_then(|c| options.iter().position(|o| *o == c)) {
        Some(i) => options.get(i + 1).copied(),
        None => options.first().copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::tests::{multiple_choice, sample_bank, true_false};
    use crate::models::QuestionId;
    use crate::store::{HISTORY_KEY, MemoryStore};

    fn app() -> App<MemoryStore> {
        App::new(QuestionBank::new(sample_bank()), MemoryStore::new())
    }

    fn current_id(app: &App<MemoryStore>) -> String {
        app.current_question().unwrap().id.to_string()
    }

    #[test]
    fn test_starts_on_home_with_everything_selected() {
        let app = app();
        assert_eq!(app.view, View::Home);
        assert_eq!(app.filtered_len(), 5);
        assert_eq!(app.current_position(), Some(1));
        assert_eq!(
            app.home_entries(),
            &[
                HomeEntry::AllQuestions,
                HomeEntry::Subject("Biologia".to_string()),
                HomeEntry::Subject("Física".to_string()),
                HomeEntry::Subject("História".to_string()),
                HomeEntry::Subject("Matemática".to_string()),
                HomeEntry::Year(2024),
                HomeEntry::Year(2023),
                HomeEntry::Year(2022),
            ]
        );
    }

    #[test]
    fn test_start_study_filters_and_resets_cursor() {
        let mut app = app();
        app.next_question();
        app.next_question();

        app.start_study(Some("Biologia".to_string()), None);
        assert_eq!(app.view, View::Questions);
        assert_eq!(app.current_index(), 0);
        assert_eq!(current_id(&app), "1");
        assert_eq!(app.filtered_len(), 2);

        app.next_question();
        assert_eq!(current_id(&app), "4");
        app.next_question();
        assert_eq!(current_id(&app), "1");
    }

    #[test]
    fn test_changing_criteria_clears_reveal() {
        let mut app = app();
        app.start_study(None, Some(2024));
        assert!(app.submit_answer('C'));
        assert!(app.revealed().is_some());

        app.set_criteria(FilterCriteria::search("energia"));
        assert!(app.revealed().is_none());
        assert_eq!(app.current_index(), 0);
        assert_eq!(current_id(&app), "3");
    }

    #[test]
    fn test_answer_is_recorded_once_per_reveal() {
        let mut app = app();
        app.start_study(None, None);

        assert!(app.submit_answer('c'));
        assert!(!app.submit_answer('E'));
        assert_eq!(app.history().total(), 1);
        assert_eq!(app.history().correct_count, 1);

        app.next_question();
        app.previous_question();
        assert!(app.submit_answer('E'));
        assert_eq!(app.history().total(), 2);
        assert_eq!(app.history().wrong_count, 1);
    }

    #[test]
    fn test_answer_letter_must_be_an_option() {
        let mut app = app();
        app.search("energia");

        assert!(!app.submit_answer('E'));
        assert!(!app.submit_answer('D'));
        assert!(app.submit_answer('B'));
        assert_eq!(app.history().correct_count, 1);
    }

    #[test]
    fn test_empty_selection_degrades_gracefully() {
        let mut app = app();
        app.start_study(None, Some(1990));

        assert_eq!(app.filtered_len(), 0);
        assert!(app.current_question().is_none());
        assert_eq!(app.current_position(), None);
        assert!(!app.next_question());
        assert!(!app.previous_question());
        assert!(!app.go_to_question(0));
        assert!(!app.submit_answer('C'));
        assert_eq!(app.current_index(), 0);
        assert!(app.history().is_empty());
    }

    #[test]
    fn test_out_of_range_jump_keeps_reveal() {
        let mut app = app();
        app.start_study(None, None);
        app.submit_answer('C');

        assert!(!app.go_to_question(5));
        assert!(app.revealed().is_some());
        assert!(app.go_to_question(4));
        assert!(app.revealed().is_none());
        assert_eq!(current_id(&app), "5");
    }

    #[test]
    fn test_jump_to_current_question_keeps_reveal() {
        let mut app = app();
        app.start_study(None, None);
        assert!(app.submit_answer('C'));

        assert!(!app.go_to_question(0));
        assert!(app.revealed().is_some());
        assert!(!app.submit_answer('E'));
        assert_eq!(app.history().events.len(), 1);

        app.begin_jump();
        app.input_push('1');
        app.submit_input();
        assert_eq!(app.status(), None);
        assert!(!app.submit_answer('E'));
        assert_eq!(app.history().events.len(), 1);
    }

    #[test]
    fn test_cycling_one_axis_keeps_the_other() {
        let mut app = app();
        app.start_study(None, Some(2023));
        app.next_question();
        assert!(app.submit_answer('E'));

        app.cycle_subject();
        assert_eq!(
            app.criteria(),
            &FilterCriteria::new(Some("Biologia".to_string()), Some(2023))
        );
        assert_eq!(app.current_index(), 0);
        assert!(app.revealed().is_none());
        assert_eq!(current_id(&app), "4");

        app.cycle_subject();
        app.cycle_subject();
        assert_eq!(app.criteria().subject.as_deref(), Some("História"));
        app.cycle_subject();
        app.cycle_subject();
        assert_eq!(app.criteria(), &FilterCriteria::new(None, Some(2023)));
    }

    #[test]
    fn test_cycling_year_keeps_search_text() {
        let mut app = app();
        app.search("energia");

        app.cycle_year();
        assert_eq!(app.criteria().year, Some(2024));
        assert_eq!(app.criteria().search_text, "energia");
        assert_eq!(app.filtered_len(), 1);

        app.cycle_year();
        assert_eq!(app.criteria().year, Some(2023));
        assert_eq!(app.filtered_len(), 0);
        assert!(app.current_question().is_none());

        app.cycle_year();
        app.cycle_year();
        assert_eq!(app.criteria().year, None);
        assert_eq!(app.filtered_len(), 1);
    }

    #[test]
    fn test_jump_input() {
        let mut app = app();
        app.start_study(None, None);

        app.begin_jump();
        app.input_push('x');
        app.input_push('3');
        app.submit_input();
        assert_eq!(app.input_mode(), &InputMode::Normal);
        assert_eq!(current_id(&app), "3");

        app.begin_jump();
        app.input_push('9');
        app.submit_input();
        assert_eq!(current_id(&app), "3");
        assert!(app.status().unwrap().contains("No question 9"));
    }

    #[test]
    fn test_search_input_starts_study() {
        let mut app = app();
        app.begin_search();
        for c in "HISTÓ".chars() {
            app.input_push(c);
        }
        app.input_pop();
        app.submit_input();

        assert_eq!(app.view, View::Questions);
        assert_eq!(app.criteria().search_text, "HIST");
        assert_eq!(app.filtered_len(), 1);
        assert_eq!(current_id(&app), "2");
    }

    #[test]
    fn test_home_selection_starts_year_study() {
        let mut app = app();
        app.home_previous();
        app.home_previous();
        assert_eq!(app.home_entries()[app.home_selection()], HomeEntry::Year(2023));

        app.start_selected();
        assert_eq!(app.criteria(), &FilterCriteria::new(None, Some(2023)));
        assert_eq!(app.filtered_len(), 2);
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let mut app = app();
        app.start_study(None, None);
        app.submit_answer('C');

        app.confirm_reset();
        assert_eq!(app.history().total(), 1);

        app.request_reset();
        app.cancel_reset();
        app.confirm_reset();
        assert_eq!(app.history().total(), 1);

        app.request_reset();
        app.confirm_reset();
        assert!(app.history().is_empty());
        assert!(!app.is_confirming_reset());
        assert_eq!(app.statistics().overall.percentage, 0);
    }

    #[test]
    fn test_theme_preference_is_saved_and_restored() {
        let mut app = app();
        assert!(!app.dark_mode());
        app.toggle_theme();

        let store = app.store().clone();
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));

        let reopened = App::new(QuestionBank::new(sample_bank()), store);
        assert!(reopened.dark_mode());
    }

    #[test]
    fn test_saved_history_is_loaded_on_start() {
        let mut store = MemoryStore::new();
        store
            .set(HISTORY_KEY, r#"{"correct":1,"wrong":0,"answered":[{"id":2,"correct":true}]}"#)
            .unwrap();
        let bank = QuestionBank::new(vec![
            true_false(1, "Math", 2024, 'C'),
            true_false(2, "History", 2023, 'E'),
            multiple_choice(3, "Math", 2023, &["x", "y"], 'A'),
        ]);

        let app = App::new(bank, store);
        let stats = app.statistics();
        assert_eq!(app.history().events[0].question_id, QuestionId::from(2));
        assert_eq!(stats.by_subject[0].subject, "History");
        assert_eq!(stats.by_subject[0].percentage, 100);
        assert_eq!(stats.by_subject[1].total_questions, 2);
    }
}
