//! # pas-study
//!
//! Exam-preparation question bank with answer tracking and statistics,
//! plus a terminal front end.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pas_study::{FileStore, Study, StudyError};
//!
//! fn main() -> Result<(), StudyError> {
//!     // Progress is kept in ./progress between runs
//!     let store = FileStore::open("progress")?;
//!     let study = Study::from_json("questions.json", store)?;
//!
//!     // Run the study session in the terminal
//!     study.run()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! The core can also be driven without a terminal:
//!
//! ```rust
//! use pas_study::{FilterCriteria, MemoryStore, AnswerTracker, QuestionId, filter};
//!
//! let mut tracker = AnswerTracker::load(MemoryStore::new());
//! tracker.record(QuestionId::from(1), 'C', 'C').unwrap();
//! assert_eq!(tracker.history().correct_count, 1);
//! assert!(filter(&[], &FilterCriteria::default()).is_empty());
//! ```

mod app;
mod cursor;
mod data;
mod filter;
mod models;
mod stats;
mod store;
pub mod terminal;
mod tracker;
mod ui;

use std::io;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;

pub use app::{App, HomeEntry, InputMode};
pub use cursor::Cursor;
pub use data::{LoadError, QuestionBank, load_questions_from_json};
pub use filter::{filter, matching_indices};
pub use models::{
    Alternative, AnswerEvent, AnswerHistory, FilterCriteria, InvalidQuestion, Question,
    QuestionId, QuestionKind, QuestionRecord, TRUE_FALSE_LETTERS, View,
};
pub use stats::{
    Grade, OverallStatistic, Statistics, SubjectStatistic, YearStatistic, aggregate,
    round_percentage,
};
pub use store::{
    DARK_MODE_KEY, FileStore, HISTORY_KEY, KeyValueStore, MemoryStore, StoreError,
    default_data_dir,
};
pub use tracker::{AnswerTracker, Reveal};

/// Error type for study operations.
#[derive(Debug, Error)]
pub enum StudyError {
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A study session that can be run in the terminal.
pub struct Study<S: KeyValueStore> {
    app: App<S>,
}

impl<S: KeyValueStore> Study<S> {
    /// Create a session over an already loaded bank, restoring progress from `store`.
    pub fn new(bank: QuestionBank, store: S) -> Self {
        Self {
            app: App::new(bank, store),
        }
    }

    /// Load the question bank from a JSON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSON file containing questions.
    /// * `store` - Where answer history and preferences are kept.
    pub fn from_json<P: AsRef<Path>>(path: P, store: S) -> Result<Self, StudyError> {
        let bank = load_questions_from_json(path)?;
        Ok(Self::new(bank, store))
    }

    /// Run the session in the terminal.
    ///
    /// This will take over the terminal and return when the user quits.
    pub fn run(mut self) -> Result<(), StudyError> {
        let mut term = terminal::TerminalGuard::enter()?;
        run_event_loop(&mut term, &mut self.app)
    }

    pub fn app(&self) -> &App<S> {
        &self.app
    }
}

fn run_event_loop<S: KeyValueStore>(
    terminal: &mut terminal::AppTerminal,
    app: &mut App<S>,
) -> Result<(), StudyError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    log::info!("Session ended");
    Ok(())
}

/// Returns true if the app should exit.
fn handle_input<S: KeyValueStore>(app: &mut App<S>, key: KeyCode) -> bool {
    if !matches!(app.input_mode(), InputMode::Normal) {
        handle_text_input(app, key);
        return false;
    }
    if app.is_confirming_reset() {
        handle_confirm_input(app, key);
        return false;
    }

    app.clear_status();
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        KeyCode::Char('/') => {
            app.begin_search();
            return false;
        }
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.toggle_theme();
            return false;
        }
        _ => {}
    }

    match app.view {
        View::Home => handle_home_input(app, key),
        View::Questions => handle_questions_input(app, key),
        View::Stats => handle_stats_input(app, key),
    }
    false
}

fn handle_text_input<S: KeyValueStore>(app: &mut App<S>, key: KeyCode) {
    match key {
        KeyCode::Enter => app.submit_input(),
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Backspace => app.input_pop(),
        KeyCode::Char(c) => app.input_push(c),
        _ => {}
    }
}

fn handle_confirm_input<S: KeyValueStore>(app: &mut App<S>, key: KeyCode) {
    match key {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_reset(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_reset(),
        _ => {}
    }
}

fn handle_home_input<S: KeyValueStore>(app: &mut App<S>, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.home_next(),
        KeyCode::Up | KeyCode::Char('k') => app.home_previous(),
        KeyCode::Enter => app.start_selected(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.show_stats(),
        _ => {}
    }
}

fn handle_questions_input<S: KeyValueStore>(app: &mut App<S>, key: KeyCode) {
    match key {
        KeyCode::Right | KeyCode::Char('l') => {
            app.next_question();
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.previous_question();
        }
        KeyCode::Home => {
            app.go_to_question(0);
        }
        KeyCode::End => {
            app.go_to_question(app.filtered_len().saturating_sub(1));
        }
        KeyCode::Char('g') => app.begin_jump(),
        KeyCode::Char('m') => app.cycle_subject(),
        KeyCode::Char('y') => app.cycle_year(),
        KeyCode::Char('s') => app.show_stats(),
        KeyCode::Esc => app.go_home(),
        KeyCode::Char(c) if c.is_ascii_alphabetic() => {
            app.submit_answer(c);
        }
        _ => {}
    }
}

fn handle_stats_input<S: KeyValueStore>(app: &mut App<S>, key: KeyCode) {
    match key {
        KeyCode::Char('r') | KeyCode::Char('R') => app.request_reset(),
        KeyCode::Esc => app.go_home(),
        _ => {}
    }
}
