//! Answer tracking and persistence of the answer history.

use log::{debug, info};

use crate::models::{AnswerEvent, AnswerHistory, QuestionId};
use crate::store::{HISTORY_KEY, KeyValueStore, StoreError, load_json_or_default, save_json};

/// The answer currently shown to the user, between submitting and moving on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    pub question_id: QuestionId,
    pub submitted: char,
    pub correct: char,
}

impl Reveal {
    pub fn was_correct(&self) -> bool {
        self.submitted == self.correct
    }
}

/// Owns the answer history and writes it through to the store on every change.
pub struct AnswerTracker<S: KeyValueStore> {
    store: S,
    history: AnswerHistory,
    revealed: Option<Reveal>,
}

impl<S: KeyValueStore> AnswerTracker<S> {
    /// Loads saved history from `store`, starting empty if there is none or
    /// it cannot be read.
    pub fn load(store: S) -> Self {
        let history: AnswerHistory = load_json_or_default(&store, HISTORY_KEY);
        info!(
            "Loaded answer history: {} correct, {} wrong, {} events",
            history.correct_count,
            history.wrong_count,
            history.events.len()
        );

        Self {
            store,
            history,
            revealed: None,
        }
    }

    pub fn history(&self) -> &AnswerHistory {
        &self.history
    }

    pub fn revealed(&self) -> Option<&Reveal> {
        self.revealed.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Records an answer and reveals it.
    ///
    /// While an answer is revealed further submissions are ignored and return
    /// `Ok(None)`. The in-memory history is updated even if saving fails.
    pub fn record(
        &mut self,
        question_id: QuestionId,
        submitted: char,
        correct: char,
    ) -> Result<Option<AnswerEvent>, StoreError> {
        if self.revealed.is_some() {
            debug!("Ignoring answer for {} while a result is shown", question_id);
            return Ok(None);
        }

        let submitted = submitted.to_ascii_uppercase();
        let correct = correct.to_ascii_uppercase();
        let event = AnswerEvent {
            question_id: question_id.clone(),
            was_correct: submitted == correct,
        };

        self.history.push(event.clone());
        self.revealed = Some(Reveal {
            question_id,
            submitted,
            correct,
        });
        debug!(
            "Recorded answer {} for {} (correct: {})",
            submitted, event.question_id, event.was_correct
        );

        self.persist()?;
        Ok(Some(event))
    }

    /// Ends the current reveal cycle so the next question can be answered.
    pub fn conceal(&mut self) {
        self.revealed = None;
    }

    /// Wipes all recorded answers. Irreversible.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        info!(
            "Resetting answer history ({} events discarded)",
            self.history.events.len()
        );
        self.history = AnswerHistory::default();
        self.revealed = None;
        self.persist()
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        save_json(&mut self.store, HISTORY_KEY, &self.history)
    }
}
