use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::QuestionBank;
use storage::{QuizSnapshot, SnapshotStore};

use crate::error::QuizError;
use crate::quiz::controller::QuizController;
use crate::quiz::progress::QuizProgress;
use crate::quiz::protocol::{QuizIntent, QuizSignal};

/// Orchestrates a quiz against a snapshot store: intent routing plus
/// suspend/resume.
///
/// The display layer talks to this and nothing else. Each intent maps
/// to an ordered signal list, including the input-enabled handshake:
/// an accepted answer disables input, navigation re-enables it.
pub struct QuizLoopService {
    controller: QuizController,
    store: Arc<dyn SnapshotStore>,
    clock: Clock,
}

impl std::fmt::Debug for QuizLoopService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizLoopService")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl QuizLoopService {
    /// Start over `bank`, resuming from a stored snapshot when one
    /// exists and fits the bank.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Snapshot` when the store fails, and
    /// `QuizError::State` when a snapshot exists but was taken against
    /// a different bank. Callers wanting a fresh start instead can
    /// clear the store first.
    pub fn start(
        bank: QuestionBank,
        clock: Clock,
        store: Arc<dyn SnapshotStore>,
    ) -> Result<Self, QuizError> {
        let controller = match store.load()? {
            Some(snapshot) => {
                let state = snapshot.into_state(bank.len())?;
                log::info!("resuming quiz at question {}", state.current_index + 1);
                QuizController::resume(bank, state, clock)?
            }
            None => QuizController::new(bank, clock),
        };

        Ok(Self {
            controller,
            store,
            clock,
        })
    }

    #[must_use]
    pub fn controller(&self) -> &QuizController {
        &self.controller
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        self.controller.progress()
    }

    /// The signals a freshly attached display needs before the first
    /// intent: the current question and enabled input.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Bank` only on a broken index invariant.
    pub fn opening_signals(&self) -> Result<Vec<QuizSignal>, QuizError> {
        Ok(vec![self.question_changed()?, QuizSignal::InputEnabled(true)])
    }

    /// Route one display intent through the controller.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Bank` only on a broken index invariant.
    pub fn apply(&mut self, intent: QuizIntent) -> Result<Vec<QuizSignal>, QuizError> {
        match intent {
            QuizIntent::Advance => {
                self.controller.advance();
                Ok(vec![self.question_changed()?, QuizSignal::InputEnabled(true)])
            }
            QuizIntent::Retreat => {
                self.controller.retreat();
                Ok(vec![self.question_changed()?, QuizSignal::InputEnabled(true)])
            }
            QuizIntent::SubmitAnswer(answer) => {
                let outcome = self.controller.submit_answer(answer)?;
                Ok(vec![
                    QuizSignal::Outcome(outcome),
                    QuizSignal::InputEnabled(false),
                ])
            }
            QuizIntent::RequestReveal => Ok(vec![QuizSignal::RevealRequested {
                answer_is_true: self.controller.request_reveal()?,
            }]),
            QuizIntent::RevealReturned(was_shown) => {
                self.controller.record_reveal_outcome(was_shown);
                Ok(Vec::new())
            }
        }
    }

    /// Write the suspension snapshot.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Snapshot` when the store fails.
    pub fn suspend(&self) -> Result<(), QuizError> {
        let snapshot =
            QuizSnapshot::from_state(&self.controller.snapshot_state(), self.clock.now());
        self.store.save(&snapshot)?;
        Ok(())
    }

    fn question_changed(&self) -> Result<QuizSignal, QuizError> {
        let question = self.controller.current_question()?;
        Ok(QuizSignal::QuestionChanged {
            position: self.controller.current_index() + 1,
            total: self.controller.bank().len(),
            prompt: question.prompt().to_owned(),
        })
    }
}
