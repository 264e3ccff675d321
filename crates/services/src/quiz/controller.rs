use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::Clock;
use quiz_core::model::{
    AnswerKind, AnswerOutcome, PassSummary, Question, QuestionBank, QuizState,
};

use crate::error::QuizError;
use crate::quiz::progress::QuizProgress;

/// The navigation/scoring state machine over a question bank.
///
/// Owns the bank and the mutable `QuizState`; every mutation goes
/// through an operation here. There is no terminal state: navigation
/// wraps indefinitely and completing a pass is a transient event
/// carried on the answer outcome, after which the tallies start over.
pub struct QuizController {
    bank: QuestionBank,
    state: QuizState,
    started_at: DateTime<Utc>,
    clock: Clock,
}

impl QuizController {
    /// Start a fresh quiz over `bank`: first question, zero tallies.
    #[must_use]
    pub fn new(bank: QuestionBank, clock: Clock) -> Self {
        let state = QuizState::new(bank.len());
        Self {
            bank,
            state,
            started_at: clock.now(),
            clock,
        }
    }

    /// Continue a quiz from previously suspended state.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::State` when `state` does not fit `bank`;
    /// the caller should fall back to a fresh start.
    pub fn resume(bank: QuestionBank, state: QuizState, clock: Clock) -> Result<Self, QuizError> {
        let state = QuizState::from_persisted(
            state.current_index,
            state.correct_count,
            state.incorrect_count,
            state.cheated,
            bank.len(),
        )?;
        Ok(Self {
            bank,
            state,
            started_at: clock.now(),
            clock,
        })
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn state(&self) -> &QuizState {
        &self.state
    }

    /// Clone of the current state, for handing to a snapshot store.
    #[must_use]
    pub fn snapshot_state(&self) -> QuizState {
        self.state.clone()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    /// The question the cursor points at.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Bank` only if the index invariant broke,
    /// which navigation arithmetic makes unreachable; the failure is
    /// logged before propagating because there is nothing to recover.
    pub fn current_question(&self) -> Result<&Question, QuizError> {
        self.bank.get(self.state.current_index).map_err(|e| {
            log::error!("question index out of bounds: {e}");
            e.into()
        })
    }

    /// Move to the next question, wrapping past the end of the bank.
    /// Returns the new index.
    pub fn advance(&mut self) -> usize {
        self.state.current_index = (self.state.current_index + 1) % self.bank.len();
        log::debug!("current question index: {}", self.state.current_index);
        self.state.current_index
    }

    /// Move to the previous question, wrapping before the start.
    /// Returns the new index.
    pub fn retreat(&mut self) -> usize {
        let len = self.bank.len();
        self.state.current_index = (self.state.current_index + len - 1) % len;
        log::debug!("current question index: {}", self.state.current_index);
        self.state.current_index
    }

    /// The correct answer for the current question, for forwarding to
    /// the reveal component. Mutates nothing by itself; whether the
    /// reveal actually happened comes back via
    /// [`QuizController::record_reveal_outcome`].
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Bank` only on a broken index invariant.
    pub fn request_reveal(&self) -> Result<bool, QuizError> {
        Ok(self.current_question()?.answer_is_true())
    }

    /// Record whether the reveal component showed the answer for the
    /// current question. Last write wins.
    pub fn record_reveal_outcome(&mut self, was_shown: bool) {
        let index = self.state.current_index;
        if let Some(flag) = self.state.cheated.get_mut(index) {
            *flag = was_shown;
        }
    }

    /// Judge a submitted answer.
    ///
    /// A question whose answer was revealed yields `Judgment` no matter
    /// what was pressed, and the tallies stay untouched. Otherwise the
    /// answer is compared and the matching tally bumped. Landing on the
    /// last question additionally closes the pass: the outcome carries
    /// a [`PassSummary`] computed from the tallies as they stand, and
    /// both tallies reset to zero for the next pass. Note that a judged
    /// final question therefore contributes nothing to the score it
    /// reports.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Bank` only on a broken index invariant.
    pub fn submit_answer(&mut self, user_answer: bool) -> Result<AnswerOutcome, QuizError> {
        let answer_is_true = self.current_question()?.answer_is_true();

        let kind = if self.state.cheated_on_current() {
            AnswerKind::Judgment
        } else if user_answer == answer_is_true {
            self.state.correct_count += 1;
            AnswerKind::Correct
        } else {
            self.state.incorrect_count += 1;
            AnswerKind::Incorrect
        };

        if self.state.current_index + 1 == self.bank.len() {
            let summary = PassSummary::from_counts(
                self.state.correct_count,
                self.state.incorrect_count,
                self.clock.now(),
            );
            log::info!("pass complete with result {}%", summary.percentage());
            self.state.correct_count = 0;
            self.state.incorrect_count = 0;
            return Ok(AnswerOutcome::with_summary(kind, summary));
        }

        Ok(AnswerOutcome::of(kind))
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            position: self.state.current_index + 1,
            total: self.bank.len(),
            correct: self.state.correct_count,
            incorrect: self.state.incorrect_count,
            cheated_on_current: self.state.cheated_on_current(),
        }
    }
}

impl fmt::Debug for QuizController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizController")
            .field("questions", &self.bank.len())
            .field("current_index", &self.state.current_index)
            .field("correct_count", &self.state.correct_count)
            .field("incorrect_count", &self.state.incorrect_count)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::StateError;
    use quiz_core::time::fixed_clock;

    fn bank(n: usize) -> QuestionBank {
        QuestionBank::new(
            (0..n)
                .map(|i| Question::new(format!("Q{i}"), i % 2 == 0))
                .collect(),
        )
        .unwrap()
    }

    fn controller(n: usize) -> QuizController {
        QuizController::new(bank(n), fixed_clock())
    }

    #[test]
    fn advance_wraps_past_the_end() {
        let mut quiz = controller(3);
        assert_eq!(quiz.advance(), 1);
        assert_eq!(quiz.advance(), 2);
        assert_eq!(quiz.advance(), 0);
    }

    #[test]
    fn retreat_wraps_before_the_start() {
        let mut quiz = controller(3);
        assert_eq!(quiz.retreat(), 2);
        assert_eq!(quiz.retreat(), 1);
        assert_eq!(quiz.retreat(), 0);
    }

    #[test]
    fn index_stays_in_range_under_arbitrary_navigation() {
        let mut quiz = controller(4);
        // Alternating walk with a bias, long enough to wrap both ways.
        for step in 0..100 {
            if step % 3 == 0 {
                quiz.retreat();
            } else {
                quiz.advance();
            }
            assert!(quiz.current_index() < 4);
        }
    }

    #[test]
    fn advance_then_retreat_is_identity() {
        for n in [1, 2, 5] {
            let mut quiz = controller(n);
            quiz.advance();
            let here = quiz.current_index();
            quiz.advance();
            quiz.retreat();
            assert_eq!(quiz.current_index(), here);
            quiz.retreat();
            quiz.advance();
            assert_eq!(quiz.current_index(), here);
        }
    }

    #[test]
    fn single_question_bank_navigates_to_itself() {
        let mut quiz = controller(1);
        assert_eq!(quiz.advance(), 0);
        assert_eq!(quiz.retreat(), 0);
    }

    #[test]
    fn correct_answer_is_tallied() {
        let mut quiz = controller(3);
        let outcome = quiz.submit_answer(true).unwrap();
        assert_eq!(outcome.kind, AnswerKind::Correct);
        assert!(outcome.summary.is_none());
        assert_eq!(quiz.state().correct_count, 1);
        assert_eq!(quiz.state().incorrect_count, 0);
    }

    #[test]
    fn incorrect_answer_is_tallied() {
        let mut quiz = controller(3);
        let outcome = quiz.submit_answer(false).unwrap();
        assert_eq!(outcome.kind, AnswerKind::Incorrect);
        assert_eq!(quiz.state().incorrect_count, 1);
    }

    #[test]
    fn revealed_question_is_judged_regardless_of_answer() {
        let mut quiz = controller(3);
        quiz.record_reveal_outcome(true);

        for answer in [true, false] {
            let outcome = quiz.submit_answer(answer).unwrap();
            assert_eq!(outcome.kind, AnswerKind::Judgment);
        }
        assert_eq!(quiz.state().correct_count, 0);
        assert_eq!(quiz.state().incorrect_count, 0);
    }

    #[test]
    fn reveal_outcome_is_last_write_wins() {
        let mut quiz = controller(3);
        quiz.record_reveal_outcome(true);
        quiz.record_reveal_outcome(false);
        assert!(!quiz.state().cheated_on_current());

        let outcome = quiz.submit_answer(true).unwrap();
        assert_eq!(outcome.kind, AnswerKind::Correct);
    }

    #[test]
    fn reveal_flag_sticks_to_its_question_across_navigation() {
        let mut quiz = controller(3);
        quiz.advance();
        quiz.record_reveal_outcome(true);
        quiz.advance();

        // Question 2 was never revealed.
        let outcome = quiz.submit_answer(true).unwrap();
        assert_eq!(outcome.kind, AnswerKind::Correct);

        quiz.retreat();
        let outcome = quiz.submit_answer(true).unwrap();
        assert_eq!(outcome.kind, AnswerKind::Judgment);
    }

    #[test]
    fn request_reveal_returns_answer_without_mutating() {
        let mut quiz = controller(3);
        assert!(quiz.request_reveal().unwrap());
        let before = quiz.snapshot_state();
        assert_eq!(quiz.state(), &before);

        // Only the recorded outcome marks the question as revealed.
        let outcome = quiz.submit_answer(true).unwrap();
        assert_eq!(outcome.kind, AnswerKind::Correct);
    }

    #[test]
    fn full_pass_of_correct_answers_scores_hundred_and_resets() {
        let mut quiz = controller(6);
        for i in 0..6 {
            let correct = quiz.current_question().unwrap().answer_is_true();
            let outcome = quiz.submit_answer(correct).unwrap();
            if i < 5 {
                assert!(outcome.summary.is_none());
                quiz.advance();
            } else {
                let summary = outcome.summary.expect("pass completed");
                assert_eq!(summary.percentage(), 100);
                assert_eq!(summary.correct(), 6);
            }
        }
        assert_eq!(quiz.state().correct_count, 0);
        assert_eq!(quiz.state().incorrect_count, 0);
    }

    #[test]
    fn interleaved_pass_scores_fifty() {
        let mut quiz = controller(6);
        for i in 0..6 {
            let correct = quiz.current_question().unwrap().answer_is_true();
            // Miss every other question.
            let answer = if i % 2 == 0 { correct } else { !correct };
            let outcome = quiz.submit_answer(answer).unwrap();
            if i == 5 {
                assert_eq!(outcome.summary.expect("pass completed").percentage(), 50);
            } else {
                quiz.advance();
            }
        }
    }

    #[test]
    fn judged_final_question_is_excluded_from_percentage() {
        let mut quiz = controller(6);
        // Answer the first five correctly, cheat on the last.
        for _ in 0..5 {
            let correct = quiz.current_question().unwrap().answer_is_true();
            quiz.submit_answer(correct).unwrap();
            quiz.advance();
        }
        quiz.record_reveal_outcome(true);

        let outcome = quiz.submit_answer(false).unwrap();
        assert_eq!(outcome.kind, AnswerKind::Judgment);
        let summary = outcome.summary.expect("pass completed");
        // Five correct out of five tallied; the judged question is
        // silently excluded from the score.
        assert_eq!(summary.percentage(), 100);
        assert_eq!(summary.correct(), 5);
        assert_eq!(summary.incorrect(), 0);
    }

    #[test]
    fn judged_final_question_with_no_tally_scores_zero() {
        let mut quiz = controller(3);
        // Jump straight to the end and cheat without answering anything.
        quiz.retreat();
        quiz.record_reveal_outcome(true);

        let outcome = quiz.submit_answer(true).unwrap();
        assert_eq!(outcome.kind, AnswerKind::Judgment);
        assert_eq!(outcome.summary.expect("pass completed").percentage(), 0);
    }

    #[test]
    fn tallies_reset_even_when_final_question_is_judged() {
        let mut quiz = controller(2);
        quiz.submit_answer(true).unwrap();
        quiz.advance();
        quiz.record_reveal_outcome(true);
        quiz.submit_answer(true).unwrap();

        assert_eq!(quiz.state().correct_count, 0);
        assert_eq!(quiz.state().incorrect_count, 0);
    }

    #[test]
    fn resume_restores_position_and_tallies() {
        let mut quiz = controller(6);
        quiz.submit_answer(true).unwrap();
        quiz.advance();
        quiz.record_reveal_outcome(true);
        let saved = quiz.snapshot_state();

        let resumed = QuizController::resume(bank(6), saved.clone(), fixed_clock()).unwrap();
        assert_eq!(resumed.state(), &saved);
        assert_eq!(resumed.current_index(), 1);
        assert!(resumed.state().cheated_on_current());
    }

    #[test]
    fn resume_rejects_state_from_a_different_bank() {
        let quiz = controller(6);
        let saved = quiz.snapshot_state();

        let err = QuizController::resume(bank(3), saved, fixed_clock()).unwrap_err();
        assert!(matches!(
            err,
            QuizError::State(StateError::CheatFlagMismatch { .. })
        ));
    }

    #[test]
    fn progress_reflects_state() {
        let mut quiz = controller(6);
        quiz.submit_answer(true).unwrap();
        quiz.advance();
        quiz.submit_answer(false).unwrap();

        let progress = quiz.progress();
        assert_eq!(progress.position, 2);
        assert_eq!(progress.total, 6);
        assert_eq!(progress.correct, 1);
        assert_eq!(progress.incorrect, 1);
        assert!(!progress.cheated_on_current);
    }
}
