use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StateError {
    #[error("current index {index} out of range for {question_count} questions")]
    IndexOutOfRange { index: usize, question_count: usize },

    #[error("{flags} cheat flags for {question_count} questions")]
    CheatFlagMismatch { flags: usize, question_count: usize },
}

/// The mutable half of a quiz: navigation cursor, running tallies and
/// per-question cheat flags.
///
/// Owned exclusively by the controller and mutated only through its
/// operations. Invariants: `current_index` stays within the bank and
/// `cheated` has exactly one flag per question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizState {
    pub current_index: usize,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub cheated: Vec<bool>,
}

impl QuizState {
    /// Fresh state for a bank of `question_count` questions: index 0,
    /// zero tallies, no cheating recorded.
    #[must_use]
    pub fn new(question_count: usize) -> Self {
        Self {
            current_index: 0,
            correct_count: 0,
            incorrect_count: 0,
            cheated: vec![false; question_count],
        }
    }

    /// Rehydrate state written by a previous process instance.
    ///
    /// # Errors
    ///
    /// Returns `StateError::IndexOutOfRange` when the stored cursor does
    /// not fit the bank, and `StateError::CheatFlagMismatch` when the
    /// flag vector was taken against a different bank size. A snapshot
    /// that fails here is stale and must be discarded, not trusted.
    pub fn from_persisted(
        current_index: usize,
        correct_count: u32,
        incorrect_count: u32,
        cheated: Vec<bool>,
        question_count: usize,
    ) -> Result<Self, StateError> {
        if current_index >= question_count {
            return Err(StateError::IndexOutOfRange {
                index: current_index,
                question_count,
            });
        }
        if cheated.len() != question_count {
            return Err(StateError::CheatFlagMismatch {
                flags: cheated.len(),
                question_count,
            });
        }

        Ok(Self {
            current_index,
            correct_count,
            incorrect_count,
            cheated,
        })
    }

    #[must_use]
    pub fn cheated_on_current(&self) -> bool {
        self.cheated.get(self.current_index).copied().unwrap_or(false)
    }
}
