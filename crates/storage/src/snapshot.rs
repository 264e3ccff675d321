use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use quiz_core::model::{QuizState, StateError};

/// Errors surfaced by snapshot stores.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    State(#[from] StateError),
}

/// Persisted shape of a suspended quiz.
///
/// This mirrors the domain `QuizState` so stores can serialize without
/// leaking storage concerns into the domain layer. Rehydration goes
/// through `QuizState::from_persisted`, so a snapshot taken against a
/// different bank is rejected instead of trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSnapshot {
    pub current_index: usize,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub cheated: Vec<bool>,
    pub saved_at: DateTime<Utc>,
}

impl QuizSnapshot {
    #[must_use]
    pub fn from_state(state: &QuizState, saved_at: DateTime<Utc>) -> Self {
        Self {
            current_index: state.current_index,
            correct_count: state.correct_count,
            incorrect_count: state.incorrect_count,
            cheated: state.cheated.clone(),
            saved_at,
        }
    }

    /// Convert the snapshot back into domain state.
    ///
    /// # Errors
    ///
    /// Returns `StateError` when the stored cursor or cheat flags do not
    /// fit a bank of `question_count` questions.
    pub fn into_state(self, question_count: usize) -> Result<QuizState, StateError> {
        QuizState::from_persisted(
            self.current_index,
            self.correct_count,
            self.incorrect_count,
            self.cheated,
            question_count,
        )
    }
}

/// Store contract for the single suspension snapshot.
///
/// Absence of a snapshot is `Ok(None)`, never an error: a fresh start
/// is the normal first-run path.
pub trait SnapshotStore: Send + Sync {
    /// Persist the snapshot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` if the snapshot cannot be written.
    fn save(&self, snapshot: &QuizSnapshot) -> Result<(), SnapshotError>;

    /// Load the previously saved snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` on read or decode failures.
    fn load(&self) -> Result<Option<QuizSnapshot>, SnapshotError>;

    /// Drop any saved snapshot.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` if the snapshot cannot be removed.
    fn clear(&self) -> Result<(), SnapshotError>;
}

/// Simple in-memory store for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemorySnapshotStore {
    slot: Arc<Mutex<Option<QuizSnapshot>>>,
}

impl InMemorySnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn save(&self, snapshot: &QuizSnapshot) -> Result<(), SnapshotError> {
        let mut guard = self
            .slot
            .lock()
            .map_err(|e| SnapshotError::Serialization(e.to_string()))?;
        *guard = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<QuizSnapshot>, SnapshotError> {
        let guard = self
            .slot
            .lock()
            .map_err(|e| SnapshotError::Serialization(e.to_string()))?;
        Ok(guard.clone())
    }

    fn clear(&self) -> Result<(), SnapshotError> {
        let mut guard = self
            .slot
            .lock()
            .map_err(|e| SnapshotError::Serialization(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    #[test]
    fn in_memory_store_round_trips() {
        let store = InMemorySnapshotStore::new();
        assert!(store.load().unwrap().is_none());

        let state = QuizState::from_persisted(2, 1, 1, vec![false, true, false], 3).unwrap();
        let snapshot = QuizSnapshot::from_state(&state, fixed_now());
        store.save(&snapshot).unwrap();

        let loaded = store.load().unwrap().expect("snapshot saved");
        assert_eq!(loaded, snapshot);
        assert_eq!(loaded.into_state(3).unwrap(), state);
    }

    #[test]
    fn clear_removes_snapshot() {
        let store = InMemorySnapshotStore::new();
        let snapshot = QuizSnapshot::from_state(&QuizState::new(2), fixed_now());
        store.save(&snapshot).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn stale_snapshot_is_rejected_on_rehydration() {
        let snapshot = QuizSnapshot::from_state(&QuizState::new(6), fixed_now());
        let err = snapshot.into_state(3).unwrap_err();
        assert!(matches!(err, StateError::CheatFlagMismatch { .. }));
    }
}
