//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{BankError, StateError};
use storage::SnapshotError;

/// Errors emitted by the quiz controller and workflow.
///
/// A `Bank` variant reaching a caller means the index invariant broke;
/// there is no recovery, callers should log and stop.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
