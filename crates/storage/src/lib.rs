#![forbid(unsafe_code)]

pub mod json_file;
pub mod snapshot;

pub use json_file::JsonFileSnapshotStore;
pub use snapshot::{InMemorySnapshotStore, QuizSnapshot, SnapshotError, SnapshotStore};
