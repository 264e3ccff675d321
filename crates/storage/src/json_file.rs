use std::fs;
use std::path::{Path, PathBuf};

use crate::snapshot::{QuizSnapshot, SnapshotError, SnapshotStore};

/// File-backed snapshot store, one JSON document per quiz.
///
/// A missing file loads as `None`. Writes go through a sibling temp
/// file and a rename so a crash mid-write never leaves a torn
/// snapshot behind.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn save(&self, snapshot: &QuizSnapshot) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| SnapshotError::Serialization(e.to_string()))?;

        let tmp = self.temp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<QuizSnapshot>, SnapshotError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let snapshot = serde_json::from_str(&json)
            .map_err(|e| SnapshotError::Serialization(e.to_string()))?;
        Ok(Some(snapshot))
    }

    fn clear(&self) -> Result<(), SnapshotError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
