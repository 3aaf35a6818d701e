//! [`SnapshotStore`] implementations for the last submitted form.
//!
//! Storage is best effort. Callers log failures and carry on; nothing here is
//! allowed to fail a calculation.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use dosecalc_core::error::StoreError;
use dosecalc_core::traits::SnapshotStore;
use dosecalc_core::types::InputSnapshot;
use parking_lot::RwLock;
use tempfile::NamedTempFile;
use tracing::debug;

/// Single JSON file on disk.
///
/// Each save writes a fresh temp file beside the target and renames it into
/// place, so a reader sees either the old or the new document, never a torn
/// one. Concurrent writers race; the last rename wins.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn save(&self, snapshot: &InputSnapshot) -> Result<(), StoreError> {
        let dir = self.dir();
        std::fs::create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(tmp.as_file_mut(), snapshot)?;
        tmp.as_file_mut().flush()?;
        tmp.persist(&self.path).map_err(|e| StoreError::from(e.error))?;
        debug!(path = %self.path.display(), "Snapshot saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<InputSnapshot>, StoreError> {
        let data = match std::fs::read(&self.path) {
            Ok(d) => d,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&data)?))
    }
}

/// In-process store, for tests and for running without a writable disk.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    slot: RwLock<Option<InputSnapshot>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn save(&self, snapshot: &InputSnapshot) -> Result<(), StoreError> {
        *self.slot.write() = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<InputSnapshot>, StoreError> {
        Ok(self.slot.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn snapshot(dose: &str) -> InputSnapshot {
        InputSnapshot {
            nuclide: Some("F18".into()),
            init_time: Some("07:00".into()),
            target_time: Some("07:30".into()),
            init_activity: Some("178.8".into()),
            init_volume: Some("10".into()),
            desired_dose: Some(dose.into()),
            saved_at: Some("2026-01-01T07:00:00+08:00".into()),
        }
    }

    #[test]
    fn file_missing_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path().join("last_input.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn file_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path().join("nested").join("last_input.json"));
        store.save(&snapshot("7.56")).unwrap();
        assert_eq!(store.load().unwrap(), Some(snapshot("7.56")));
        // Only the target is left behind.
        let entries = std::fs::read_dir(store.dir()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn file_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path().join("last_input.json"));
        store.save(&snapshot("1")).unwrap();
        store.save(&snapshot("2")).unwrap();
        assert_eq!(store.load().unwrap().unwrap().desired_dose.as_deref(), Some("2"));
    }

    #[test]
    fn file_concurrent_saves_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileSnapshotStore::new(dir.path().join("last_input.json")));
        let big = "9".repeat(200_000);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                let dose = format!("{t}{big}");
                std::thread::spawn(move || {
                    let mut errors = 0;
                    for _ in 0..50 {
                        if store.save(&snapshot(&dose)).is_err() {
                            errors += 1;
                        }
                        // Every read sees a complete document.
                        let loaded = store.load().unwrap().unwrap();
                        assert_eq!(loaded.desired_dose.unwrap().len(), dose.len());
                    }
                    errors
                })
            })
            .collect();

        let errors: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(errors, 0);
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn file_is_flat_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path().join("last_input.json"));
        store.save(&snapshot("7.56")).unwrap();
        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(store.path()).unwrap()).unwrap();
        assert!(raw.as_object().unwrap().values().all(|v| v.is_string()));
    }

    #[test]
    fn file_corrupted_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_input.json");
        std::fs::write(&path, b"{not json").unwrap();
        let store = FileSnapshotStore::new(path);
        assert!(matches!(store.load(), Err(StoreError::Serialization(_))));
    }

    #[test]
    fn file_unwritable_is_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the parent directory should be.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let store = FileSnapshotStore::new(blocker.join("last_input.json"));
        assert!(matches!(store.save(&snapshot("1")), Err(StoreError::Io(_))));
    }

    #[test]
    fn memory_store_roundtrip() {
        let store = MemorySnapshotStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save(&snapshot("3")).unwrap();
        assert_eq!(store.load().unwrap(), Some(snapshot("3")));
    }
}
