//! File-backed credential store
//!
//! All entries live in one JSON object. Each mutation serializes the whole
//! map into a temp file next to the target and renames it into place, so
//! the file on disk is always either the old or the new snapshot. On Unix
//! the temp file is created with mode `0600`, which the rename preserves.

use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tempfile::NamedTempFile;
use tracing::debug;

use super::{CredentialStore, StoreError, StoreResult};

/// Durable credential store persisted to a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, loading existing entries if the file exists.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or is not a
    /// JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };

        debug!(path = %path.display(), entries = entries.len(), "Opened file credential store");

        Ok(Self { path, entries: Mutex::new(entries) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mutate(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) -> StoreResult<()> {
        let mut current = self.entries.lock();
        let mut next = current.clone();
        apply(&mut next);

        if next == *current {
            return Ok(());
        }

        self.write_snapshot(&next)?;
        *current = next;
        Ok(())
    }

    fn write_snapshot(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut temp, entries)?;
        temp.flush()?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|err| StoreError::Io(err.error))?;

        debug!(path = %self.path.display(), entries = entries.len(), "Persisted credential store");
        Ok(())
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.mutate(|map| {
            map.insert(key.to_string(), value.to_string());
        })
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> StoreResult<()> {
        self.mutate(|map| {
            for (key, value) in entries {
                map.insert((*key).to_string(), (*value).to_string());
            }
        })
    }

    fn clear(&self, keys: &[&str]) -> StoreResult<()> {
        self.mutate(|map| {
            for key in keys {
                map.remove(*key);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("session.json")).unwrap();

        assert_eq!(store.get("access_token").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn creates_parent_directories_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("session.json");
        let store = FileStore::open(&path).unwrap();

        store.set("access_token", "A1").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(FileStore::open(&path), Err(StoreError::Serialization(_))));
    }

    #[test]
    fn clearing_absent_keys_does_not_touch_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileStore::open(&path).unwrap();

        store.clear(&["access_token"]).unwrap();

        assert!(!path.exists());
    }
}
