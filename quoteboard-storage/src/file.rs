//! Durable key-value store backed by a single JSON file.
//!
//! The whole map is held in memory and rewritten on every `set`/`remove`
//! through a synced temporary file and a rename, so a crash or power loss
//! mid-write leaves the previous contents intact.

use crate::{KeyValueStore, StorageError, StorageResult};
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: Arc<RwLock<BTreeMap<String, String>>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store; a file that
    /// is not a JSON object of strings is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "Store file is malformed, starting empty"
                    );
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(StorageError::io(&path, err)),
        };
        Ok(Self {
            path,
            entries: Arc::new(RwLock::new(entries)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
            }
        }
        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::serialization("*", e))?;
        write_atomic(&self.path, contents.as_bytes())
    }
}

/// Write through a synced temp file, rename it over `path`, then sync the
/// parent directory so the rename itself is durable.
fn write_atomic(path: &Path, contents: &[u8]) -> StorageResult<()> {
    let tmp = temp_path(path);
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&tmp)
        .map_err(|e| StorageError::io(&tmp, e))?;
    file.write_all(contents)
        .map_err(|e| StorageError::io(&tmp, e))?;
    file.sync_all().map_err(|e| StorageError::io(&tmp, e))?;
    drop(file);

    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(StorageError::io(path, err));
    }

    #[cfg(unix)]
    {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            let dir = fs::File::open(parent).map_err(|e| StorageError::io(parent, e))?;
            dir.sync_all().map_err(|e| StorageError::io(parent, e))?;
        }
    }

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::LockPoisoned)?;
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("store.json")).unwrap();
        assert_eq!(store.get("quotes").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = FileStore::open(&path).unwrap();
        store.set("selectedCategory", "Life").unwrap();
        store.set("quotes", "[]").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("selectedCategory").unwrap().as_deref(),
            Some("Life")
        );
        assert_eq!(reopened.get("quotes").unwrap().as_deref(), Some("[]"));
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn stale_temp_file_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(temp_path(&path), "leftover from an interrupted write, much longer").unwrap();

        let store = FileStore::open(&path).unwrap();
        store.set("quotes", "[]").unwrap();

        assert!(!temp_path(&path).exists());
        let written = fs::read_to_string(&path).unwrap();
        let entries: BTreeMap<String, String> = serde_json::from_str(&written).unwrap();
        assert_eq!(entries.get("quotes").map(String::as_str), Some("[]"));
    }

    #[test]
    fn write_atomic_replaces_existing_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        write_atomic(&path, b"first version, longer than the second").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn remove_is_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        let store = FileStore::open(&path).unwrap();
        store.set("a", "1").unwrap();
        store.remove("a").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("a").unwrap(), None);
    }

    #[test]
    fn malformed_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json at all").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("quotes").unwrap(), None);
        store.set("quotes", "[]").unwrap();
        assert_eq!(
            FileStore::open(&path).unwrap().get("quotes").unwrap().as_deref(),
            Some("[]")
        );
    }
}
