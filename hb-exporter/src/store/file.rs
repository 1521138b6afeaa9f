//! Local storage dump on disk
//!
//! The file is the JSON object produced by `JSON.stringify(localStorage)` in
//! the browser console. Writes rewrite the whole file.

use super::{KeyValueStore, StoreResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// JSON-file backed store
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open an existing dump file
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let text = fs::read_to_string(&path)?;
        let entries = serde_json::from_str(&text)?;
        tracing::debug!(path = %path.display(), "Opened store file");
        Ok(Self { path, entries })
    }

    /// Open a dump file, starting empty if it does not exist yet
    pub fn open_or_create(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::open(path)
        } else {
            Ok(Self {
                path: path.to_path_buf(),
                entries: BTreeMap::new(),
            })
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use tempfile::TempDir;

    #[test]
    fn test_open_and_persist() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("localStorage.json");
        fs::write(&path, r#"{"v2|abc": "payload", "other": "x"}"#).unwrap();

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.keys(), vec!["other".to_string(), "v2|abc".to_string()]);
        assert_eq!(store.get("v2|abc").as_deref(), Some("payload"));

        store.set("hb-key-exporter-ownedApps", "cached".to_string()).unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("hb-key-exporter-ownedApps").as_deref(), Some("cached"));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");
        assert!(matches!(FileStore::open(&path), Err(StoreError::Io(_))));

        let store = FileStore::open_or_create(&path).unwrap();
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_rejects_non_string_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"v2|abc": 12}"#).unwrap();
        assert!(matches!(FileStore::open(&path), Err(StoreError::InvalidFile(_))));
    }
}
