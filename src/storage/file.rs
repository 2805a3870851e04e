//! Single-file blob store with atomic whole-file replacement.
//!
//! All entries live in one JSON document:
//!
//! ```text
//! { "version": 1, "entries": { "<key>": "<base64 value>", ... } }
//! ```
//!
//! `set_many` mutates the in-memory map and rewrites the whole
//! document via temp-file + rename, so a batch of entries commits as
//! one unit and readers never see a half-written file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

use super::BlobStore;

/// Current on-disk document version.
const CURRENT_VERSION: u8 = 1;

#[derive(Serialize, Deserialize)]
struct FileDocument {
    version: u8,
    entries: BTreeMap<String, String>,
}

/// A `BlobStore` persisted as a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, Vec<u8>>,
}

impl FileStore {
    /// Open a file store at `path`, loading existing entries.
    ///
    /// A missing file yields an empty store; the file is first written
    /// on the first `set_many`.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self {
                path: path.to_path_buf(),
                entries: BTreeMap::new(),
            });
        }

        let data = fs::read(path)?;
        let doc: FileDocument = serde_json::from_slice(&data)
            .map_err(|e| VaultError::CorruptVault(format!("store file: {e}")))?;

        if doc.version != CURRENT_VERSION {
            return Err(VaultError::CorruptVault(format!(
                "unsupported store version {}, expected {CURRENT_VERSION}",
                doc.version
            )));
        }

        let mut entries = BTreeMap::new();
        for (key, encoded) in doc.entries {
            let value = BASE64
                .decode(&encoded)
                .map_err(|e| VaultError::CorruptVault(format!("store entry '{key}': {e}")))?;
            entries.insert(key, value);
        }

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize all entries and write them to disk atomically.
    fn persist(&self) -> Result<()> {
        let doc = FileDocument {
            version: CURRENT_VERSION,
            entries: self
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), BASE64.encode(v)))
                .collect(),
        };

        let data = serde_json::to_vec(&doc)
            .map_err(|e| VaultError::SerializationError(format!("store file: {e}")))?;

        // Atomic write: temp file in the same directory, then rename.
        let parent = self.path.parent().unwrap_or(Path::new("."));
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, &data)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_many(&mut self, entries: Vec<(String, Vec<u8>)>) -> Result<()> {
        // Keep the previous state around so a failed write rolls back
        // the in-memory view as well.
        let previous = self.entries.clone();

        for (key, value) in entries {
            self.entries.insert(key, value);
        }

        if let Err(e) = self.persist() {
            self.entries = previous;
            return Err(e);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(&dir.path().join("vault.json")).unwrap();
        assert!(store.get("anything").unwrap().is_none());
    }

    #[test]
    fn set_many_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.json");

        let mut store = FileStore::open(&path).unwrap();
        store
            .set_many(vec![
                ("alpha".into(), b"one".to_vec()),
                ("beta".into(), b"two".to_vec()),
            ])
            .unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("alpha").unwrap().unwrap(), b"one");
        assert_eq!(reopened.get("beta").unwrap().unwrap(), b"two");
    }

    #[test]
    fn garbage_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.json");
        fs::write(&path, b"not json at all").unwrap();

        assert!(FileStore::open(&path).is_err());
    }

    #[test]
    fn later_write_overwrites_earlier_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set_many(vec![("key".into(), b"v1".to_vec())]).unwrap();
        store.set_many(vec![("key".into(), b"v2".to_vec())]).unwrap();

        assert_eq!(store.get("key").unwrap().unwrap(), b"v2");
    }
}
