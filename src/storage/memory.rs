//! In-memory blob store for tests and embedding.

use std::collections::HashMap;

use crate::errors::Result;

use super::BlobStore;

/// A `BlobStore` backed by a plain `HashMap`.  Nothing is persisted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_many(&mut self, entries: Vec<(String, Vec<u8>)>) -> Result<()> {
        for (key, value) in entries {
            self.entries.insert(key, value);
        }
        Ok(())
    }
}
