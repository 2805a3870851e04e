//! Opaque key-value blob storage backing the vault.
//!
//! The vault engine treats persistence as an external collaborator: a
//! store that can read single keys and atomically write a batch of
//! them.  Two implementations ship with the crate — an in-memory store
//! for tests and embedding (`memory`), and a single-file JSON store
//! with atomic whole-file replacement (`file`).

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::errors::Result;

/// Storage keys used by the vault engine.
pub mod keys {
    pub const HASHED_MASTER_KEY: &str = "hashedMasterKey";
    pub const MASTER_KEY_SALT: &str = "masterKeySalt";
    pub const KDF_ITERATIONS: &str = "kdfIterations";
    pub const WRAPPED_DATA_KEY: &str = "encryptedEncryptionKey";
    pub const ENCRYPTED_CREDENTIALS: &str = "encryptedCredentials";
    pub const SETTINGS: &str = "settings";
}

/// A key-value store holding opaque byte values.
///
/// `set_many` must be atomic per call: either every entry in the batch
/// becomes visible, or none of them does.  The vault relies on this for
/// its all-or-nothing re-key commit.
pub trait BlobStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Atomically persist every entry in the batch.
    fn set_many(&mut self, entries: Vec<(String, Vec<u8>)>) -> Result<()>;

    /// Returns `true` if a value is stored under `key`.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}
