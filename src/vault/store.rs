//! High-level vault operations.
//!
//! `VaultStore` is the state machine over {Uninitialized, Locked,
//! Unlocked}.  It owns the unlock session and the backing blob store,
//! and every credential operation runs as one decrypt-mutate-encrypt-
//! persist transaction: the whole set is re-sealed and written as a
//! single value, so a failed write leaves the previous committed state
//! untouched.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Duration;
use serde::de::DeserializeOwned;

use crate::crypto::kdf::DEFAULT_ITERATIONS;
use crate::crypto::keys::{self, MasterKeyMaterial, WrappedDataKey};
use crate::errors::{Result, VaultError};
use crate::storage::{keys as store_keys, BlobStore};

use super::codec;
use super::record::{CredentialRecord, CredentialSet};
use super::session::Session;
use super::settings::VaultSettings;
use super::transfer::ExportDocument;

/// Where the vault is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultStatus {
    /// No master password has ever been set up.
    Uninitialized,
    /// Key material exists but no session holds the DEK.
    Locked,
    /// The DEK is held in memory and credentials are reachable.
    Unlocked,
}

/// The main vault handle.
pub struct VaultStore<S: BlobStore> {
    store: S,
    session: Session,
}

impl<S: BlobStore> VaultStore<S> {
    /// Wrap a blob store.  The vault starts locked regardless of what
    /// the store contains.
    pub fn new(store: S) -> Self {
        Self {
            store,
            session: Session::new(),
        }
    }

    /// Access the underlying blob store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying blob store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    pub fn is_initialized(&self) -> Result<bool> {
        self.store.contains(store_keys::HASHED_MASTER_KEY)
    }

    pub fn status(&self) -> Result<VaultStatus> {
        if !self.is_initialized()? {
            Ok(VaultStatus::Uninitialized)
        } else if self.session.is_unlocked() {
            Ok(VaultStatus::Unlocked)
        } else {
            Ok(VaultStatus::Locked)
        }
    }

    /// Set up the master password for the first time.
    ///
    /// Persists the key material, the wrapped DEK, and default settings
    /// in one atomic batch, then leaves the vault unlocked.  No
    /// credential blob is written until the first save.
    pub fn initialize(&mut self, password: &str) -> Result<()> {
        if self.is_initialized()? {
            return Err(VaultError::AlreadyInitialized);
        }

        let (material, wrapped, data_key) = keys::initialize(password, DEFAULT_ITERATIONS)?;

        let mut entries = material_entries(&material)?;
        entries.push((
            store_keys::WRAPPED_DATA_KEY.to_string(),
            to_json(&wrapped)?,
        ));
        entries.push((
            store_keys::SETTINGS.to_string(),
            to_json(&VaultSettings::default())?,
        ));
        self.store.set_many(entries)?;

        self.session.unlock(data_key);
        Ok(())
    }

    /// Unlock with the master password.
    ///
    /// On failure the vault stays locked; an uninitialized vault is a
    /// distinct error, never "wrong password".
    pub fn unlock(&mut self, password: &str) -> Result<()> {
        let material = self.load_material()?.ok_or(VaultError::NotInitialized)?;
        let wrapped: WrappedDataKey = self
            .get_json(store_keys::WRAPPED_DATA_KEY)?
            .ok_or_else(|| VaultError::CorruptVault("wrapped data key missing".into()))?;

        let data_key = keys::unwrap_data_key(password, &material, &wrapped)?;
        self.session.unlock(data_key);
        Ok(())
    }

    /// Lock the vault: the DEK is discarded from memory, the encrypted
    /// blob on disk is untouched.
    pub fn lock(&mut self) {
        self.session.lock();
    }

    /// Check a password against the stored key material without
    /// changing session state.
    pub fn verify_password(&self, password: &str) -> Result<bool> {
        let material = self.load_material()?.ok_or(VaultError::NotInitialized)?;
        keys::verify(password, &material)
    }

    // ------------------------------------------------------------------
    // Credential operations (require Unlocked)
    // ------------------------------------------------------------------

    /// Decrypt and return the full credential set.
    pub fn list(&mut self) -> Result<CredentialSet> {
        self.guard()?;
        let blob = self.get_json(store_keys::ENCRYPTED_CREDENTIALS)?;
        codec::open(blob.as_ref(), self.session.data_key()?)
    }

    /// Add a credential, or replace the one with the same
    /// `(domain, username)` identity key.
    pub fn upsert(&mut self, record: CredentialRecord) -> Result<()> {
        self.guard()?;
        let mut set = self.open_current()?;
        set.upsert(record);
        self.persist_set(&set)
    }

    /// Remove the credential with this identity key.
    ///
    /// Deleting something that is not there is an error, not a no-op —
    /// it usually means the caller's view of the vault is stale.
    pub fn delete(&mut self, domain: &str, username: &str) -> Result<()> {
        self.guard()?;
        let mut set = self.open_current()?;
        if !set.remove(domain, username) {
            return Err(VaultError::NotFound);
        }
        self.persist_set(&set)
    }

    /// All credentials usable on `domain`, including subdomain matches.
    pub fn credentials_for_domain(&mut self, domain: &str) -> Result<Vec<CredentialRecord>> {
        let set = self.list()?;
        Ok(set.for_domain(domain).into_iter().cloned().collect())
    }

    /// Change the master password, fully rotating the key hierarchy.
    ///
    /// A new salt, master key, verification digest AND a new DEK are
    /// generated; the credential set is re-sealed under the new DEK;
    /// and the whole triple {key material, wrapped DEK, blob} is
    /// replaced in one atomic batch.  A failure at any earlier step
    /// leaves the old triple fully intact and valid.
    pub fn change_master_password(&mut self, old_password: &str, new_password: &str) -> Result<()> {
        self.guard()?;
        if !self.verify_password(old_password)? {
            return Err(VaultError::InvalidPassword);
        }

        // Decrypt under the old DEK before anything is replaced.
        let set = self.open_current()?;

        let (material, wrapped, new_key) = keys::initialize(new_password, DEFAULT_ITERATIONS)?;
        let blob = codec::seal(&set, &new_key)?;

        let mut entries = material_entries(&material)?;
        entries.push((
            store_keys::WRAPPED_DATA_KEY.to_string(),
            to_json(&wrapped)?,
        ));
        entries.push((
            store_keys::ENCRYPTED_CREDENTIALS.to_string(),
            to_json(&blob)?,
        ));
        self.store.set_many(entries)?;

        // Only after the commit does the session pick up the new DEK.
        self.session.unlock(new_key);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Export / import
    // ------------------------------------------------------------------

    /// Produce an export document of every credential.
    ///
    /// Requires the master password even on an unlocked session.  With
    /// an `export_passphrase` the record array is sealed; without one
    /// the document holds plaintext credentials.
    pub fn export(
        &mut self,
        password: &str,
        export_passphrase: Option<&str>,
    ) -> Result<ExportDocument> {
        self.guard()?;
        if !self.verify_password(password)? {
            return Err(VaultError::InvalidPassword);
        }

        let records = self.open_current()?.records().to_vec();
        match export_passphrase {
            Some(passphrase) => ExportDocument::sealed(records, passphrase),
            None => Ok(ExportDocument::plaintext(records)),
        }
    }

    /// Import credentials from an export document.
    ///
    /// Records whose identity key already exists locally are left
    /// untouched — existing credentials are authoritative.  Returns the
    /// number of newly added records.
    pub fn import(
        &mut self,
        json: &str,
        password: &str,
        import_passphrase: Option<&str>,
    ) -> Result<usize> {
        self.guard()?;
        if !self.verify_password(password)? {
            return Err(VaultError::InvalidPassword);
        }

        let document = ExportDocument::from_json(json)?;
        let incoming = document.into_records(import_passphrase)?;

        let mut set = self.open_current()?;
        let mut added = 0;
        for record in incoming {
            if set.contains(&record.domain, &record.username) {
                continue;
            }
            set.upsert(record);
            added += 1;
        }

        if added > 0 {
            self.persist_set(&set)?;
        }
        Ok(added)
    }

    // ------------------------------------------------------------------
    // Settings (readable without unlocking)
    // ------------------------------------------------------------------

    pub fn settings(&self) -> Result<VaultSettings> {
        Ok(self.get_json(store_keys::SETTINGS)?.unwrap_or_default())
    }

    pub fn save_settings(&mut self, settings: &VaultSettings) -> Result<()> {
        self.store
            .set_many(vec![(store_keys::SETTINGS.to_string(), to_json(settings)?)])
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Gate for every credential operation: initialized, session not
    /// expired, session unlocked — each failure mode is distinct.
    fn guard(&mut self) -> Result<()> {
        if !self.is_initialized()? {
            return Err(VaultError::NotInitialized);
        }

        let timeout = Duration::minutes(i64::from(self.settings()?.session_timeout_minutes));
        self.session.touch(timeout)?;

        if !self.session.is_unlocked() {
            return Err(VaultError::VaultLocked);
        }
        Ok(())
    }

    /// Open the currently persisted credential set under the session DEK.
    fn open_current(&self) -> Result<CredentialSet> {
        let blob = self.get_json(store_keys::ENCRYPTED_CREDENTIALS)?;
        codec::open(blob.as_ref(), self.session.data_key()?)
    }

    /// Seal the set under the session DEK and persist it as one write.
    fn persist_set(&mut self, set: &CredentialSet) -> Result<()> {
        let blob = codec::seal(set, self.session.data_key()?)?;
        self.store.set_many(vec![(
            store_keys::ENCRYPTED_CREDENTIALS.to_string(),
            to_json(&blob)?,
        )])
    }

    fn load_material(&self) -> Result<Option<MasterKeyMaterial>> {
        let Some(hashed) = self.get_json::<String>(store_keys::HASHED_MASTER_KEY)? else {
            return Ok(None);
        };

        // Once the hash exists, the rest of the material must too.
        let salt: String = self
            .get_json(store_keys::MASTER_KEY_SALT)?
            .ok_or_else(|| VaultError::CorruptVault("master key salt missing".into()))?;
        let iterations: u32 = self
            .get_json(store_keys::KDF_ITERATIONS)?
            .ok_or_else(|| VaultError::CorruptVault("KDF iteration count missing".into()))?;

        Ok(Some(MasterKeyMaterial {
            salt: decode_b64(&salt, "master key salt")?,
            iterations,
            hashed_master_key: decode_b64(&hashed, "hashed master key")?,
        }))
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key)? {
            Some(raw) => {
                let value = serde_json::from_slice(&raw)
                    .map_err(|e| VaultError::CorruptVault(format!("store value '{key}': {e}")))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }
}

/// The three key-material entries, serialized for storage.
fn material_entries(material: &MasterKeyMaterial) -> Result<Vec<(String, Vec<u8>)>> {
    Ok(vec![
        (
            store_keys::HASHED_MASTER_KEY.to_string(),
            to_json(&BASE64.encode(&material.hashed_master_key))?,
        ),
        (
            store_keys::MASTER_KEY_SALT.to_string(),
            to_json(&BASE64.encode(&material.salt))?,
        ),
        (
            store_keys::KDF_ITERATIONS.to_string(),
            to_json(&material.iterations)?,
        ),
    ])
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| VaultError::SerializationError(e.to_string()))
}

fn decode_b64(encoded: &str, what: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(encoded)
        .map_err(|e| VaultError::CorruptVault(format!("{what}: {e}")))
}
