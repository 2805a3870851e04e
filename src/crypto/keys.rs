//! The two-tier key hierarchy.
//!
//! A master key derived from the user's password never touches the
//! credential data directly.  It only wraps a random 32-byte Data
//! Encryption Key (DEK), and the DEK encrypts the credential blob.
//! Changing the password therefore only has to re-wrap (or rotate)
//! one key instead of re-deriving through the old password path.

use rand::RngCore;
use zeroize::Zeroize;

use crate::errors::{Result, VaultError};

use super::encryption::{decrypt, encrypt, CipherBlob};
use super::hashing::{digest, verify_digest};
use super::kdf::derive_key;

/// Length of the data encryption key (256 bits).
const KEY_LEN: usize = 32;

/// The DEK, encrypted under the master key.
pub type WrappedDataKey = CipherBlob;

/// Everything needed to verify a master password: the derivation salt,
/// the iteration count it was derived with, and a digest of the derived
/// key.  The password itself is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterKeyMaterial {
    pub salt: Vec<u8>,
    pub iterations: u32,
    pub hashed_master_key: Vec<u8>,
}

/// A wrapper around the 32-byte data encryption key that zeroes its
/// memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DataKey {
    bytes: [u8; KEY_LEN],
}

impl DataKey {
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to pass to encrypt/decrypt).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for DataKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataKey").field("bytes", &"[REDACTED]").finish()
    }
}

/// Set up the hierarchy for a fresh vault.
///
/// Generates a salt, derives the master key from `password`, stores a
/// digest of it for later verification, generates a fresh random DEK,
/// and wraps the DEK under the master key.
pub fn initialize(
    password: &str,
    iterations: u32,
) -> Result<(MasterKeyMaterial, WrappedDataKey, DataKey)> {
    let salt = super::kdf::generate_salt();
    let mut master_key = derive_key(password.as_bytes(), &salt, iterations)?;
    let hashed = digest(&master_key);

    let data_key = generate_data_key();
    let wrapped = encrypt(&master_key, data_key.as_bytes())?;
    master_key.zeroize();

    let material = MasterKeyMaterial {
        salt: salt.to_vec(),
        iterations,
        hashed_master_key: hashed.to_vec(),
    };

    Ok((material, wrapped, data_key))
}

/// Check a password against stored key material.
///
/// Re-derives the master key with the stored salt and iteration count
/// and compares digests in constant time.
pub fn verify(password: &str, material: &MasterKeyMaterial) -> Result<bool> {
    let mut master_key = derive_key(password.as_bytes(), &material.salt, material.iterations)?;
    let computed = digest(&master_key);
    master_key.zeroize();

    Ok(verify_digest(&material.hashed_master_key, &computed))
}

/// Unwrap the DEK with the master password.
///
/// Verification runs first, so a corrupt wrap can never masquerade as
/// a wrong-password case: after a successful verify, a wrap that fails
/// to open is reported as vault corruption.
pub fn unwrap_data_key(
    password: &str,
    material: &MasterKeyMaterial,
    wrapped: &WrappedDataKey,
) -> Result<DataKey> {
    if !verify(password, material)? {
        return Err(VaultError::InvalidPassword);
    }

    let mut master_key = derive_key(password.as_bytes(), &material.salt, material.iterations)?;
    let result = decrypt(&master_key, wrapped);
    master_key.zeroize();

    let mut key_bytes = result
        .map_err(|_| VaultError::CorruptVault("wrapped data key failed to open".into()))?;

    if key_bytes.len() != KEY_LEN {
        key_bytes.zeroize();
        return Err(VaultError::CorruptVault(format!(
            "data key must be {KEY_LEN} bytes (got {})",
            key_bytes.len()
        )));
    }

    let mut fixed = [0u8; KEY_LEN];
    fixed.copy_from_slice(&key_bytes);
    key_bytes.zeroize();

    Ok(DataKey::new(fixed))
}

/// Wrap an existing DEK under a new password path.
///
/// This is the cheap alternative to a full rotation: the credential
/// blob stays valid because the DEK itself does not change.  The
/// change-password flow does NOT use this — it rotates the DEK too.
pub fn rewrap(
    new_password: &str,
    iterations: u32,
    data_key: &DataKey,
) -> Result<(MasterKeyMaterial, WrappedDataKey)> {
    let salt = super::kdf::generate_salt();
    let mut master_key = derive_key(new_password.as_bytes(), &salt, iterations)?;
    let hashed = digest(&master_key);

    let wrapped = encrypt(&master_key, data_key.as_bytes())?;
    master_key.zeroize();

    let material = MasterKeyMaterial {
        salt: salt.to_vec(),
        iterations,
        hashed_master_key: hashed.to_vec(),
    };

    Ok((material, wrapped))
}

/// Generate a fresh random 32-byte data encryption key.
fn generate_data_key() -> DataKey {
    let mut bytes = [0u8; KEY_LEN];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    DataKey::new(bytes)
}
