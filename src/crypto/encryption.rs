//! AES-256-GCM authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! returns it next to the ciphertext.  The nonce is never derived from
//! the plaintext or reused under the same key.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// An authenticated ciphertext together with the nonce it was sealed
/// with.  Both fields serialize as base64 strings in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherBlob {
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub ciphertext: Vec<u8>,

    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub nonce: Vec<u8>,
}

/// Encrypt `plaintext` with a 32-byte `key`.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<CipherBlob> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| VaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    // Generate a random 12-byte nonce.
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| VaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    Ok(CipherBlob {
        ciphertext,
        nonce: nonce.to_vec(),
    })
}

/// Decrypt a blob that was produced by `encrypt`.
///
/// An authentication failure means the key is wrong or the ciphertext
/// was tampered with — this is the vault's legitimate wrong-password
/// signal, so it maps to `InvalidPassword`.  A malformed nonce means
/// the stored blob itself is broken, which is `CorruptVault`.
pub fn decrypt(key: &[u8], blob: &CipherBlob) -> Result<Vec<u8>> {
    if blob.nonce.len() != NONCE_LEN {
        return Err(VaultError::CorruptVault(format!(
            "nonce must be {NONCE_LEN} bytes (got {})",
            blob.nonce.len()
        )));
    }

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| VaultError::InvalidPassword)?;
    let nonce = Nonce::from_slice(&blob.nonce);

    cipher
        .decrypt(nonce, blob.ciphertext.as_ref())
        .map_err(|_| VaultError::InvalidPassword)
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
