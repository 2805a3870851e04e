//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The iteration count is stored alongside the salt so a vault created
//! under a different work factor still unlocks with the parameters it
//! was created with.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

use crate::errors::{Result, VaultError};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
const KEY_LEN: usize = 32;

/// Default PBKDF2 iteration count for new vaults.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Minimum accepted iteration count, to reject dangerously weak settings.
const MIN_ITERATIONS: u32 = 10_000;

/// Derive a 32-byte key from a password and salt.
///
/// The same password + salt + iteration count will always produce the
/// same key.
pub fn derive_key(password: &[u8], salt: &[u8], iterations: u32) -> Result<[u8; KEY_LEN]> {
    if iterations < MIN_ITERATIONS {
        return Err(VaultError::KeyDerivationFailed(format!(
            "iteration count must be at least {MIN_ITERATIONS} (got {iterations})"
        )));
    }
    if salt.is_empty() {
        return Err(VaultError::KeyDerivationFailed("salt must not be empty".into()));
    }

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key);
    Ok(key)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}
