//! One-way hashing used to verify a derived key without storing it.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Compute the SHA-256 digest of `data`.
pub fn digest(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compare a stored digest against a freshly computed one in constant
/// time.  Only a structural length mismatch returns early.
pub fn verify_digest(stored: &[u8], computed: &[u8; 32]) -> bool {
    if stored.len() != computed.len() {
        return false;
    }
    stored.ct_eq(computed.as_slice()).into()
}
