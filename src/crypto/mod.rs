//! Cryptographic primitives for CredVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)
//! - One-way hashing with constant-time verification (`hashing`)
//! - The master-key / data-key hierarchy (`keys`)
//! - A random password generator (`generator`)

pub mod encryption;
pub mod generator;
pub mod hashing;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, ...};
pub use encryption::{decrypt, encrypt, CipherBlob};
pub use generator::{generate_password, PasswordSpec};
pub use hashing::{digest, verify_digest};
pub use kdf::{derive_key, generate_salt, DEFAULT_ITERATIONS};
pub use keys::{DataKey, MasterKeyMaterial, WrappedDataKey};
