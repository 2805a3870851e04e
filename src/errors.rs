use thiserror::Error;

/// All errors that can occur in CredVault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Lifecycle errors ---
    #[error("Vault is not initialized — set up a master password first")]
    NotInitialized,

    #[error("Vault is already initialized")]
    AlreadyInitialized,

    #[error("Invalid master password")]
    InvalidPassword,

    #[error("Vault is locked — unlock it with the master password")]
    VaultLocked,

    #[error("Session expired after inactivity — unlock the vault again")]
    SessionExpired,

    // --- Credential errors ---
    #[error("No matching credential found")]
    NotFound,

    #[error("Vault data is corrupt: {0}")]
    CorruptVault(String),

    #[error("Invalid import format: {0}")]
    InvalidImportFormat(String),

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Storage errors ---
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for CredVault results.
pub type Result<T> = std::result::Result<T, VaultError>;
