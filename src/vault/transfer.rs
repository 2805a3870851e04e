//! Versioned export/import document for credential transfer.
//!
//! A document is either plaintext (`data` holds the record array) or
//! passphrase-sealed (`sealed` holds the array encrypted under a key
//! derived from an export passphrase with its own fresh salt).  Import
//! accepts both forms and rejects anything without the expected type
//! tag.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::crypto::encryption::{base64_decode, base64_encode, decrypt, encrypt, CipherBlob};
use crate::crypto::kdf::{derive_key, generate_salt, DEFAULT_ITERATIONS};
use crate::errors::{Result, VaultError};

use super::record::CredentialRecord;

/// Type tag identifying a CredVault export.
pub const EXPORT_TYPE: &str = "secure-credentials-export";

/// Current export document version.
pub const EXPORT_VERSION: u32 = 1;

/// The record array, encrypted under an export passphrase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SealedRecords {
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    pub iterations: u32,

    #[serde(flatten)]
    pub payload: CipherBlob,
}

/// A credential export document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    #[serde(rename = "type")]
    pub doc_type: String,

    pub version: u32,

    /// ISO-8601 timestamp of when the export was produced.
    pub date: String,

    /// Plaintext records.  Absent in a sealed document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<CredentialRecord>>,

    /// Sealed records.  Absent in a plaintext document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sealed: Option<SealedRecords>,
}

impl ExportDocument {
    /// Build a plaintext export of `records`.
    ///
    /// The resulting document stores credentials in the clear — it is
    /// only as safe as wherever it is written to.
    pub fn plaintext(records: Vec<CredentialRecord>) -> Self {
        Self {
            doc_type: EXPORT_TYPE.to_string(),
            version: EXPORT_VERSION,
            date: Utc::now().to_rfc3339(),
            data: Some(records),
            sealed: None,
        }
    }

    /// Build an export with the record array sealed under `passphrase`.
    pub fn sealed(records: Vec<CredentialRecord>, passphrase: &str) -> Result<Self> {
        let salt = generate_salt();
        let mut key = derive_key(passphrase.as_bytes(), &salt, DEFAULT_ITERATIONS)?;

        let mut plaintext = serde_json::to_vec(&records)
            .map_err(|e| VaultError::SerializationError(format!("export records: {e}")))?;
        let payload = encrypt(&key, &plaintext);
        plaintext.zeroize();
        key.zeroize();

        Ok(Self {
            doc_type: EXPORT_TYPE.to_string(),
            version: EXPORT_VERSION,
            date: Utc::now().to_rfc3339(),
            data: None,
            sealed: Some(SealedRecords {
                salt: salt.to_vec(),
                iterations: DEFAULT_ITERATIONS,
                payload: payload?,
            }),
        })
    }

    /// Parse a document from JSON and validate its type tag.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: ExportDocument = serde_json::from_str(json)
            .map_err(|e| VaultError::InvalidImportFormat(format!("not a valid export: {e}")))?;

        if doc.doc_type != EXPORT_TYPE {
            return Err(VaultError::InvalidImportFormat(format!(
                "unexpected document type '{}'",
                doc.doc_type
            )));
        }

        Ok(doc)
    }

    /// Serialize the document as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| VaultError::SerializationError(format!("export document: {e}")))
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.is_some()
    }

    /// Extract the record array, decrypting the sealed form if needed.
    ///
    /// A sealed document requires `passphrase`; a wrong passphrase
    /// surfaces as `InvalidPassword` from the authentication check.
    pub fn into_records(self, passphrase: Option<&str>) -> Result<Vec<CredentialRecord>> {
        if let Some(records) = self.data {
            return Ok(records);
        }

        let Some(sealed) = self.sealed else {
            return Err(VaultError::InvalidImportFormat(
                "document contains neither plaintext nor sealed records".into(),
            ));
        };

        let Some(passphrase) = passphrase else {
            return Err(VaultError::InvalidImportFormat(
                "document is passphrase-protected — an export passphrase is required".into(),
            ));
        };

        let mut key = derive_key(passphrase.as_bytes(), &sealed.salt, sealed.iterations)?;
        let result = decrypt(&key, &sealed.payload);
        key.zeroize();

        let mut plaintext = result?;
        let parsed: std::result::Result<Vec<CredentialRecord>, _> =
            serde_json::from_slice(&plaintext);
        plaintext.zeroize();

        parsed.map_err(|e| VaultError::CorruptVault(format!("sealed export payload: {e}")))
    }
}
