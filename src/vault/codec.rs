//! Sealing and opening the encrypted credential blob.
//!
//! The whole credential set is serialized and encrypted as one blob —
//! there is never a partial update of a single record's ciphertext.

use zeroize::Zeroize;

use crate::crypto::encryption::{decrypt, encrypt, CipherBlob};
use crate::crypto::keys::DataKey;
use crate::errors::{Result, VaultError};

use super::record::CredentialSet;

/// Serialize and encrypt a credential set under the DEK.
pub fn seal(set: &CredentialSet, key: &DataKey) -> Result<CipherBlob> {
    let mut plaintext = serde_json::to_vec(set)
        .map_err(|e| VaultError::SerializationError(format!("credential set: {e}")))?;

    let blob = encrypt(key.as_bytes(), &plaintext);
    plaintext.zeroize();
    blob
}

/// Decrypt and parse a credential blob.
///
/// `None` means no blob has ever been written: that opens to an empty
/// set without touching the cipher.  A parse failure after a successful
/// decryption is `CorruptVault` — the key was right but the payload is
/// broken, which is a different situation from a wrong key.
pub fn open(blob: Option<&CipherBlob>, key: &DataKey) -> Result<CredentialSet> {
    let Some(blob) = blob else {
        return Ok(CredentialSet::new());
    };

    let mut plaintext = decrypt(key.as_bytes(), blob)?;
    let parsed: std::result::Result<CredentialSet, _> = serde_json::from_slice(&plaintext);
    plaintext.zeroize();

    parsed.map_err(|e| VaultError::CorruptVault(format!("credential payload: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::record::CredentialRecord;
    use chrono::Utc;

    fn test_set() -> CredentialSet {
        let mut set = CredentialSet::new();
        set.upsert(CredentialRecord {
            domain: "example.com".to_string(),
            url: "https://example.com/login".to_string(),
            username: "a@x.com".to_string(),
            password: "hunter2".to_string(),
            notes: "work account".to_string(),
            date_added: Utc::now(),
        });
        set
    }

    #[test]
    fn seal_open_roundtrip() {
        let key = DataKey::new([0x01u8; 32]);
        let set = test_set();

        let blob = seal(&set, &key).unwrap();
        let opened = open(Some(&blob), &key).unwrap();

        assert_eq!(opened, set);
    }

    #[test]
    fn open_with_wrong_key_fails_closed() {
        let key = DataKey::new([0x01u8; 32]);
        let wrong_key = DataKey::new([0x02u8; 32]);

        let blob = seal(&test_set(), &key).unwrap();
        let result = open(Some(&blob), &wrong_key);

        // Never corrupted-but-parsed data — the auth check fails first.
        assert!(matches!(result, Err(VaultError::InvalidPassword)));
    }

    #[test]
    fn absent_blob_opens_to_empty_set() {
        let key = DataKey::new([0x03u8; 32]);
        let set = open(None, &key).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn empty_set_roundtrips() {
        let key = DataKey::new([0x04u8; 32]);
        let blob = seal(&CredentialSet::new(), &key).unwrap();
        let opened = open(Some(&blob), &key).unwrap();
        assert!(opened.is_empty());
    }
}
