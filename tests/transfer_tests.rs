//! Integration tests for credential export and import.

use chrono::Utc;
use credvault::errors::VaultError;
use credvault::storage::MemoryStore;
use credvault::vault::{CredentialRecord, ExportDocument, VaultStore, EXPORT_TYPE};

const PASSWORD: &str = "correct horse";

fn new_vault() -> VaultStore<MemoryStore> {
    let mut vault = VaultStore::new(MemoryStore::new());
    vault.initialize(PASSWORD).expect("initialize");
    vault
}

fn record(domain: &str, username: &str, password: &str) -> CredentialRecord {
    CredentialRecord {
        domain: domain.to_string(),
        url: format!("https://{domain}/login"),
        username: username.to_string(),
        password: password.to_string(),
        notes: String::new(),
        date_added: Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// Plaintext export
// ---------------------------------------------------------------------------

#[test]
fn export_produces_tagged_versioned_document() {
    let mut vault = new_vault();
    vault.upsert(record("example.com", "a@x.com", "p1")).unwrap();

    let document = vault.export(PASSWORD, None).unwrap();

    assert_eq!(document.doc_type, EXPORT_TYPE);
    assert_eq!(document.version, 1);
    assert!(!document.date.is_empty());
    assert_eq!(document.data.as_ref().unwrap().len(), 1);
    assert!(!document.is_sealed());
}

#[test]
fn export_requires_the_master_password() {
    let mut vault = new_vault();

    let result = vault.export("wrong password", None);
    assert!(matches!(result, Err(VaultError::InvalidPassword)));
}

#[test]
fn export_import_round_trip() {
    let mut source = new_vault();
    source.upsert(record("example.com", "a@x.com", "p1")).unwrap();
    source.upsert(record("other.org", "b@y.com", "p2")).unwrap();

    let json = source.export(PASSWORD, None).unwrap().to_json().unwrap();

    let mut target = VaultStore::new(MemoryStore::new());
    target.initialize("another password").unwrap();

    let added = target.import(&json, "another password", None).unwrap();
    assert_eq!(added, 2);
    assert_eq!(target.list().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Import never overwrites
// ---------------------------------------------------------------------------

#[test]
fn import_leaves_existing_credentials_untouched() {
    let mut vault = new_vault();
    vault.upsert(record("example.com", "a@x.com", "local-password")).unwrap();

    // A document with the same identity key but different fields.
    let document = ExportDocument::plaintext(vec![record(
        "example.com",
        "a@x.com",
        "imported-password",
    )]);
    let json = document.to_json().unwrap();

    let added = vault.import(&json, PASSWORD, None).unwrap();
    assert_eq!(added, 0, "no new records expected");

    // The local record is authoritative.
    let set = vault.list().unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(
        set.find("example.com", "a@x.com").unwrap().password,
        "local-password"
    );
}

#[test]
fn import_mixes_new_and_existing_records() {
    let mut vault = new_vault();
    vault.upsert(record("example.com", "a@x.com", "local")).unwrap();

    let document = ExportDocument::plaintext(vec![
        record("example.com", "a@x.com", "ignored"),
        record("fresh.net", "c@z.com", "added"),
    ]);
    let json = document.to_json().unwrap();

    let added = vault.import(&json, PASSWORD, None).unwrap();
    assert_eq!(added, 1);
    assert_eq!(vault.list().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Format validation
// ---------------------------------------------------------------------------

#[test]
fn import_rejects_wrong_type_tag() {
    let mut vault = new_vault();

    let json = r#"{"type": "some-other-export", "version": 1, "date": "2026-01-01T00:00:00Z", "data": []}"#;
    let result = vault.import(json, PASSWORD, None);

    assert!(matches!(result, Err(VaultError::InvalidImportFormat(_))));
}

#[test]
fn import_rejects_garbage_input() {
    let mut vault = new_vault();

    let result = vault.import("definitely not json", PASSWORD, None);
    assert!(matches!(result, Err(VaultError::InvalidImportFormat(_))));
}

#[test]
fn import_requires_the_master_password() {
    let mut vault = new_vault();
    let json = ExportDocument::plaintext(vec![]).to_json().unwrap();

    let result = vault.import(&json, "wrong password", None);
    assert!(matches!(result, Err(VaultError::InvalidPassword)));
}

// ---------------------------------------------------------------------------
// Sealed export
// ---------------------------------------------------------------------------

#[test]
fn sealed_export_round_trips_with_passphrase() {
    let mut source = new_vault();
    source
        .upsert(record("example.com", "a@x.com", "sealed-secret"))
        .unwrap();

    let document = source.export(PASSWORD, Some("transfer-phrase")).unwrap();
    assert!(document.is_sealed());
    assert!(document.data.is_none());

    let json = document.to_json().unwrap();

    // The serialized form must not leak the credential anywhere.
    // ('@' and '-' cannot occur inside base64 output, so these checks
    // cannot trip on the ciphertext itself.)
    assert!(!json.contains("a@x.com"));
    assert!(!json.contains("sealed-secret"));

    let mut target = VaultStore::new(MemoryStore::new());
    target.initialize("another password").unwrap();

    let added = target
        .import(&json, "another password", Some("transfer-phrase"))
        .unwrap();
    assert_eq!(added, 1);
    assert_eq!(
        target.list().unwrap().find("example.com", "a@x.com").unwrap().password,
        "sealed-secret"
    );
}

#[test]
fn sealed_export_with_wrong_passphrase_fails() {
    let mut source = new_vault();
    source.upsert(record("example.com", "a@x.com", "p1")).unwrap();

    let json = source
        .export(PASSWORD, Some("right-phrase"))
        .unwrap()
        .to_json()
        .unwrap();

    let mut target = VaultStore::new(MemoryStore::new());
    target.initialize("another password").unwrap();

    let result = target.import(&json, "another password", Some("wrong-phrase"));
    assert!(matches!(result, Err(VaultError::InvalidPassword)));
}

#[test]
fn sealed_export_without_passphrase_is_rejected_up_front() {
    let mut source = new_vault();
    source.upsert(record("example.com", "a@x.com", "p1")).unwrap();

    let json = source
        .export(PASSWORD, Some("right-phrase"))
        .unwrap()
        .to_json()
        .unwrap();

    let mut target = VaultStore::new(MemoryStore::new());
    target.initialize("another password").unwrap();

    let result = target.import(&json, "another password", None);
    assert!(matches!(result, Err(VaultError::InvalidImportFormat(_))));
}
