//! Credential records and the in-memory credential set.
//!
//! A record is identified by its `(domain, username)` pair; the set
//! enforces that no two records share one.  Changing a record's
//! identity is modeled as delete + insert, never as an in-place edit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single stored credential.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    /// The site the credential belongs to (e.g. "example.com").
    pub domain: String,

    /// Full URL the credential was captured from.
    pub url: String,

    pub username: String,

    pub password: String,

    #[serde(default)]
    pub notes: String,

    /// When this credential was first saved.
    pub date_added: DateTime<Utc>,
}

impl CredentialRecord {
    /// Returns `true` if this record's identity key matches.
    pub fn matches(&self, domain: &str, username: &str) -> bool {
        self.domain == domain && self.username == username
    }
}

// Debug output intentionally omits the password and notes.
impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("domain", &self.domain)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("notes", &"[REDACTED]")
            .field("date_added", &self.date_added)
            .finish()
    }
}

/// The full collection of credentials held by a vault.
///
/// Insertion order is preserved but carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialSet {
    records: Vec<CredentialRecord>,
}

impl CredentialSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }

    /// Find a record by its identity key.
    pub fn find(&self, domain: &str, username: &str) -> Option<&CredentialRecord> {
        self.records.iter().find(|r| r.matches(domain, username))
    }

    /// Returns `true` if a record with this identity key exists.
    pub fn contains(&self, domain: &str, username: &str) -> bool {
        self.find(domain, username).is_some()
    }

    /// Insert a record, replacing any existing record with the same
    /// identity key.  Returns `true` if a record was replaced.
    pub fn upsert(&mut self, record: CredentialRecord) -> bool {
        match self
            .records
            .iter_mut()
            .find(|r| r.matches(&record.domain, &record.username))
        {
            Some(existing) => {
                *existing = record;
                true
            }
            None => {
                self.records.push(record);
                false
            }
        }
    }

    /// Remove the record with this identity key.  Returns `true` if a
    /// record was removed.
    pub fn remove(&mut self, domain: &str, username: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| !r.matches(domain, username));
        self.records.len() < before
    }

    /// All records whose domain matches `domain`, including subdomain
    /// relationships in either direction ("login.example.com" matches a
    /// record saved for "example.com" and vice versa).
    pub fn for_domain(&self, domain: &str) -> Vec<&CredentialRecord> {
        self.records
            .iter()
            .filter(|r| domain_matches(domain, &r.domain))
            .collect()
    }
}

/// Exact match, or either side is a dot-separated suffix of the other.
fn domain_matches(query: &str, stored: &str) -> bool {
    query == stored
        || query.ends_with(&format!(".{stored}"))
        || stored.ends_with(&format!(".{query}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(domain: &str, username: &str) -> CredentialRecord {
        CredentialRecord {
            domain: domain.to_string(),
            url: format!("https://{domain}/login"),
            username: username.to_string(),
            password: "hunter2".to_string(),
            notes: String::new(),
            date_added: Utc::now(),
        }
    }

    #[test]
    fn upsert_appends_then_replaces() {
        let mut set = CredentialSet::new();

        assert!(!set.upsert(record("example.com", "alice")));
        assert_eq!(set.len(), 1);

        let mut updated = record("example.com", "alice");
        updated.password = "new-password".to_string();
        assert!(set.upsert(updated));

        assert_eq!(set.len(), 1);
        assert_eq!(
            set.find("example.com", "alice").unwrap().password,
            "new-password"
        );
    }

    #[test]
    fn same_domain_different_usernames_coexist() {
        let mut set = CredentialSet::new();
        set.upsert(record("example.com", "alice"));
        set.upsert(record("example.com", "bob"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn remove_reports_whether_anything_matched() {
        let mut set = CredentialSet::new();
        set.upsert(record("example.com", "alice"));

        assert!(set.remove("example.com", "alice"));
        assert!(!set.remove("example.com", "alice"));
        assert!(set.is_empty());
    }

    #[test]
    fn for_domain_matches_subdomains_both_ways() {
        let mut set = CredentialSet::new();
        set.upsert(record("example.com", "alice"));
        set.upsert(record("accounts.google.com", "bob"));

        // Query for a subdomain of a stored domain.
        assert_eq!(set.for_domain("login.example.com").len(), 1);

        // Query for a parent of a stored domain.
        assert_eq!(set.for_domain("google.com").len(), 1);

        // Unrelated domain.
        assert!(set.for_domain("example.org").is_empty());

        // No partial-label matches: "ample.com" is not "example.com".
        assert!(set.for_domain("ample.com").is_empty());
    }

    #[test]
    fn debug_output_redacts_password() {
        let r = record("example.com", "alice");
        let debug = format!("{r:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("REDACTED"));
    }
}
