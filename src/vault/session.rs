//! The in-memory unlock session.
//!
//! The session is the only place the unlocked DEK lives.  It is a
//! plain value owned by the vault store — never serialized, never
//! shared module state — so it cannot survive a process restart and
//! independent vaults can coexist in one process.

use chrono::{DateTime, Duration, Utc};

use crate::crypto::keys::DataKey;
use crate::errors::{Result, VaultError};

/// Holds the unlocked DEK, or nothing when locked.
#[derive(Default)]
pub struct Session {
    data_key: Option<DataKey>,
    last_activity: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the DEK and start the activity clock.
    pub fn unlock(&mut self, key: DataKey) {
        self.data_key = Some(key);
        self.last_activity = Some(Utc::now());
    }

    /// Discard the DEK (zeroized on drop) and clear the activity clock.
    pub fn lock(&mut self) {
        self.data_key = None;
        self.last_activity = None;
    }

    pub fn is_unlocked(&self) -> bool {
        self.data_key.is_some()
    }

    /// Lazily enforce the inactivity timeout.
    ///
    /// Called on every vault operation: if the session has been idle
    /// longer than `timeout`, the session locks itself and the
    /// triggering call fails with `SessionExpired`.  Otherwise the
    /// activity clock is refreshed.  A locked session is a no-op here —
    /// the caller surfaces `VaultLocked` when it asks for the key.
    pub fn touch(&mut self, timeout: Duration) -> Result<()> {
        let Some(last) = self.last_activity else {
            return Ok(());
        };

        let now = Utc::now();
        if now - last > timeout {
            self.lock();
            return Err(VaultError::SessionExpired);
        }

        self.last_activity = Some(now);
        Ok(())
    }

    /// Access the unlocked DEK, or fail with `VaultLocked`.
    pub fn data_key(&self) -> Result<&DataKey> {
        self.data_key.as_ref().ok_or(VaultError::VaultLocked)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("unlocked", &self.is_unlocked())
            .field("last_activity", &self.last_activity)
            .finish()
    }
}
