//! Behavioral vault settings.
//!
//! Settings are stored next to the encrypted material but are not
//! themselves encrypted — they must be readable before an unlock (the
//! session timeout, for one, is needed while the vault is locked).

use serde::{Deserialize, Serialize};

/// User-tunable behavior flags and the session timeout.
///
/// Every field has a default so a vault written by an older version
/// still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultSettings {
    /// Offer credentials for automatic form fill.
    #[serde(default = "default_true")]
    pub auto_fill: bool,

    /// Offer to save credentials captured from submitted forms.
    #[serde(default = "default_true")]
    pub auto_save: bool,

    /// Allow fill/save on plain-HTTP pages.
    #[serde(default)]
    pub allow_http: bool,

    /// Minutes of inactivity before the session locks itself.
    #[serde(default = "default_session_timeout")]
    pub session_timeout_minutes: u32,
}

fn default_true() -> bool {
    true
}

fn default_session_timeout() -> u32 {
    30
}

impl Default for VaultSettings {
    fn default() -> Self {
        Self {
            auto_fill: true,
            auto_save: true,
            allow_http: false,
            session_timeout_minutes: default_session_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let s = VaultSettings::default();
        assert!(s.auto_fill);
        assert!(s.auto_save);
        assert!(!s.allow_http);
        assert_eq!(s.session_timeout_minutes, 30);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let s: VaultSettings = serde_json::from_str(r#"{"allowHttp": true}"#).unwrap();
        assert!(s.allow_http);
        assert!(s.auto_fill);
        assert_eq!(s.session_timeout_minutes, 30);
    }

    #[test]
    fn round_trips_through_json() {
        let s = VaultSettings {
            auto_fill: false,
            auto_save: true,
            allow_http: true,
            session_timeout_minutes: 5,
        };
        let json = serde_json::to_string(&s).unwrap();
        let back: VaultSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }

    #[test]
    fn fields_serialize_as_camel_case() {
        let json = serde_json::to_string(&VaultSettings::default()).unwrap();
        assert!(json.contains("autoFill"));
        assert!(json.contains("sessionTimeoutMinutes"));
    }
}
