//! Random password generation with selectable character classes.

use rand::RngCore;

use crate::errors::{Result, VaultError};

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_-+={}[]|:;<>,.?/";

/// Which character classes to draw from, and how long the result is.
#[derive(Debug, Clone, Copy)]
pub struct PasswordSpec {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for PasswordSpec {
    fn default() -> Self {
        Self {
            length: 16,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
        }
    }
}

/// Generate a random password from the given spec.
///
/// Indices are drawn by rejection sampling so every character in the
/// combined set is equally likely.
pub fn generate_password(spec: &PasswordSpec) -> Result<String> {
    if spec.length == 0 {
        return Err(VaultError::CommandFailed(
            "password length must be at least 1".into(),
        ));
    }

    let mut charset = String::new();
    if spec.uppercase {
        charset.push_str(UPPERCASE);
    }
    if spec.lowercase {
        charset.push_str(LOWERCASE);
    }
    if spec.digits {
        charset.push_str(DIGITS);
    }
    if spec.symbols {
        charset.push_str(SYMBOLS);
    }

    if charset.is_empty() {
        return Err(VaultError::CommandFailed(
            "at least one character class must be enabled".into(),
        ));
    }

    let chars: Vec<char> = charset.chars().collect();

    // Reject bytes at or above the largest multiple of the charset size,
    // otherwise the low indices would be slightly more likely.
    let limit = 256 - (256 % chars.len());

    let mut password = String::with_capacity(spec.length);
    let mut buf = [0u8; 64];

    while password.len() < spec.length {
        rand::rngs::OsRng.fill_bytes(&mut buf);
        for &byte in &buf {
            if password.len() == spec.length {
                break;
            }
            if (byte as usize) < limit {
                password.push(chars[byte as usize % chars.len()]);
            }
        }
    }

    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_generates_requested_length() {
        let password = generate_password(&PasswordSpec::default()).unwrap();
        assert_eq!(password.len(), 16);
    }

    #[test]
    fn digits_only_spec_generates_digits() {
        let spec = PasswordSpec {
            length: 32,
            uppercase: false,
            lowercase: false,
            digits: true,
            symbols: false,
        };
        let password = generate_password(&spec).unwrap();
        assert!(password.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn no_classes_enabled_fails() {
        let spec = PasswordSpec {
            length: 16,
            uppercase: false,
            lowercase: false,
            digits: false,
            symbols: false,
        };
        assert!(generate_password(&spec).is_err());
    }

    #[test]
    fn zero_length_fails() {
        let spec = PasswordSpec {
            length: 0,
            ..PasswordSpec::default()
        };
        assert!(generate_password(&spec).is_err());
    }

    #[test]
    fn two_passwords_differ() {
        let spec = PasswordSpec::default();
        let a = generate_password(&spec).unwrap();
        let b = generate_password(&spec).unwrap();
        assert_ne!(a, b);
    }
}
