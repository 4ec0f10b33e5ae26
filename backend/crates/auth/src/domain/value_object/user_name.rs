//! User Name Value Object
//!
//! The login handle of a portal account. Accounts are provisioned by admins,
//! so only a light canonical form is enforced here:
//! NFKC normalization, surrounding whitespace trimmed, 1..=64 characters,
//! no control characters. Case is preserved and significant.

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    Empty,
    TooLong { max: usize, actual: usize },
    InvalidCharacter,
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("User name cannot be empty"),
            Self::TooLong { max, actual } => {
                write!(f, "User name must be at most {max} characters (got {actual})")
            }
            Self::InvalidCharacter => f.write_str("User name contains control characters"),
        }
    }
}

impl std::error::Error for UserNameError {}

/// Canonical user name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(UserNameError::Empty);
        }

        let char_count = trimmed.chars().count();
        if char_count > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                max: USER_NAME_MAX_LENGTH,
                actual: char_count,
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(UserNameError::InvalidCharacter);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Wrap a value already stored in the database
    pub(crate) fn from_trusted(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_keeps_case() {
        let name = UserName::new("  Alice ").unwrap();
        assert_eq!(name.as_str(), "Alice");
        assert_ne!(name, UserName::new("alice").unwrap());
    }

    #[test]
    fn test_nfkc_normalization() {
        // Fullwidth letters fold to ASCII
        let name = UserName::new("ａｌｉｃｅ").unwrap();
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(UserName::new(""), Err(UserNameError::Empty));
        assert_eq!(UserName::new("   "), Err(UserNameError::Empty));
    }

    #[test]
    fn test_rejects_too_long() {
        let long = "a".repeat(USER_NAME_MAX_LENGTH + 1);
        assert!(matches!(
            UserName::new(long),
            Err(UserNameError::TooLong { .. })
        ));
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_rejects_control_characters() {
        assert_eq!(
            UserName::new("ali\u{0000}ce"),
            Err(UserNameError::InvalidCharacter)
        );
        assert_eq!(
            UserName::new("ali\nce"),
            Err(UserNameError::InvalidCharacter)
        );
    }

    #[test]
    fn test_serde_validates() {
        let name: UserName = serde_json::from_str("\" bob \"").unwrap();
        assert_eq!(name.as_str(), "bob");
        assert!(serde_json::from_str::<UserName>("\"\"").is_err());
    }
}
