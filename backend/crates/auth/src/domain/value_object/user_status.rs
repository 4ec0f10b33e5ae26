//! User Status Value Object
//!
//! Only `Active` accounts may sign in. Status changes happen outside this
//! crate (admin tooling); login just reads it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum UserStatus {
    /// Normal account
    #[default]
    Active = 0,

    /// Left the school, or not yet enabled
    Inactive = 1,

    /// Blocked by an administrator
    Suspended = 2,
}

impl UserStatus {
    /// Get string code for storage/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
        }
    }

    /// Check if login is allowed
    #[inline]
    pub const fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "suspended" => Some(Self::Suspended),
            _ => None,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_active_can_login() {
        assert!(UserStatus::Active.can_login());
        assert!(!UserStatus::Inactive.can_login());
        assert!(!UserStatus::Suspended.can_login());
    }

    #[test]
    fn test_code_roundtrip() {
        for status in [
            UserStatus::Active,
            UserStatus::Inactive,
            UserStatus::Suspended,
        ] {
            assert_eq!(UserStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(UserStatus::from_code("deleted"), None);
    }

    #[test]
    fn test_default_is_active() {
        assert_eq!(UserStatus::default(), UserStatus::Active);
    }
}
