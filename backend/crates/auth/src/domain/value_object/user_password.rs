//! User Password Value Object
//!
//! Domain wrappers around `platform::password`.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("Chalkboard-Lunch-42".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, None).unwrap();
//!
//! let typed = RawPassword::from_login("Chalkboard-Lunch-42".to_string());
//! assert!(hashed.verify(&typed, None));
//! ```

use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};
use std::fmt;
use std::sync::OnceLock;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// New password, checked against the password policy
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text =
            ClearTextPassword::new(raw).map_err(|e| AuthError::PasswordPolicy(e.to_string()))?;
        Ok(Self(clear_text))
    }

    /// Password typed into the login form
    ///
    /// Never rejected here; a policy-violating password simply fails to verify.
    pub fn from_login(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Stored password hash (Argon2 PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password with the current parameters
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        let hashed = raw.inner().hash(pepper).map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => {
                AuthError::Internal(format!("Password hashing failed: {msg}"))
            }
            PasswordHashError::InvalidHashFormat => {
                AuthError::Internal("Unexpected error during password hashing".to_string())
            }
        })?;

        Ok(Self(hashed))
    }

    /// Parse a PHC string loaded from the database
    pub fn from_phc_string(phc_string: impl Into<String>) -> AuthResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|_| AuthError::Internal("Invalid password hash in database".to_string()))?;

        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time verification
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }

    /// True when hashed with outdated algorithm/version/cost
    pub fn needs_rehash(&self) -> bool {
        self.0.needs_rehash()
    }

    /// Run one verification against a throwaway hash
    ///
    /// Used when there is no account to check, so a failed login costs the
    /// same whether or not the user name exists.
    pub fn verify_dummy(raw: &RawPassword, pepper: Option<&[u8]>) {
        if let Some(dummy) = dummy_hash() {
            let _ = dummy.verify(raw, pepper);
        }
    }
}

static DUMMY_HASH: OnceLock<Option<UserPassword>> = OnceLock::new();

/// Hash with current parameters of a password nobody types
fn dummy_hash() -> Option<&'static UserPassword> {
    DUMMY_HASH
        .get_or_init(|| {
            let raw = RawPassword::from_login(platform::crypto::to_base64url(
                &platform::crypto::random_bytes(24),
            ));
            match UserPassword::from_raw(&raw, None) {
                Ok(hash) => Some(hash),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to prepare dummy password hash");
                    None
                }
            }
        })
        .as_ref()
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

impl fmt::Display for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HASHED_PASSWORD]")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{Algorithm, Argon2, Params, Version};

    #[test]
    fn test_raw_password_validation() {
        assert!(RawPassword::new("Chalkboard-Lunch-42".to_string()).is_ok());

        use platform::password::MIN_PASSWORD_LENGTH;
        let short_pass = "a".repeat(MIN_PASSWORD_LENGTH - 1);
        assert!(matches!(
            RawPassword::new(short_pass),
            Err(AuthError::PasswordPolicy(_))
        ));

        assert!(RawPassword::new("password123".to_string()).is_err());
        assert!(RawPassword::new("".to_string()).is_err());
    }

    #[test]
    fn test_login_password_skips_policy() {
        // A weak password must still be hashable/verifiable at login
        let _ = RawPassword::from_login("".to_string());
        let _ = RawPassword::from_login("short".to_string());
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("Chalkboard-Lunch-42".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        assert!(hashed.verify(&RawPassword::from_login("Chalkboard-Lunch-42".into()), None));
        assert!(!hashed.verify(&RawPassword::from_login("Chalkboard-Lunch-43".into()), None));
        assert!(!hashed.needs_rehash());
    }

    #[test]
    fn test_hash_with_pepper() {
        let raw = RawPassword::new("Chalkboard-Lunch-42".to_string()).unwrap();
        let pepper = b"portal_pepper";
        let hashed = UserPassword::from_raw(&raw, Some(pepper)).unwrap();

        assert!(hashed.verify(&raw, Some(pepper)));
        assert!(!hashed.verify(&raw, None));
    }

    #[test]
    fn test_outdated_hash_needs_rehash() {
        let weak = Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            Params::new(8 * 1024, 1, 1, None).unwrap(),
        );
        let raw = RawPassword::from_login("Chalkboard-Lunch-42".to_string());
        let phc = raw.inner().hash_with(&weak, None).unwrap();
        let stored = UserPassword::from_phc_string(phc.as_phc_string()).unwrap();

        assert!(stored.verify(&raw, None));
        assert!(stored.needs_rehash());
    }

    #[test]
    fn test_dummy_hash_matches_current_cost() {
        let dummy = dummy_hash().unwrap();
        assert!(!dummy.needs_rehash());
        assert!(!dummy.verify(&RawPassword::from_login("Chalkboard-Lunch-42".into()), None));

        // Prepared once per process
        assert!(std::ptr::eq(dummy, dummy_hash().unwrap()));
        UserPassword::verify_dummy(&RawPassword::from_login(String::new()), None);
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(matches!(
            UserPassword::from_phc_string("not-a-hash"),
            Err(AuthError::Internal(_))
        ));
    }

    #[test]
    fn test_debug_is_redacted() {
        let raw = RawPassword::from_login("Chalkboard-Lunch-42".to_string());
        assert!(!format!("{raw:?}").contains("Chalkboard"));

        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(!format!("{hashed:?}").contains("argon2"));
    }
}
