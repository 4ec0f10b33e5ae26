//! Password Hashing and Verification
//!
//! - Argon2id hashing with the OWASP baseline parameters (m=19456, t=2, p=1)
//! - Verification accepts any Argon2 variant/parameter set found in a PHC
//!   string, so older hashes keep working until they are upgraded
//! - Outdated-hash detection for lazy migration on login
//! - Zeroization of clear text and redacted `Debug`
//! - Optional pepper (application-wide secret appended before hashing)

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Minimum password length in code points
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length in code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violations (only checked for new passwords)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    #[error("Password is too common or follows a predictable pattern")]
    CommonPattern,
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password, erased from memory on drop
///
/// Not `Clone`, and `Debug` never prints the content.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// New password chosen by a user, checked against the policy
    ///
    /// - NFKC normalized first
    /// - 8..=128 code points
    /// - no control characters other than space, tab, newline
    /// - not whitespace-only, not a well-known weak password
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let candidate = Self::for_verification(raw);
        let normalized = candidate.0.as_str();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        if is_common_pattern(normalized) {
            return Err(PasswordPolicyError::CommonPattern);
        }

        Ok(candidate)
    }

    /// Password typed into a login form
    ///
    /// Normalized only, no policy checks.
    pub fn for_verification(raw: String) -> Self {
        let raw = Zeroizing::new(raw);
        Self(raw.nfkc().collect())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Password bytes with the pepper appended
    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.as_bytes().to_vec());
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Hash with Argon2id and the current parameter set
    ///
    /// `pepper` must be the same at verification time.
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        self.hash_with(&current_hasher(), pepper)
    }

    /// Hash with an explicit Argon2 instance (tests and migrations)
    pub fn hash_with(
        &self,
        argon2: &Argon2<'_>,
        pepper: Option<&[u8]>,
    ) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = argon2
            .hash_password(&self.peppered(pepper), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

/// Argon2id, v0x13, OWASP baseline parameters
fn current_hasher() -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())
}

// ============================================================================
// Hashed Password (PHC string, safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// `$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Parse a PHC string loaded from storage
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// Algorithm, version and cost are taken from the PHC string itself.
    /// The final tag comparison is constant-time.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(&password.peppered(pepper), &parsed_hash)
            .is_ok()
    }

    /// True when the hash was produced with anything other than the current
    /// algorithm, version and cost parameters
    pub fn needs_rehash(&self) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.hash) else {
            return true;
        };

        if parsed_hash.algorithm != Algorithm::Argon2id.ident() {
            return true;
        }

        if parsed_hash.version != Some(Version::V0x13 as u32) {
            return true;
        }

        let current = Params::default();
        match Params::try_from(&parsed_hash) {
            Ok(params) => {
                params.m_cost() != current.m_cost()
                    || params.t_cost() != current.t_cost()
                    || params.p_cost() != current.p_cost()
            }
            Err(_) => true,
        }
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Weak password detection
// ============================================================================

fn is_common_pattern(password: &str) -> bool {
    let lower = password.to_lowercase();

    // Single repeated character ("aaaaaaaa")
    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c == first) {
            return true;
        }
    }

    if is_sequential_numbers(&lower) {
        return true;
    }

    const KEYBOARD_PATTERNS: &[&str] = &["qwerty", "asdfgh", "zxcvbn", "qazwsx", "1qaz2wsx"];
    if KEYBOARD_PATTERNS.iter().any(|p| lower.contains(p)) {
        return true;
    }

    // Includes the defaults school systems tend to hand out
    const COMMON_PASSWORDS: &[&str] = &[
        "password",
        "password1",
        "password123",
        "abcdefgh",
        "letmein1",
        "welcome1",
        "welcome123",
        "admin123",
        "teacher123",
        "student123",
        "school123",
        "iloveyou",
        "sunshine",
        "princess",
        "football",
        "baseball",
        "trustno1",
    ];

    COMMON_PASSWORDS.contains(&lower.as_str())
}

/// Only digits, each one step from the previous ("12345678", "98765432")
fn is_sequential_numbers(s: &str) -> bool {
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 4 {
        return false;
    }

    let ascending = digits
        .windows(2)
        .all(|w| w[1] == (w[0] + 1) % 10);
    let descending = digits
        .windows(2)
        .all(|w| w[0] == (w[1] + 1) % 10);

    ascending || descending
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weak_hasher() -> Argon2<'static> {
        Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            Params::new(8 * 1024, 1, 1, None).unwrap(),
        )
    }

    #[test]
    fn test_password_too_short() {
        let result = ClearTextPassword::new("Ab1!".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::TooShort { min: 8, actual: 4 })
        ));
    }

    #[test]
    fn test_password_too_long() {
        let result = ClearTextPassword::new("Ab1!".repeat(40));
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_password_whitespace_only() {
        let result = ClearTextPassword::new("          ".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
    }

    #[test]
    fn test_password_control_character() {
        let result = ClearTextPassword::new("Good\u{0007}Password9".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::InvalidCharacter)));
    }

    #[test]
    fn test_password_common_pattern() {
        for weak in ["password123", "Student123", "qwertyuiop", "12345678", "87654321", "zzzzzzzz"] {
            let result = ClearTextPassword::new(weak.to_string());
            assert!(
                matches!(result, Err(PasswordPolicyError::CommonPattern)),
                "{weak} should be rejected"
            );
        }
    }

    #[test]
    fn test_valid_password() {
        assert!(ClearTextPassword::new("Timetable#Fall2024".to_string()).is_ok());
        assert!(ClearTextPassword::new("パスワード安全です!".to_string()).is_ok());
    }

    #[test]
    fn test_verification_password_skips_policy() {
        // Short legacy passwords must still be checkable at login
        let short = ClearTextPassword::for_verification("abc".to_string());
        let hashed = short.hash_with(&weak_hasher(), None).unwrap();
        assert!(hashed.verify(&ClearTextPassword::for_verification("abc".to_string()), None));
    }

    #[test]
    fn test_nfkc_normalization_matches_equivalent_input() {
        // Fullwidth letters normalize to ASCII
        let stored = ClearTextPassword::for_verification("Passw0rd!x".to_string());
        let hashed = stored.hash_with(&weak_hasher(), None).unwrap();
        let typed = ClearTextPassword::for_verification("Ｐａｓｓｗ０ｒｄ！ｘ".to_string());
        assert!(hashed.verify(&typed, None));
    }

    #[test]
    fn test_hash_and_verify() {
        let password = ClearTextPassword::for_verification("Gradebook-42".to_string());
        let hashed = password.hash(None).unwrap();

        assert!(hashed.verify(&password, None));
        assert!(!hashed.needs_rehash());

        let wrong = ClearTextPassword::for_verification("Gradebook-43".to_string());
        assert!(!hashed.verify(&wrong, None));
    }

    #[test]
    fn test_hash_with_pepper() {
        let password = ClearTextPassword::for_verification("Gradebook-42".to_string());
        let pepper = b"portal-pepper";
        let hashed = password.hash_with(&weak_hasher(), Some(pepper)).unwrap();

        assert!(hashed.verify(&password, Some(pepper)));
        assert!(!hashed.verify(&password, None));
        assert!(!hashed.verify(&password, Some(b"other-pepper")));
    }

    #[test]
    fn test_needs_rehash_for_weaker_params() {
        let password = ClearTextPassword::for_verification("Gradebook-42".to_string());
        let hashed = password.hash_with(&weak_hasher(), None).unwrap();
        assert!(hashed.needs_rehash());
        // Still verifiable with the parameters recorded in the PHC string
        assert!(hashed.verify(&password, None));
    }

    #[test]
    fn test_needs_rehash_for_other_variant() {
        let argon2i = Argon2::new(Algorithm::Argon2i, Version::V0x13, Params::default());
        let password = ClearTextPassword::for_verification("Gradebook-42".to_string());
        let hashed = password.hash_with(&argon2i, None).unwrap();
        assert!(hashed.needs_rehash());
        assert!(hashed.verify(&password, None));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let password = ClearTextPassword::for_verification("Gradebook-42".to_string());
        let hashed = password.hash_with(&weak_hasher(), None).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&password, None));
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(HashedPassword::from_phc_string("md5:5f4dcc3b5aa765d6").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::for_verification("secret-value".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));

        let hashed = password.hash_with(&weak_hasher(), None).unwrap();
        assert!(!format!("{:?}", hashed).contains("argon2"));
    }
}
