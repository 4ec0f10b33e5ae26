//! Application Configuration
//!
//! Configuration for the Auth application layer. Lockout and idle-timeout
//! durations are fixed policy on the entities, not configuration.

use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Always mark the cookie `Secure`, even for plain-HTTP requests
    pub cookie_secure: bool,
    /// Cookie path
    pub cookie_path: String,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "portal_session".to_string(),
            session_secret: [0u8; 32],
            cookie_secure: true,
            cookie_path: "/".to_string(),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: platform::crypto::random_secret(),
            ..Default::default()
        }
    }

    /// Create config for development (Secure only over TLS)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Session cookie attributes for one request
    ///
    /// `Secure` is set when the request came over TLS or the config forces it.
    pub fn cookie_config(&self, secure_transport: bool) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: secure_transport || self.cookie_secure,
            http_only: true,
            same_site: SameSite::Strict,
            path: self.cookie_path.clone(),
            max_age_secs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_secrets_differ() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_ne!(a.session_secret, b.session_secret);
        assert_ne!(a.session_secret, [0u8; 32]);
    }

    #[test]
    fn test_cookie_secure_follows_transport_in_development() {
        let config = AuthConfig::development();
        assert!(!config.cookie_config(false).secure);
        assert!(config.cookie_config(true).secure);
    }

    #[test]
    fn test_cookie_secure_forced() {
        let config = AuthConfig::default();
        assert!(config.cookie_config(false).secure);
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = AuthConfig::development()
            .cookie_config(false)
            .build_set_cookie("token");
        assert_eq!(
            cookie,
            "portal_session=token; HttpOnly; SameSite=Strict; Path=/"
        );
    }
}
