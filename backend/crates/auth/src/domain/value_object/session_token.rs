//! Session Token
//!
//! Cookie value naming a server-side session: `<session_id>.<signature>`
//! where the signature is base64url(HMAC-SHA256(secret, session_id)).
//! A token whose signature does not verify names no session at all.

use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};
use std::fmt;
use uuid::Uuid;

use super::user_id::SessionId;

const SEPARATOR: char = '.';

#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Sign a session id
    pub fn issue(session_id: SessionId, secret: &[u8]) -> Self {
        let id = session_id.to_string();
        let signature = to_base64url(&hmac_sha256(secret, id.as_bytes()));
        Self(format!("{id}{SEPARATOR}{signature}"))
    }

    /// Wrap a raw cookie value
    pub fn from_cookie(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Session id, if the signature verifies
    pub fn verify(&self, secret: &[u8]) -> Option<SessionId> {
        let (id, signature) = self.0.split_once(SEPARATOR)?;
        let signature = from_base64url(signature).ok()?;

        if !verify_hmac_sha256(secret, id.as_bytes(), &signature) {
            return None;
        }

        Uuid::parse_str(id).ok().map(SessionId::from_uuid)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}
