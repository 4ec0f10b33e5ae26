//! Sign Out Use Case
//!
//! Invalidates a user session and clears the cookie.

use std::sync::Arc;

use platform::cookie::CookieWriter;

use crate::application::config::AuthConfig;
use crate::domain::repository::SessionStore;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionStore,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionStore,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Destroy the session behind `token` (if any) and expire the cookie
    ///
    /// The expired cookie is written even when the store call fails.
    pub async fn execute(
        &self,
        token: Option<&str>,
        secure_transport: bool,
        cookies: &mut impl CookieWriter,
    ) -> AuthResult<()> {
        cookies.write_cookie(
            self.config
                .cookie_config(secure_transport)
                .build_delete_cookie(),
        );

        let Some(session_id) = token
            .and_then(|t| SessionToken::from_cookie(t).verify(&self.config.session_secret))
        else {
            return Ok(());
        };

        self.session_repo.destroy(&session_id).await?;

        tracing::info!(session_id = %session_id, "User signed out");
        Ok(())
    }
}
