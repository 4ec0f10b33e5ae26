//! Check Session Use Case
//!
//! Resolves a session cookie to a live session, enforcing the idle timeout
//! and refreshing the activity timestamp, then applies role checks.

use std::sync::Arc;

use platform::clock::Clock;

use crate::application::config::AuthConfig;
use crate::domain::entity::auth_session::{AuthSession, SessionState};
use crate::domain::repository::SessionStore;
use crate::domain::value_object::{session_token::SessionToken, user_role::RoleRequirement};
use crate::error::{AuthError, AuthResult};

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionStore,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionStore,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            session_repo,
            config,
            clock,
        }
    }

    /// Live session for `token`, touched
    ///
    /// `Ok(None)` for a missing, forged, unknown or idle-expired session.
    /// Store failures are returned, so callers fail closed.
    pub async fn current(&self, token: Option<&str>) -> AuthResult<Option<AuthSession>> {
        let Some(token) = token else {
            return Ok(None);
        };

        let Some(session_id) = SessionToken::from_cookie(token).verify(&self.config.session_secret)
        else {
            tracing::debug!("Session token signature mismatch");
            return Ok(None);
        };

        let Some(mut session) = self.session_repo.get(&session_id).await? else {
            return Ok(None);
        };

        let now = self.clock.now();
        if session.is_idle_expired(now) {
            if let Err(e) = self.session_repo.destroy(&session_id).await {
                tracing::warn!(error = %e, session_id = %session_id, "Failed to destroy expired session");
            }
            tracing::info!(
                session_id = %session_id,
                user_name = %session.user_name,
                "Session expired after inactivity"
            );
            return Ok(None);
        }

        // A concurrent logout may have removed the row since `get`
        if !self.session_repo.touch(&session_id, now).await? {
            tracing::debug!(session_id = %session_id, "Session ended during refresh");
            return Ok(None);
        }
        session.touch(now);

        Ok(Some(session))
    }

    /// Whether `token` names a live session; store failures read as `false`
    pub async fn is_authenticated(&self, token: Option<&str>) -> bool {
        match self.current(token).await {
            Ok(session) => session.is_some(),
            Err(e) => {
                tracing::error!(error = %e, "Session check failed, treating as signed out");
                false
            }
        }
    }

    /// Session state if the signed-in role satisfies `requirement`
    pub async fn require_role(
        &self,
        token: Option<&str>,
        requirement: &RoleRequirement,
    ) -> AuthResult<SessionState> {
        let session = self.current(token).await?.ok_or(AuthError::Unauthenticated)?;

        if !requirement.matches(session.user_role) {
            tracing::info!(
                user_name = %session.user_name,
                role = %session.user_role,
                required = %requirement,
                "Role check failed"
            );
            return Err(AuthError::Forbidden);
        }

        Ok(session.state())
    }

    pub async fn has_role(&self, token: Option<&str>, requirement: &RoleRequirement) -> bool {
        match self.require_role(token, requirement).await {
            Ok(_) => true,
            Err(AuthError::Unauthenticated | AuthError::Forbidden) => false,
            Err(e) => {
                tracing::error!(error = %e, "Role check failed, denying");
                false
            }
        }
    }
}
