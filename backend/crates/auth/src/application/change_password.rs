//! Change Password Use Case
//!
//! Wrong current passwords count against the same lockout as failed logins.

use std::sync::Arc;

use platform::{client::ClientInfo, clock::Clock};

use crate::application::config::AuthConfig;
use crate::domain::entity::{auth_session::SessionState, login_attempt::LoginAttempt};
use crate::domain::repository::{LoginAttemptRepository, UserRepository};
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

/// Change password for the signed-in user
pub struct ChangePasswordUseCase<U, A>
where
    U: UserRepository,
    A: LoginAttemptRepository,
{
    user_repo: Arc<U>,
    attempt_repo: Arc<A>,
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
}

impl<U, A> ChangePasswordUseCase<U, A>
where
    U: UserRepository,
    A: LoginAttemptRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        attempt_repo: Arc<A>,
        config: Arc<AuthConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            attempt_repo,
            config,
            clock,
        }
    }

    pub async fn execute(
        &self,
        session: &SessionState,
        input: ChangePasswordInput,
        client: &ClientInfo,
    ) -> AuthResult<()> {
        let now = self.clock.now();

        let user = self
            .user_repo
            .find_by_id(&session.user_id)
            .await?
            .filter(|u| u.can_login())
            .ok_or(AuthError::Unauthenticated)?;

        let limit = LoginAttempt::limit();
        let failures = self
            .attempt_repo
            .count_attempts_since(&user.user_name, limit.window_start(now))
            .await?;

        if limit.is_exceeded(failures) {
            tracing::warn!(
                user_name = %user.user_name,
                reason = "locked_out",
                failures = failures,
                "Password change rejected"
            );
            return Err(AuthError::LockedOut);
        }

        let pepper = self.config.pepper();

        let current = RawPassword::from_login(input.current_password);
        if !user.password_hash.verify(&current, pepper) {
            tracing::info!(
                user_name = %user.user_name,
                reason = "invalid_credentials",
                remaining_attempts = limit.remaining(failures + 1),
                "Password change rejected"
            );

            let attempt = LoginAttempt::failed(user.user_name.clone(), client, now);
            if let Err(e) = self.attempt_repo.record_attempt(&attempt).await {
                tracing::warn!(error = %e, user_name = %user.user_name, "Failed to record login attempt");
            }
            return Err(AuthError::InvalidCredentials);
        }

        let new_password = RawPassword::new(input.new_password)?;
        let new_hash = UserPassword::from_raw(&new_password, pepper)?;

        self.user_repo
            .update_password_hash(&user.user_id, &new_hash, now)
            .await?;

        if let Err(e) = self.attempt_repo.clear_attempts(&user.user_name).await {
            tracing::warn!(error = %e, user_name = %user.user_name, "Failed to clear login attempts");
        }

        tracing::info!(user_name = %user.user_name, "Password changed");
        Ok(())
    }
}
