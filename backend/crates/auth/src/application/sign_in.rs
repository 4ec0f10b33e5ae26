//! Sign In Use Case
//!
//! Throttled password login that always starts a fresh session.

use std::sync::Arc;

use platform::{client::ClientInfo, clock::Clock, cookie::CookieWriter};

use crate::application::config::AuthConfig;
use crate::domain::entity::{
    auth_session::{AuthSession, SessionState},
    login_attempt::LoginAttempt,
    user::User,
};
use crate::domain::repository::{LoginAttemptRepository, SessionStore, UserRepository};
use crate::domain::value_object::{
    session_token::SessionToken,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
    /// Session cookie sent with the login request, if any
    pub previous_token: Option<String>,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// Token written to the session cookie
    pub session_token: SessionToken,
    pub state: SessionState,
}

/// Sign in use case
pub struct SignInUseCase<U, A, S>
where
    U: UserRepository,
    A: LoginAttemptRepository,
    S: SessionStore,
{
    user_repo: Arc<U>,
    attempt_repo: Arc<A>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
}

impl<U, A, S> SignInUseCase<U, A, S>
where
    U: UserRepository,
    A: LoginAttemptRepository,
    S: SessionStore,
{
    pub fn new(
        user_repo: Arc<U>,
        attempt_repo: Arc<A>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            attempt_repo,
            session_repo,
            config,
            clock,
        }
    }

    pub async fn execute(
        &self,
        input: SignInInput,
        client: &ClientInfo,
        cookies: &mut impl CookieWriter,
    ) -> AuthResult<SignInOutput> {
        let now = self.clock.now();

        let Ok(user_name) = UserName::new(&input.user_name) else {
            tracing::info!(reason = "invalid_credentials", "Login failed: malformed user name");
            return Err(AuthError::InvalidCredentials);
        };

        // Lockout gate; the password is not looked at while locked
        let limit = LoginAttempt::limit();
        let failures = self
            .attempt_repo
            .count_attempts_since(&user_name, limit.window_start(now))
            .await?;

        if limit.is_exceeded(failures) {
            tracing::warn!(
                user_name = %user_name,
                reason = "locked_out",
                failures = failures,
                "Login rejected"
            );
            return Err(AuthError::LockedOut);
        }

        let password = RawPassword::from_login(input.password);
        let pepper = self.config.pepper();

        let verified = match self.user_repo.find_by_user_name(&user_name).await? {
            Some(user) if user.can_login() => {
                user.password_hash.verify(&password, pepper).then_some(user)
            }
            _ => {
                // Unknown and inactive accounts pay the same hashing cost
                UserPassword::verify_dummy(&password, pepper);
                None
            }
        };

        let Some(user) = verified else {
            self.record_failure(user_name, client, limit.remaining(failures + 1), now)
                .await;
            return Err(AuthError::InvalidCredentials);
        };

        self.upgrade_hash_if_needed(&user, &password).await;

        if let Err(e) = self.attempt_repo.clear_attempts(&user.user_name).await {
            tracing::warn!(error = %e, user_name = %user.user_name, "Failed to clear login attempts");
        }

        if let Err(e) = self.user_repo.record_login(&user.user_id, now).await {
            tracing::warn!(error = %e, user_name = %user.user_name, "Failed to record last login");
        }

        // Session fixation: never carry a pre-login session over
        if let Some(previous) = input.previous_token.as_deref() {
            self.destroy_previous(previous).await;
        }

        let session = AuthSession::start(&user, client, now);
        self.session_repo.set(&session).await?;

        let session_token = SessionToken::issue(session.session_id, &self.config.session_secret);
        cookies.write_cookie(
            self.config
                .cookie_config(client.secure_transport)
                .build_set_cookie(session_token.as_str()),
        );

        tracing::info!(
            user_name = %user.user_name,
            role = %user.user_role,
            session_id = %session.session_id,
            "User signed in"
        );

        Ok(SignInOutput {
            session_token,
            state: session.state(),
        })
    }

    async fn record_failure(
        &self,
        user_name: UserName,
        client: &ClientInfo,
        remaining: u32,
        now: chrono::DateTime<chrono::Utc>,
    ) {
        tracing::info!(
            user_name = %user_name,
            reason = "invalid_credentials",
            remaining_attempts = remaining,
            "Login failed"
        );

        let attempt = LoginAttempt::failed(user_name, client, now);
        if let Err(e) = self.attempt_repo.record_attempt(&attempt).await {
            tracing::warn!(error = %e, user_name = %attempt.user_name, "Failed to record login attempt");
        }
    }

    /// Re-hash with current parameters; never blocks the login
    async fn upgrade_hash_if_needed(&self, user: &User, password: &RawPassword) {
        if !user.password_hash.needs_rehash() {
            return;
        }

        let upgraded = match UserPassword::from_raw(password, self.config.pepper()) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!(error = %e, user_name = %user.user_name, "Password rehash failed");
                return;
            }
        };

        match self
            .user_repo
            .update_password_hash(&user.user_id, &upgraded, self.clock.now())
            .await
        {
            Ok(()) => tracing::info!(user_name = %user.user_name, "Password hash upgraded"),
            Err(e) => {
                tracing::warn!(error = %e, user_name = %user.user_name, "Failed to store upgraded password hash")
            }
        }
    }

    async fn destroy_previous(&self, previous: &str) {
        let Some(session_id) =
            SessionToken::from_cookie(previous).verify(&self.config.session_secret)
        else {
            return;
        };

        if let Err(e) = self.session_repo.destroy(&session_id).await {
            tracing::warn!(error = %e, session_id = %session_id, "Failed to destroy previous session");
        }
    }
}
