//! Session Authenticator
//!
//! Single entry point the portal pages call: login, logout, session and
//! role checks. Holds one store implementing every repository trait and
//! builds the use cases over it.

use std::sync::Arc;

use platform::{
    client::ClientInfo,
    clock::{Clock, SystemClock},
    cookie::CookieWriter,
};

use crate::application::{
    change_password::{ChangePasswordInput, ChangePasswordUseCase},
    check_session::CheckSessionUseCase,
    config::AuthConfig,
    purge::{PurgeExpiredUseCase, PurgeReport},
    sign_in::{SignInInput, SignInOutput, SignInUseCase},
    sign_out::SignOutUseCase,
};
use crate::domain::entity::auth_session::SessionState;
use crate::domain::repository::{LoginAttemptRepository, SessionStore, UserRepository};
use crate::domain::value_object::user_role::RoleRequirement;
use crate::error::AuthResult;

pub struct SessionAuthenticator<R> {
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
}

impl<R> Clone for SessionAuthenticator<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: Arc::clone(&self.config),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R> SessionAuthenticator<R>
where
    R: UserRepository + LoginAttemptRepository + SessionStore + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self::with_clock(repo, config, Arc::new(SystemClock))
    }

    pub fn with_clock(repo: Arc<R>, config: Arc<AuthConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            config,
            clock,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repo
    }

    /// Check credentials and start a new session, writing its cookie
    pub async fn authenticate(
        &self,
        user_name: &str,
        password: String,
        client: &ClientInfo,
        previous_token: Option<&str>,
        cookies: &mut impl CookieWriter,
    ) -> AuthResult<SignInOutput> {
        let input = SignInInput {
            user_name: user_name.to_string(),
            password,
            previous_token: previous_token.map(str::to_string),
        };

        SignInUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.repo.clone(),
            self.config.clone(),
            self.clock.clone(),
        )
        .execute(input, client, cookies)
        .await
    }

    pub async fn is_authenticated(&self, token: Option<&str>) -> bool {
        self.check_session().is_authenticated(token).await
    }

    /// Signed-in user, refreshing the session's activity time
    pub async fn current(&self, token: Option<&str>) -> AuthResult<Option<SessionState>> {
        Ok(self
            .check_session()
            .current(token)
            .await?
            .map(|session| session.state()))
    }

    pub async fn has_role(
        &self,
        token: Option<&str>,
        requirement: impl Into<RoleRequirement>,
    ) -> bool {
        self.check_session()
            .has_role(token, &requirement.into())
            .await
    }

    pub async fn require_role(
        &self,
        token: Option<&str>,
        requirement: &RoleRequirement,
    ) -> AuthResult<SessionState> {
        self.check_session().require_role(token, requirement).await
    }

    pub async fn logout(
        &self,
        token: Option<&str>,
        client: &ClientInfo,
        cookies: &mut impl CookieWriter,
    ) -> AuthResult<()> {
        SignOutUseCase::new(self.repo.clone(), self.config.clone())
            .execute(token, client.secure_transport, cookies)
            .await
    }

    pub async fn change_password(
        &self,
        token: Option<&str>,
        current_password: String,
        new_password: String,
        client: &ClientInfo,
    ) -> AuthResult<()> {
        let session = self.require_role(token, &RoleRequirement::any()).await?;

        ChangePasswordUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.config.clone(),
            self.clock.clone(),
        )
        .execute(
            &session,
            ChangePasswordInput {
                current_password,
                new_password,
            },
            client,
        )
        .await
    }

    /// Delete idle sessions and stale login attempts
    pub async fn purge_expired(&self) -> AuthResult<PurgeReport> {
        PurgeExpiredUseCase::new(self.repo.clone(), self.repo.clone(), self.clock.clone())
            .execute()
            .await
    }

    fn check_session(&self) -> CheckSessionUseCase<R> {
        CheckSessionUseCase::new(self.repo.clone(), self.config.clone(), self.clock.clone())
    }
}
