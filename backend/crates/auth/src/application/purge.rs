//! Purge Expired Use Case
//!
//! Maintenance sweep for idle sessions and stale login attempts.

use std::sync::Arc;

use platform::clock::Clock;

use crate::domain::entity::{auth_session::AuthSession, login_attempt::LoginAttempt};
use crate::domain::repository::{LoginAttemptRepository, SessionStore};
use crate::error::AuthResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeReport {
    pub sessions: u64,
    pub attempts: u64,
}

pub struct PurgeExpiredUseCase<A, S>
where
    A: LoginAttemptRepository,
    S: SessionStore,
{
    attempt_repo: Arc<A>,
    session_repo: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<A, S> PurgeExpiredUseCase<A, S>
where
    A: LoginAttemptRepository,
    S: SessionStore,
{
    pub fn new(attempt_repo: Arc<A>, session_repo: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            attempt_repo,
            session_repo,
            clock,
        }
    }

    pub async fn execute(&self) -> AuthResult<PurgeReport> {
        let now = self.clock.now();

        let sessions = self
            .session_repo
            .purge_idle_before(now - AuthSession::idle_timeout())
            .await?;
        let attempts = self
            .attempt_repo
            .purge_attempts_before(LoginAttempt::limit().window_start(now))
            .await?;

        tracing::info!(sessions = sessions, attempts = attempts, "Purged expired auth data");
        Ok(PurgeReport { sessions, attempts })
    }
}
