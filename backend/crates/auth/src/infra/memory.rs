//! In-Memory Repository
//!
//! Process-local store for tests and database-less local runs.
//! Nothing survives a restart.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entity::{
    auth_session::AuthSession, login_attempt::LoginAttempt, user::User,
};
use crate::domain::repository::{LoginAttemptRepository, SessionStore, UserRepository};
use crate::domain::value_object::{
    user_id::{SessionId, UserId},
    user_name::UserName,
    user_password::UserPassword,
};
use crate::error::AuthResult;

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    attempts: Vec<LoginAttempt>,
    sessions: HashMap<SessionId, AuthSession>,
}

#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an account
    pub async fn insert_user(&self, user: User) {
        self.tables.write().await.users.insert(user.user_id, user);
    }

    pub async fn attempt_count(&self, user_name: &UserName) -> usize {
        self.tables
            .read()
            .await
            .attempts
            .iter()
            .filter(|a| &a.user_name == user_name)
            .count()
    }

    pub async fn session_count(&self) -> usize {
        self.tables.read().await.sessions.len()
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| &u.user_name == user_name)
            .cloned())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.tables.read().await.users.get(user_id).cloned())
    }

    async fn update_password_hash(
        &self,
        user_id: &UserId,
        password_hash: &UserPassword,
        now: DateTime<Utc>,
    ) -> AuthResult<()> {
        if let Some(user) = self.tables.write().await.users.get_mut(user_id) {
            user.set_password(password_hash.clone(), now);
        }
        Ok(())
    }

    async fn record_login(&self, user_id: &UserId, now: DateTime<Utc>) -> AuthResult<()> {
        if let Some(user) = self.tables.write().await.users.get_mut(user_id) {
            user.record_login(now);
        }
        Ok(())
    }
}

impl LoginAttemptRepository for InMemoryAuthRepository {
    async fn record_attempt(&self, attempt: &LoginAttempt) -> AuthResult<()> {
        self.tables.write().await.attempts.push(attempt.clone());
        Ok(())
    }

    async fn count_attempts_since(
        &self,
        user_name: &UserName,
        since: DateTime<Utc>,
    ) -> AuthResult<u64> {
        let count = self
            .tables
            .read()
            .await
            .attempts
            .iter()
            .filter(|a| &a.user_name == user_name && a.attempted_at >= since)
            .count();
        Ok(count as u64)
    }

    async fn clear_attempts(&self, user_name: &UserName) -> AuthResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.attempts.len();
        tables.attempts.retain(|a| &a.user_name != user_name);
        Ok((before - tables.attempts.len()) as u64)
    }

    async fn purge_attempts_before(&self, before: DateTime<Utc>) -> AuthResult<u64> {
        let mut tables = self.tables.write().await;
        let len = tables.attempts.len();
        tables.attempts.retain(|a| a.attempted_at >= before);
        Ok((len - tables.attempts.len()) as u64)
    }
}

impl SessionStore for InMemoryAuthRepository {
    async fn get(&self, session_id: &SessionId) -> AuthResult<Option<AuthSession>> {
        Ok(self.tables.read().await.sessions.get(session_id).cloned())
    }

    async fn set(&self, session: &AuthSession) -> AuthResult<()> {
        self.tables
            .write()
            .await
            .sessions
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn touch(&self, session_id: &SessionId, now: DateTime<Utc>) -> AuthResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.sessions.get_mut(session_id) {
            Some(session) => {
                session.touch(now);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn destroy(&self, session_id: &SessionId) -> AuthResult<()> {
        self.tables.write().await.sessions.remove(session_id);
        Ok(())
    }

    async fn purge_idle_before(&self, before: DateTime<Utc>) -> AuthResult<u64> {
        let mut tables = self.tables.write().await;
        let len = tables.sessions.len();
        tables.sessions.retain(|_, s| s.last_activity_at >= before);
        Ok((len - tables.sessions.len()) as u64)
    }
}
