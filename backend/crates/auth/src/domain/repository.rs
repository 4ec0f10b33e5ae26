//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use chrono::{DateTime, Utc};

use crate::domain::entity::{
    auth_session::AuthSession, login_attempt::LoginAttempt, user::User,
};
use crate::domain::value_object::{
    user_id::{SessionId, UserId},
    user_name::UserName,
    user_password::UserPassword,
};
use crate::error::AuthResult;

/// Credential records
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by user name
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Replace the stored password hash
    async fn update_password_hash(
        &self,
        user_id: &UserId,
        password_hash: &UserPassword,
        now: DateTime<Utc>,
    ) -> AuthResult<()>;

    /// Set `last_login_at`
    async fn record_login(&self, user_id: &UserId, now: DateTime<Utc>) -> AuthResult<()>;
}

/// Failed login bookkeeping
#[trait_variant::make(LoginAttemptRepository: Send)]
pub trait LocalLoginAttemptRepository {
    async fn record_attempt(&self, attempt: &LoginAttempt) -> AuthResult<()>;

    /// Failed attempts for `user_name` at or after `since`
    async fn count_attempts_since(
        &self,
        user_name: &UserName,
        since: DateTime<Utc>,
    ) -> AuthResult<u64>;

    /// Delete every attempt for `user_name`, returns rows removed
    async fn clear_attempts(&self, user_name: &UserName) -> AuthResult<u64>;

    /// Delete attempts older than `before`
    async fn purge_attempts_before(&self, before: DateTime<Utc>) -> AuthResult<u64>;
}

/// Server-side session storage
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    async fn get(&self, session_id: &SessionId) -> AuthResult<Option<AuthSession>>;

    /// Insert a newly started session
    async fn set(&self, session: &AuthSession) -> AuthResult<()>;

    /// Move `last_activity_at` forward
    ///
    /// Never re-creates a row; `false` when the session is already gone.
    async fn touch(&self, session_id: &SessionId, now: DateTime<Utc>) -> AuthResult<bool>;

    /// Delete, no error if absent
    async fn destroy(&self, session_id: &SessionId) -> AuthResult<()>;

    /// Delete sessions whose last activity is older than `before`
    async fn purge_idle_before(&self, before: DateTime<Utc>) -> AuthResult<u64>;
}
