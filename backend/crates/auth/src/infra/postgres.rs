//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    auth_session::AuthSession, login_attempt::LoginAttempt, user::User,
};
use crate::domain::repository::{LoginAttemptRepository, SessionStore, UserRepository};
use crate::domain::value_object::{
    user_id::{SessionId, UserId},
    user_name::UserName,
    user_password::UserPassword,
    user_role::UserRole,
    user_status::UserStatus,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                password_hash,
                user_role,
                user_status,
                display_name,
                last_login_at,
                created_at,
                updated_at
            FROM users
            WHERE user_name = $1
            "#,
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                password_hash,
                user_role,
                user_status,
                display_name,
                last_login_at,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn update_password_hash(
        &self,
        user_id: &UserId,
        password_hash: &UserPassword,
        now: DateTime<Utc>,
    ) -> AuthResult<()> {
        sqlx::query("UPDATE users SET password_hash = $2, updated_at = $3 WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .bind(password_hash.as_phc_string())
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn record_login(&self, user_id: &UserId, now: DateTime<Utc>) -> AuthResult<()> {
        sqlx::query("UPDATE users SET last_login_at = $2, updated_at = $2 WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Login Attempt Repository Implementation
// ============================================================================

impl LoginAttemptRepository for PgAuthRepository {
    async fn record_attempt(&self, attempt: &LoginAttempt) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO login_attempts (
                user_name,
                attempted_at,
                client_ip,
                user_agent
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(attempt.user_name.as_str())
        .bind(attempt.attempted_at)
        .bind(attempt.client_ip.as_deref())
        .bind(attempt.user_agent.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn count_attempts_since(
        &self,
        user_name: &UserName,
        since: DateTime<Utc>,
    ) -> AuthResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM login_attempts WHERE user_name = $1 AND attempted_at >= $2",
        )
        .bind(user_name.as_str())
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn clear_attempts(&self, user_name: &UserName) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM login_attempts WHERE user_name = $1")
            .bind(user_name.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn purge_attempts_before(&self, before: DateTime<Utc>) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM login_attempts WHERE attempted_at < $1")
            .bind(before)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Session Store Implementation
// ============================================================================

impl SessionStore for PgAuthRepository {
    async fn get(&self, session_id: &SessionId) -> AuthResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, AuthSessionRow>(
            r#"
            SELECT
                session_id,
                user_id,
                user_name,
                user_role,
                display_name,
                client_ip,
                user_agent,
                created_at,
                last_activity_at
            FROM auth_sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_session()).transpose()
    }

    async fn set(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                session_id,
                user_id,
                user_name,
                user_role,
                display_name,
                client_ip,
                user_agent,
                created_at,
                last_activity_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(session.user_name.as_str())
        .bind(session.user_role.code())
        .bind(&session.display_name)
        .bind(session.client_ip.as_deref())
        .bind(session.user_agent.as_deref())
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn touch(&self, session_id: &SessionId, now: DateTime<Utc>) -> AuthResult<bool> {
        let updated =
            sqlx::query("UPDATE auth_sessions SET last_activity_at = $2 WHERE session_id = $1")
                .bind(session_id.as_uuid())
                .bind(now)
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(updated > 0)
    }

    async fn destroy(&self, session_id: &SessionId) -> AuthResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn purge_idle_before(&self, before: DateTime<Utc>) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE last_activity_at < $1")
            .bind(before)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    user_name: String,
    password_hash: String,
    user_role: String,
    user_status: String,
    display_name: String,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            user_name: UserName::from_trusted(self.user_name),
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            user_role: parse_role(&self.user_role)?,
            user_status: UserStatus::from_code(&self.user_status).ok_or_else(|| {
                AuthError::Internal(format!("Invalid user_status: {}", self.user_status))
            })?,
            display_name: self.display_name,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AuthSessionRow {
    session_id: Uuid,
    user_id: Uuid,
    user_name: String,
    user_role: String,
    display_name: String,
    client_ip: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
}

impl AuthSessionRow {
    fn into_session(self) -> AuthResult<AuthSession> {
        Ok(AuthSession {
            session_id: SessionId::from_uuid(self.session_id),
            user_id: UserId::from_uuid(self.user_id),
            user_name: UserName::from_trusted(self.user_name),
            user_role: parse_role(&self.user_role)?,
            display_name: self.display_name,
            client_ip: self.client_ip,
            user_agent: self.user_agent,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        })
    }
}

fn parse_role(code: &str) -> AuthResult<UserRole> {
    UserRole::from_code(code).ok_or_else(|| AuthError::Internal(format!("Invalid user_role: {code}")))
}
