//! User Entity
//!
//! Portal account as seen by authentication. Accounts are created and
//! managed elsewhere; this crate only reads them and updates the password
//! hash and last-login time.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    user_id::UserId, user_name::UserName, user_password::UserPassword, user_role::UserRole,
    user_status::UserStatus,
};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Login handle (unique)
    pub user_name: UserName,
    pub password_hash: UserPassword,
    pub user_role: UserRole,
    pub user_status: UserStatus,
    /// Name shown in page headers
    pub display_name: String,
    /// Last successful login time
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user
    pub fn new(
        user_name: UserName,
        password_hash: UserPassword,
        user_role: UserRole,
        display_name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: UserId::new(),
            user_name,
            password_hash,
            user_role,
            user_status: UserStatus::Active,
            display_name: display_name.into(),
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if user can login
    pub fn can_login(&self) -> bool {
        self.user_status.can_login()
    }

    /// Record successful login
    pub fn record_login(&mut self, now: DateTime<Utc>) {
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    pub fn set_password(&mut self, password_hash: UserPassword, now: DateTime<Utc>) {
        self.password_hash = password_hash;
        self.updated_at = now;
    }

    pub fn set_status(&mut self, status: UserStatus, now: DateTime<Utc>) {
        self.user_status = status;
        self.updated_at = now;
    }
}
