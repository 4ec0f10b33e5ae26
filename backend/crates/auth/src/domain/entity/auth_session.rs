//! Auth Session Entity
//!
//! Server-side login session, referenced from the browser by a signed
//! cookie token. Sessions have no absolute lifetime; they end on logout or
//! after `IDLE_TIMEOUT_MINUTES` without an authenticated request.

use chrono::{DateTime, Duration, Utc};
use platform::client::ClientInfo;
use serde::Serialize;

use crate::domain::entity::user::User;
use crate::domain::value_object::{
    user_id::{SessionId, UserId},
    user_name::UserName,
    user_role::UserRole,
};

/// Auth session entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub user_name: UserName,
    /// Role at login time
    pub user_role: UserRole,
    pub display_name: String,
    /// Client IP (for auditing)
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl AuthSession {
    /// Inactivity after which the session is gone
    pub const IDLE_TIMEOUT_MINUTES: i64 = 30;

    pub fn idle_timeout() -> Duration {
        Duration::minutes(Self::IDLE_TIMEOUT_MINUTES)
    }

    /// New session with a fresh random id
    pub fn start(user: &User, client: &ClientInfo, now: DateTime<Utc>) -> Self {
        Self {
            session_id: SessionId::new(),
            user_id: user.user_id,
            user_name: user.user_name.clone(),
            user_role: user.user_role,
            display_name: user.display_name.clone(),
            client_ip: client.ip_string(),
            user_agent: client.user_agent.clone(),
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Idle longer than the timeout (exactly at the limit is still alive)
    pub fn is_idle_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.last_activity_at > Self::idle_timeout()
    }

    /// Update last activity timestamp
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity_at = now;
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            user_id: self.user_id,
            user_name: self.user_name.clone(),
            role: self.user_role,
            display_name: self.display_name.clone(),
        }
    }
}

/// What callers get to know about the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(skip)]
    pub user_id: UserId,
    pub user_name: UserName,
    pub role: UserRole,
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::{RawPassword, UserPassword};

    fn session(now: DateTime<Utc>) -> AuthSession {
        let raw = RawPassword::from_login("Chalkboard-Lunch-42".to_string());
        let user = User::new(
            UserName::new("bob").unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
            UserRole::Student,
            "Bob Jones",
            now,
        );
        AuthSession::start(&user, &ClientInfo::default(), now)
    }

    #[test]
    fn test_start_copies_user() {
        let now = Utc::now();
        let session = session(now);
        assert_eq!(session.user_name.as_str(), "bob");
        assert_eq!(session.user_role, UserRole::Student);
        assert_eq!(session.display_name, "Bob Jones");
        assert_eq!(session.created_at, now);
        assert_eq!(session.last_activity_at, now);
    }

    #[test]
    fn test_fresh_ids() {
        let now = Utc::now();
        assert_ne!(session(now).session_id, session(now).session_id);
    }

    #[test]
    fn test_idle_expiry_boundary() {
        let now = Utc::now();
        let session = session(now);

        assert!(!session.is_idle_expired(now + Duration::minutes(29)));
        assert!(!session.is_idle_expired(now + Duration::minutes(30)));
        assert!(session.is_idle_expired(now + Duration::minutes(30) + Duration::seconds(1)));
    }

    #[test]
    fn test_touch_extends_idle_window() {
        let now = Utc::now();
        let mut session = session(now);

        session.touch(now + Duration::minutes(29));
        assert!(!session.is_idle_expired(now + Duration::minutes(58)));
        assert!(session.is_idle_expired(now + Duration::minutes(90)));
    }

    #[test]
    fn test_state_serialization_hides_user_id() {
        let session = session(Utc::now());
        let json = serde_json::to_value(session.state()).unwrap();
        assert_eq!(json["userName"], "bob");
        assert_eq!(json["role"], "student");
        assert_eq!(json["displayName"], "Bob Jones");
        assert!(json.get("userId").is_none());
    }
}
