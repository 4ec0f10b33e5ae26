//! Login Attempt Entity
//!
//! One row per failed login. Rows for a user name are cleared on a
//! successful login; rows older than the lockout window stop counting.

use chrono::{DateTime, Utc};
use platform::{client::ClientInfo, rate_limit::AttemptLimit};

use crate::domain::value_object::user_name::UserName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginAttempt {
    pub user_name: UserName,
    pub attempted_at: DateTime<Utc>,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
}

impl LoginAttempt {
    /// Failed logins tolerated inside the window
    pub const MAX_LOGIN_ATTEMPTS: u32 = 5;
    /// Lockout window in minutes
    pub const LOCKOUT_MINUTES: i64 = 15;

    /// Sliding window used for the lockout check
    pub fn limit() -> AttemptLimit {
        AttemptLimit::new(
            Self::MAX_LOGIN_ATTEMPTS,
            chrono::Duration::minutes(Self::LOCKOUT_MINUTES),
        )
    }

    pub fn failed(user_name: UserName, client: &ClientInfo, now: DateTime<Utc>) -> Self {
        Self {
            user_name,
            attempted_at: now,
            client_ip: client.ip_string(),
            user_agent: client.user_agent.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_failed_copies_client_info() {
        let client = ClientInfo::new(
            Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7))),
            Some("Mozilla/5.0".to_string()),
            false,
        );
        let now = Utc::now();
        let attempt = LoginAttempt::failed(UserName::new("alice").unwrap(), &client, now);

        assert_eq!(attempt.attempted_at, now);
        assert_eq!(attempt.client_ip.as_deref(), Some("10.0.0.7"));
        assert_eq!(attempt.user_agent.as_deref(), Some("Mozilla/5.0"));
    }

    #[test]
    fn test_limit_matches_policy() {
        let now = Utc::now();
        assert_eq!(
            LoginAttempt::limit().window_start(now),
            now - chrono::Duration::minutes(15)
        );
        assert!(!LoginAttempt::limit().is_exceeded(4));
        assert!(LoginAttempt::limit().is_exceeded(5));
    }
}
