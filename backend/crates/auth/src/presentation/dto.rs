//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::auth_session::SessionState;
use crate::domain::value_object::user_role::UserRole;

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
    /// Page the user was sent away from
    #[serde(default)]
    pub next: Option<String>,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("user_name", &self.user_name)
            .field("password", &"[REDACTED]")
            .field("next", &self.next)
            .finish()
    }
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_name: String,
    pub display_name: String,
    pub role: UserRole,
    /// Where the client should navigate next
    pub redirect_to: String,
}

impl LoginResponse {
    pub fn new(state: SessionState, next: Option<&str>) -> Self {
        let redirect_to = next
            .filter(|path| is_safe_redirect(path))
            .unwrap_or_else(|| state.role.home_path())
            .to_string();

        Self {
            user_name: state.user_name.into(),
            display_name: state.display_name,
            role: state.role,
            redirect_to,
        }
    }
}

/// Same-origin relative path only (`/x`, not `//host` or `/\host`)
pub fn is_safe_redirect(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.starts_with("/\\")
        && !path.chars().any(char::is_control)
}

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

impl From<Option<SessionState>> for SessionStatusResponse {
    fn from(state: Option<SessionState>) -> Self {
        match state {
            Some(state) => Self {
                authenticated: true,
                user_name: Some(state.user_name.into()),
                display_name: Some(state.display_name),
                role: Some(state.role),
            },
            None => Self {
                authenticated: false,
                user_name: None,
                display_name: None,
                role: None,
            },
        }
    }
}

// ============================================================================
// Change Password
// ============================================================================

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl std::fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ChangePasswordRequest { .. }")
    }
}
