//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

/// Message shown for every failed login, whatever the reason
pub const AUTHENTICATION_FAILED: &str = "Authentication failed";

#[derive(Debug, Error)]
pub enum AuthError {
    /// Too many failed attempts inside the lockout window
    #[error("Too many failed login attempts")]
    LockedOut,

    /// Unknown user, wrong password, or account not active
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No valid session
    #[error("Not authenticated")]
    Unauthenticated,

    /// Valid session, role not allowed
    #[error("Insufficient role")]
    Forbidden,

    /// New password rejected by the policy
    #[error("Password validation failed: {0}")]
    PasswordPolicy(String),

    /// Persistence layer failure
    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::LockedOut | AuthError::InvalidCredentials | AuthError::Unauthenticated => {
                ErrorKind::Unauthorized
            }
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::PasswordPolicy(_) => ErrorKind::BadRequest,
            AuthError::Store(_) => ErrorKind::ServiceUnavailable,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Whether this is a failed login (as opposed to a missing/insufficient session)
    pub fn is_login_failure(&self) -> bool {
        matches!(self, AuthError::LockedOut | AuthError::InvalidCredentials)
    }

    /// Convert to the client-facing error
    ///
    /// Lockout and bad credentials share one message so responses do not
    /// reveal which usernames exist.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::LockedOut | AuthError::InvalidCredentials => {
                AppError::unauthorized(AUTHENTICATION_FAILED)
                    .with_action("Check your user name and password, or try again later")
            }
            AuthError::Unauthenticated => {
                AppError::unauthorized("Please sign in to continue").with_action("Sign in")
            }
            AuthError::Forbidden => {
                AppError::forbidden("You do not have access to this page")
            }
            AuthError::PasswordPolicy(msg) => AppError::bad_request(msg.clone())
                .with_action("Please choose a different password"),
            AuthError::Store(_) => AppError::service_unavailable("Service temporarily unavailable"),
            AuthError::Internal(_) => AppError::internal("Something went wrong"),
        }
    }

    fn log(&self) {
        match self {
            AuthError::Store(e) => {
                tracing::error!(error = %e, "Auth store error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Forbidden => {
                tracing::info!("Request rejected: insufficient role");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_login_failures_are_indistinguishable_to_clients() {
        let locked = AuthError::LockedOut.to_app_error();
        let invalid = AuthError::InvalidCredentials.to_app_error();

        assert_eq!(locked.status_code(), invalid.status_code());
        assert_eq!(locked.message(), invalid.message());
        assert_eq!(locked.message(), AUTHENTICATION_FAILED);

        // Internally they stay distinct
        assert_ne!(
            AuthError::LockedOut.to_string(),
            AuthError::InvalidCredentials.to_string()
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(AuthError::Unauthenticated.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::Forbidden.kind(), ErrorKind::Forbidden);
        assert_eq!(
            AuthError::Store(sqlx::Error::PoolTimedOut).kind(),
            ErrorKind::ServiceUnavailable
        );
        assert_eq!(
            AuthError::PasswordPolicy("too short".into()).kind(),
            ErrorKind::BadRequest
        );
    }

    #[test]
    fn test_into_response_status_codes() {
        let cases = [
            (AuthError::LockedOut, StatusCode::UNAUTHORIZED),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (AuthError::Forbidden, StatusCode::FORBIDDEN),
            (
                AuthError::Store(sqlx::Error::PoolTimedOut),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AuthError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_store_detail_not_exposed() {
        let app_err = AuthError::Store(sqlx::Error::PoolTimedOut).to_app_error();
        assert!(!app_err.message().contains("pool"));
    }

    #[test]
    fn test_is_login_failure() {
        assert!(AuthError::LockedOut.is_login_failure());
        assert!(AuthError::InvalidCredentials.is_login_failure());
        assert!(!AuthError::Unauthenticated.is_login_failure());
        assert!(!AuthError::Forbidden.is_login_failure());
    }
}
