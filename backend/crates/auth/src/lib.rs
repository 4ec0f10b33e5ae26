//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and the `SessionAuthenticator` facade
//! - `infra/` - PostgreSQL and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, router, role gate middleware
//!
//! ## Features
//! - Username + password login for admins, teachers, students, accountants
//! - Lockout after 5 failed logins within 15 minutes
//! - Server-side sessions behind a signed cookie, 30 minute idle timeout
//! - Role checks for pages and JSON endpoints
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, outdated hashes upgraded on login
//! - Fresh session id on every login (session fixation)
//! - Cookies are HttpOnly, SameSite=Strict, Secure over TLS
//! - Failed logins never reveal whether the user exists or is locked out

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::{AuthConfig, SessionAuthenticator};
pub use domain::{RoleRequirement, SessionState, UserRole};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAuthRepository, PgAuthRepository};
pub use presentation::{RoleGate, auth_router, require_role};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
