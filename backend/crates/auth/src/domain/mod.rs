//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    auth_session::{AuthSession, SessionState},
    login_attempt::LoginAttempt,
    user::User,
};
pub use repository::{LoginAttemptRepository, SessionStore, UserRepository};
pub use value_object::user_role::{RoleRequirement, UserRole};
