//! Application Layer
//!
//! Use cases and application services.

pub mod authenticator;
pub mod change_password;
pub mod check_session;
pub mod config;
pub mod purge;
pub mod sign_in;
pub mod sign_out;

// Re-exports
pub use authenticator::SessionAuthenticator;
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use purge::{PurgeExpiredUseCase, PurgeReport};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
