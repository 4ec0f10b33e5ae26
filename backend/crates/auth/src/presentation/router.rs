//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::SessionAuthenticator;
use crate::domain::repository::{LoginAttemptRepository, SessionStore, UserRepository};
use crate::presentation::handlers;

/// Login/logout/session/password routes for any repository implementation
pub fn auth_router<R>(auth: SessionAuthenticator<R>) -> Router
where
    R: UserRepository + LoginAttemptRepository + SessionStore + Send + Sync + 'static,
{
    Router::new()
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route("/session", get(handlers::session_status::<R>))
        .route("/password", post(handlers::change_password::<R>))
        .with_state(auth)
}
