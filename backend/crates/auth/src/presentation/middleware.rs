//! Role Gate Middleware
//!
//! Protects routes behind a [`RoleRequirement`]. Browsers without a session
//! are redirected to the login page; script (AJAX) callers get JSON errors.
//!
//! ```ignore
//! let gate = RoleGate::new(auth.clone(), UserRole::Admin);
//! Router::new()
//!     .route("/admin/classes", get(list_classes))
//!     .route_layer(middleware::from_fn_with_state(gate, require_role::<PgAuthRepository>));
//! ```

use std::sync::Arc;

use axum::extract::{OriginalUri, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use platform::client::{is_ajax_request, is_secure_transport};
use platform::cookie::CookieWriter;

use crate::application::SessionAuthenticator;
use crate::domain::repository::{LoginAttemptRepository, SessionStore, UserRepository};
use crate::domain::value_object::user_role::RoleRequirement;
use crate::error::AuthError;
use crate::presentation::extract::session_token;

/// Default login page for browser redirects
pub const LOGIN_PATH: &str = "/login";

/// Middleware state
pub struct RoleGate<R> {
    pub auth: SessionAuthenticator<R>,
    pub requirement: Arc<RoleRequirement>,
    pub login_path: Arc<str>,
}

impl<R> Clone for RoleGate<R> {
    fn clone(&self) -> Self {
        Self {
            auth: self.auth.clone(),
            requirement: Arc::clone(&self.requirement),
            login_path: Arc::clone(&self.login_path),
        }
    }
}

impl<R> RoleGate<R> {
    pub fn new(auth: SessionAuthenticator<R>, requirement: impl Into<RoleRequirement>) -> Self {
        Self {
            auth,
            requirement: Arc::new(requirement.into()),
            login_path: Arc::from(LOGIN_PATH),
        }
    }

    pub fn with_login_path(mut self, login_path: &str) -> Self {
        self.login_path = Arc::from(login_path);
        self
    }
}

/// Let the request through only for a session whose role matches
///
/// On success the [`SessionState`](crate::domain::SessionState) is put into
/// request extensions for downstream handlers.
pub async fn require_role<R>(
    State(gate): State<RoleGate<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: UserRepository + LoginAttemptRepository + SessionStore + Send + Sync + 'static,
{
    let headers = req.headers();
    let token = session_token(headers, &gate.auth.config().session_cookie_name);
    let ajax = is_ajax_request(headers);
    let secure = is_secure_transport(headers);

    match gate
        .auth
        .require_role(token.as_deref(), &gate.requirement)
        .await
    {
        Ok(state) => {
            req.extensions_mut().insert(state);
            next.run(req).await
        }
        Err(AuthError::Unauthenticated) if ajax => AuthError::Unauthenticated.into_response(),
        Err(AuthError::Unauthenticated) => {
            let target = login_redirect(&gate.login_path, &req);
            tracing::debug!(location = %target, "Redirecting to login");

            let mut response = Redirect::to(&target).into_response();
            if token.is_some() {
                response.headers_mut().write_cookie(
                    gate.auth
                        .config()
                        .cookie_config(secure)
                        .build_delete_cookie(),
                );
            }
            response
        }
        Err(AuthError::Forbidden) if ajax => AuthError::Forbidden.into_response(),
        Err(AuthError::Forbidden) => (StatusCode::FORBIDDEN, "Forbidden").into_response(),
        // Store failures: fail closed
        Err(e) => e.into_response(),
    }
}

/// `<login_path>?next=<original path and query>`
fn login_redirect(login_path: &str, req: &Request) -> String {
    let uri = req
        .extensions()
        .get::<OriginalUri>()
        .map(|original| &original.0)
        .unwrap_or(req.uri());

    let next = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    format!("{login_path}?next={}", urlencoding::encode(next))
}
