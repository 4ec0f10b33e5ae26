//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::application::SessionAuthenticator;
use crate::domain::repository::{LoginAttemptRepository, SessionStore, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, SessionStatusResponse,
};
use crate::presentation::extract::{Client, session_token};

// ============================================================================
// Login
// ============================================================================

/// POST /auth/login
pub async fn login<R>(
    State(auth): State<SessionAuthenticator<R>>,
    Client(client): Client,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + LoginAttemptRepository + SessionStore + Send + Sync + 'static,
{
    let previous = session_token(&headers, &auth.config().session_cookie_name);

    let mut response_headers = HeaderMap::new();
    let output = auth
        .authenticate(
            &req.user_name,
            req.password,
            &client,
            previous.as_deref(),
            &mut response_headers,
        )
        .await?;

    Ok((
        StatusCode::OK,
        response_headers,
        Json(LoginResponse::new(output.state, req.next.as_deref())),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /auth/logout
pub async fn logout<R>(
    State(auth): State<SessionAuthenticator<R>>,
    Client(client): Client,
    headers: HeaderMap,
) -> impl IntoResponse
where
    R: UserRepository + LoginAttemptRepository + SessionStore + Send + Sync + 'static,
{
    let token = session_token(&headers, &auth.config().session_cookie_name);

    let mut response_headers = HeaderMap::new();
    // The cookie is cleared either way
    if let Err(e) = auth
        .logout(token.as_deref(), &client, &mut response_headers)
        .await
    {
        tracing::warn!(error = %e, "Failed to destroy session on logout");
    }

    (StatusCode::NO_CONTENT, response_headers)
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /auth/session
pub async fn session_status<R>(
    State(auth): State<SessionAuthenticator<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<SessionStatusResponse>>
where
    R: UserRepository + LoginAttemptRepository + SessionStore + Send + Sync + 'static,
{
    let token = session_token(&headers, &auth.config().session_cookie_name);
    let state = auth.current(token.as_deref()).await?;

    Ok(Json(SessionStatusResponse::from(state)))
}

// ============================================================================
// Change Password
// ============================================================================

/// POST /auth/password
pub async fn change_password<R>(
    State(auth): State<SessionAuthenticator<R>>,
    Client(client): Client,
    headers: HeaderMap,
    Json(req): Json<ChangePasswordRequest>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + LoginAttemptRepository + SessionStore + Send + Sync + 'static,
{
    let token = session_token(&headers, &auth.config().session_cookie_name);

    auth.change_password(
        token.as_deref(),
        req.current_password,
        req.new_password,
        &client,
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
