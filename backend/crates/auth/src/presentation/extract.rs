//! Request Extractors

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{HeaderMap, request::Parts};
use platform::client::ClientInfo;

/// Caller details from headers and the socket peer address
///
/// The peer address is only known when the server was started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
#[derive(Debug, Clone)]
pub struct Client(pub ClientInfo);

impl<S> FromRequestParts<S> for Client
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip());

        Ok(Client(ClientInfo::from_headers(&parts.headers, peer)))
    }
}

/// Session cookie value, if present
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    platform::cookie::extract_cookie(headers, cookie_name)
}
