//! Client identification utilities
//!
//! What the request tells us about the caller: address, user agent, whether
//! it came over TLS, and whether it is a script (AJAX) request.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Maximum stored user-agent length (bytes, cut on a char boundary)
pub const MAX_USER_AGENT_LEN: usize = 512;

/// Client details passed explicitly to authentication
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    /// Client IP address (from X-Forwarded-For or direct connection)
    pub ip: Option<IpAddr>,
    /// User-Agent header, truncated
    pub user_agent: Option<String>,
    /// Request was served over TLS (directly or behind a TLS-terminating proxy)
    pub secure_transport: bool,
}

impl ClientInfo {
    pub fn new(ip: Option<IpAddr>, user_agent: Option<String>, secure_transport: bool) -> Self {
        Self {
            ip,
            user_agent: user_agent.map(truncate_user_agent),
            secure_transport,
        }
    }

    /// Build from request headers and the socket peer address
    pub fn from_headers(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Self {
        let user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Self::new(
            extract_client_ip(headers, direct_ip),
            user_agent,
            is_secure_transport(headers),
        )
    }

    /// IP as string (for storage)
    pub fn ip_string(&self) -> Option<String> {
        self.ip.map(|ip| ip.to_string())
    }
}

fn truncate_user_agent(mut ua: String) -> String {
    if ua.len() > MAX_USER_AGENT_LEN {
        let mut cut = MAX_USER_AGENT_LEN;
        while !ua.is_char_boundary(cut) {
            cut -= 1;
        }
        ua.truncate(cut);
    }
    ua
}

/// Extract client IP address
///
/// First address of X-Forwarded-For (reverse proxy setups), otherwise the
/// direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok())
        .or(direct_ip)
}

/// Whether the original request used HTTPS
///
/// The server itself speaks plain HTTP behind a TLS-terminating proxy, so
/// this relies on `X-Forwarded-Proto` / `Forwarded: proto=`.
pub fn is_secure_transport(headers: &HeaderMap) -> bool {
    let forwarded_proto = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|proto| proto.trim().eq_ignore_ascii_case("https"));

    if let Some(https) = forwarded_proto {
        return https;
    }

    headers
        .get(header::FORWARDED)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| {
            v.split([';', ','])
                .filter_map(|pair| pair.trim().split_once('='))
                .any(|(k, v)| k.eq_ignore_ascii_case("proto") && v.eq_ignore_ascii_case("https"))
        })
}

/// Whether the request came from script rather than navigation
///
/// `X-Requested-With: XMLHttpRequest` is the classic marker; an `Accept`
/// header preferring JSON counts as well.
pub fn is_ajax_request(headers: &HeaderMap) -> bool {
    let requested_with = headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("xmlhttprequest"));

    let wants_json = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));

    requested_with || wants_json
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_info_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static("Mozilla/5.0 Test"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        let direct: IpAddr = "10.1.2.3".parse().unwrap();

        let info = ClientInfo::from_headers(&headers, Some(direct));
        assert_eq!(info.ip, Some(direct));
        assert_eq!(info.user_agent.as_deref(), Some("Mozilla/5.0 Test"));
        assert!(info.secure_transport);
        assert_eq!(info.ip_string().as_deref(), Some("10.1.2.3"));
    }

    #[test]
    fn test_user_agent_truncated_on_char_boundary() {
        let long = "é".repeat(MAX_USER_AGENT_LEN);
        let info = ClientInfo::new(None, Some(long), false);
        let ua = info.user_agent.unwrap();
        assert!(ua.len() <= MAX_USER_AGENT_LEN);
        assert!(ua.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_extract_client_ip_xff() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("192.168.1.1, 10.0.0.1"),
        );

        let ip = extract_client_ip(&headers, None);
        assert_eq!(ip, Some("192.168.1.1".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_falls_back_on_garbage() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("unknown"));
        let direct: IpAddr = "127.0.0.1".parse().unwrap();

        assert_eq!(extract_client_ip(&headers, Some(direct)), Some(direct));
    }

    #[test]
    fn test_secure_transport() {
        let mut headers = HeaderMap::new();
        assert!(!is_secure_transport(&headers));

        headers.insert(header::FORWARDED, HeaderValue::from_static("for=1.2.3.4;proto=https"));
        assert!(is_secure_transport(&headers));

        headers.insert("x-forwarded-proto", HeaderValue::from_static("http"));
        assert!(!is_secure_transport(&headers));
    }

    #[test]
    fn test_is_ajax_request() {
        let mut headers = HeaderMap::new();
        assert!(!is_ajax_request(&headers));

        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
        assert!(is_ajax_request(&headers));

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        assert!(is_ajax_request(&headers));

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/html,application/json;q=0.9"));
        assert!(!is_ajax_request(&headers));
    }
}
