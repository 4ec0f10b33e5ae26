//! Cookie Management
//!
//! `Set-Cookie` building/parsing and the [`CookieWriter`] capability used by
//! code that issues or clears cookies without owning the response.

use axum::http::{HeaderMap, HeaderValue, header};

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    #[default]
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Sink for `Set-Cookie` header values
pub trait CookieWriter {
    fn write_cookie(&mut self, set_cookie: String);
}

impl CookieWriter for HeaderMap {
    fn write_cookie(&mut self, set_cookie: String) {
        match HeaderValue::from_str(&set_cookie) {
            Ok(value) => {
                self.append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!(error = %e, "Dropping invalid Set-Cookie value"),
        }
    }
}

impl CookieWriter for Vec<String> {
    fn write_cookie(&mut self, set_cookie: String) {
        self.push(set_cookie);
    }
}

/// Cookie attributes
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    /// `None` makes a browser-session cookie
    pub max_age_secs: Option<i64>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Strict,
            path: "/".to_string(),
            max_age_secs: None,
        }
    }
}

impl CookieConfig {
    /// Build Set-Cookie header value
    pub fn build_set_cookie(&self, value: &str) -> String {
        let mut cookie = format!("{}={}", self.name, value);
        self.push_attributes(&mut cookie);

        if let Some(max_age) = self.max_age_secs {
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }

        cookie
    }

    /// Build Set-Cookie header that expires the cookie
    ///
    /// Name, path and flags match [`Self::build_set_cookie`] so the browser
    /// replaces the same cookie.
    pub fn build_delete_cookie(&self) -> String {
        let mut cookie = format!("{}=", self.name);
        self.push_attributes(&mut cookie);
        cookie.push_str("; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT");
        cookie
    }

    fn push_attributes(&self, cookie: &mut String) {
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));
    }
}

/// Extract a cookie value from request headers
///
/// Every `Cookie` header is searched; the first match wins.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CookieConfig {
        CookieConfig {
            name: "portal_session".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Strict,
            path: "/".to_string(),
            max_age_secs: None,
        }
    }

    #[test]
    fn test_build_set_cookie() {
        let cookie = config().build_set_cookie("abc.def");
        assert_eq!(
            cookie,
            "portal_session=abc.def; HttpOnly; Secure; SameSite=Strict; Path=/"
        );
    }

    #[test]
    fn test_build_set_cookie_with_max_age_and_no_secure() {
        let cookie = CookieConfig {
            secure: false,
            max_age_secs: Some(1800),
            ..config()
        }
        .build_set_cookie("v");
        assert!(!cookie.contains("Secure"));
        assert!(cookie.ends_with("; Max-Age=1800"));
    }

    #[test]
    fn test_build_delete_cookie_keeps_scope_and_flags() {
        let cookie = config().build_delete_cookie();
        assert!(cookie.starts_with("portal_session=;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; portal_session=abc123; empty="),
        );

        assert_eq!(
            extract_cookie(&headers, "portal_session"),
            Some("abc123".to_string())
        );
        assert_eq!(extract_cookie(&headers, "theme"), Some("dark".to_string()));
        assert_eq!(extract_cookie(&headers, "empty"), None);
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_cookie_from_second_header() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("b=2"));
        assert_eq!(extract_cookie(&headers, "b"), Some("2".to_string()));
    }

    #[test]
    fn test_header_map_writer_appends() {
        let mut headers = HeaderMap::new();
        headers.write_cookie(config().build_set_cookie("one"));
        headers.write_cookie(config().build_delete_cookie());
        assert_eq!(headers.get_all(header::SET_COOKIE).iter().count(), 2);
    }
}
