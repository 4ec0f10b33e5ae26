//! Portal configuration from the environment
//!
//! | variable | meaning |
//! |---|---|
//! | `DATABASE_URL` | Postgres URL; debug builds fall back to an in-memory store |
//! | `SESSION_SECRET` | base64, 32 bytes; debug builds generate one |
//! | `PASSWORD_PEPPER` | optional application-wide password pepper |
//! | `COOKIE_SECURE` | force `Secure` cookies (default: on in release builds) |
//! | `BIND_ADDR` | listen address (default `0.0.0.0:31113`) |
//! | `FRONTEND_ORIGINS` | comma-separated CORS origins |
//! | `DEV_ADMIN_PASSWORD` | debug in-memory store only: seed an `admin` account |

use std::net::SocketAddr;

use anyhow::{Context, bail};
use auth::AuthConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub dev_admin_password: Option<String>,
    pub auth: AuthConfig,
}

impl PortalConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// Build from any key lookup; `development` relaxes required secrets
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        development: bool,
    ) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL");
        if database_url.is_none() && !development {
            bail!("DATABASE_URL must be set in production");
        }

        let session_secret = match get("SESSION_SECRET") {
            Some(encoded) => decode_secret(&encoded)?,
            None if development => {
                tracing::warn!("SESSION_SECRET not set, using a random secret for this run");
                platform::crypto::random_secret()
            }
            None => bail!("SESSION_SECRET must be set in production"),
        };

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(value) => parse_bool(&value)
                .with_context(|| format!("COOKIE_SECURE must be true or false, got {value:?}"))?,
            None => !development,
        };

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be host:port")?;

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let auth = AuthConfig {
            session_secret,
            cookie_secure,
            password_pepper: get("PASSWORD_PEPPER").map(String::into_bytes),
            ..AuthConfig::default()
        };

        Ok(Self {
            database_url,
            bind_addr,
            frontend_origins,
            dev_admin_password: get("DEV_ADMIN_PASSWORD").filter(|_| development),
            auth,
        })
    }
}

fn decode_secret(encoded: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = platform::crypto::from_base64(encoded.trim())
        .context("SESSION_SECRET must be base64")?;

    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| anyhow::anyhow!("SESSION_SECRET must decode to 32 bytes, got {}", bytes.len()))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
