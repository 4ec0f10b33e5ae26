//! Platform Crate - Technical Infrastructure
//!
//! Technical foundations shared by the portal crates:
//! - Password hashing (Argon2id) and policy checks
//! - HMAC signing and Base64 helpers
//! - Cookie building and parsing
//! - Client information extracted from request headers
//! - Sliding-window attempt limits
//! - Injectable clock

pub mod client;
pub mod clock;
pub mod cookie;
pub mod crypto;
pub mod password;
pub mod rate_limit;
