//! Entity Module

pub mod auth_session;
pub mod login_attempt;
pub mod user;
