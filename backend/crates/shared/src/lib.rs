//! Shared Kernel
//!
//! Vocabulary shared by every portal crate:
//! - Unified error type ([`error::app_error::AppError`]) and its classification
//! - Typed identifiers for persisted entities
//!
//! Only things whose meaning is identical across crates belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
