//! # teamconnect-core
//!
//! Core crate for the TeamConnect client. Contains configuration schemas,
//! typed identifiers, display formatting helpers, the clock abstraction,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other TeamConnect crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
