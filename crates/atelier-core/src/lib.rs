//! # atelier-core
//!
//! Core crate for Atelier. Contains traits, configuration schemas,
//! typed identifiers, locale handling, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Atelier crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
