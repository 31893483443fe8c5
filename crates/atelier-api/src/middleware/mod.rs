//! HTTP middleware.

pub mod locale;
pub mod logging;
