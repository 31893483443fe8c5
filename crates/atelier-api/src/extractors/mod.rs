//! Request extractors.

pub mod auth;
pub mod locale;

pub use auth::AdminSession;
pub use locale::RequestLocale;
