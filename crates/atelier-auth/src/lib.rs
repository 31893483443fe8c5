//! # atelier-auth
//!
//! Authentication for the single-admin back office: Argon2id password
//! hashing and an in-memory store of opaque session tokens carried by
//! the admin cookie.

pub mod password;
pub mod session;

pub use password::PasswordHasher;
pub use session::SessionManager;
