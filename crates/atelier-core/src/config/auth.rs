//! Admin authentication configuration.

use serde::{Deserialize, Serialize};

/// Settings for the single-admin session gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Admin username.
    pub admin_username: String,
    /// Argon2id hash of the admin password.
    ///
    /// Generate one with `atelier-cli hash-password`.
    pub admin_password_hash: String,
    /// Session lifetime in seconds (default 24 hours).
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: u64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub session_cookie_name: String,
    /// Whether the session cookie is marked `Secure`.
    #[serde(default)]
    pub secure_cookies: bool,
}

fn default_session_ttl() -> u64 {
    86_400
}

fn default_cookie_name() -> String {
    "auth_session".to_string()
}
