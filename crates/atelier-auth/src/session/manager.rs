//! In-memory admin session lifecycle.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::info;

use atelier_core::config::auth::AuthConfig;
use atelier_core::error::AppError;
use atelier_core::result::AppResult;

use crate::password::PasswordHasher;
use crate::session::token;

/// A live admin session.
#[derive(Debug, Clone)]
struct Session {
    expires_at: DateTime<Utc>,
}

/// Issues and validates the opaque tokens carried by the admin cookie.
///
/// Sessions live only in memory; restarting the server logs the admin
/// out. The token's presence and freshness is the entire authentication
/// state — no content inside it is ever inspected.
#[derive(Debug)]
pub struct SessionManager {
    config: AuthConfig,
    hasher: PasswordHasher,
    sessions: DashMap<String, Session>,
}

impl SessionManager {
    /// Create a new session manager.
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            hasher: PasswordHasher::new(),
            sessions: DashMap::new(),
        }
    }

    /// Verify the admin credentials and issue a session token.
    pub fn login(&self, username: &str, password: &str) -> AppResult<String> {
        if username != self.config.admin_username {
            return Err(AppError::authentication("Invalid username or password"));
        }

        let matches = self
            .hasher
            .verify_password(password, &self.config.admin_password_hash)?;
        if !matches {
            return Err(AppError::authentication("Invalid username or password"));
        }

        self.purge_expired();

        let token = token::generate_token();
        let expires_at = Utc::now() + Duration::seconds(self.config.session_ttl_seconds as i64);
        self.sessions.insert(token.clone(), Session { expires_at });

        info!(username, "Admin logged in");
        Ok(token)
    }

    /// Whether the token names a live session.
    pub fn validate(&self, token: &str) -> bool {
        let live = match self.sessions.get(token) {
            Some(session) => session.expires_at > Utc::now(),
            None => return false,
        };
        if !live {
            self.sessions.remove(token);
        }
        live
    }

    /// Revoke a session token (logout).
    pub fn revoke(&self, token: &str) {
        if self.sessions.remove(token).is_some() {
            info!("Admin session revoked");
        }
    }

    /// Number of live sessions.
    pub fn active_sessions(&self) -> usize {
        self.purge_expired();
        self.sessions.len()
    }

    fn purge_expired(&self) {
        let now = Utc::now();
        self.sessions.retain(|_, session| session.expires_at > now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(ttl_seconds: u64) -> SessionManager {
        let hasher = PasswordHasher::new();
        SessionManager::new(AuthConfig {
            admin_username: "admin".to_string(),
            admin_password_hash: hasher.hash_password("s3cret").expect("hash"),
            session_ttl_seconds: ttl_seconds,
            session_cookie_name: "auth_session".to_string(),
            secure_cookies: false,
        })
    }

    #[test]
    fn test_login_issues_validatable_token() {
        let manager = manager(3600);
        let token = manager.login("admin", "s3cret").expect("login");
        assert!(manager.validate(&token));
        assert_eq!(manager.active_sessions(), 1);
    }

    #[test]
    fn test_bad_credentials_are_rejected() {
        let manager = manager(3600);
        assert!(manager.login("admin", "wrong").is_err());
        assert!(manager.login("someone", "s3cret").is_err());
        assert_eq!(manager.active_sessions(), 0);
    }

    #[test]
    fn test_revoked_token_stops_validating() {
        let manager = manager(3600);
        let token = manager.login("admin", "s3cret").expect("login");
        manager.revoke(&token);
        assert!(!manager.validate(&token));
    }

    #[test]
    fn test_zero_ttl_sessions_expire_immediately() {
        let manager = manager(0);
        let token = manager.login("admin", "s3cret").expect("login");
        assert!(!manager.validate(&token));
    }

    #[test]
    fn test_unknown_token_is_invalid() {
        let manager = manager(3600);
        assert!(!manager.validate("deadbeef"));
    }
}
