//! Request context carrying authentication state and locale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use atelier_core::error::AppError;
use atelier_core::result::AppResult;
use atelier_core::types::Locale;

/// Context for the current request.
///
/// Resolved once per request by the API layer (session cookie → admin
/// flag, locale negotiation) and passed explicitly into every service
/// method that needs it. There is deliberately no ambient global
/// carrying this state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Whether the request carries a valid admin session.
    pub is_authenticated: bool,
    /// Locale resolved for this request.
    pub locale: Locale,
    /// IP address of the request origin.
    pub client_ip: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Context for a validated admin session.
    pub fn admin(locale: Locale, client_ip: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            locale,
            client_ip: client_ip.into(),
            request_time: Utc::now(),
        }
    }

    /// Context for an anonymous visitor (public site, client gallery).
    pub fn anonymous(locale: Locale, client_ip: impl Into<String>) -> Self {
        Self {
            is_authenticated: false,
            locale,
            client_ip: client_ip.into(),
            request_time: Utc::now(),
        }
    }

    /// Fail unless the request is an authenticated admin session.
    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_authenticated {
            Ok(())
        } else {
            Err(AppError::authentication("Admin session required"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_admin_gates_anonymous_contexts() {
        assert!(RequestContext::admin(Locale::Cs, "127.0.0.1")
            .require_admin()
            .is_ok());
        assert!(RequestContext::anonymous(Locale::Cs, "127.0.0.1")
            .require_admin()
            .is_err());
    }
}
