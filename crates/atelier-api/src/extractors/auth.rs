//! `AdminSession` extractor — validates the session cookie and builds
//! the request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use atelier_core::error::AppError;
use atelier_service::context::RequestContext;

use crate::error::ApiError;
use crate::extractors::locale::locale_from_parts;
use crate::state::AppState;

/// Extracted admin session available in admin handlers.
///
/// Authentication state is resolved here, once per request, and carried
/// explicitly in the context — handlers and services never consult any
/// ambient global.
#[derive(Debug, Clone)]
pub struct AdminSession {
    /// Request context with `is_authenticated = true`.
    pub ctx: RequestContext,
    /// The raw session token (needed by logout to revoke it).
    pub token: String,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(&state.config.auth.session_cookie_name)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| AppError::authentication("Missing admin session"))
            .map_err(ApiError)?;

        if !state.sessions.validate(&token) {
            return Err(ApiError(AppError::authentication(
                "Session expired — please log in again",
            )));
        }

        let locale = locale_from_parts(parts, state);
        let client_ip = client_ip(parts);

        Ok(AdminSession {
            ctx: RequestContext::admin(locale, client_ip),
            token,
        })
    }
}

/// Best-effort client IP from proxy headers.
pub fn client_ip(parts: &Parts) -> String {
    parts
        .headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .unwrap_or("unknown")
        .trim()
        .to_string()
}
