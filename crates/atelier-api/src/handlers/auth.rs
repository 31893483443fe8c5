//! Admin login, logout, and session check.

use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

use atelier_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::error::ApiError;
use crate::extractors::AdminSession;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<serde_json::Value>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))
        .map_err(ApiError)?;

    let token = state
        .sessions
        .login(&req.username, &req.password)
        .map_err(ApiError)?;

    let mut cookie = Cookie::new(state.config.auth.session_cookie_name.clone(), token);
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(state.config.auth.secure_cookies);

    Ok((jar.add(cookie), Json(serde_json::json!({ "success": true }))))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    session: AdminSession,
    jar: CookieJar,
) -> Result<(CookieJar, Json<serde_json::Value>), ApiError> {
    state.sessions.revoke(&session.token);

    let removal = Cookie::build((state.config.auth.session_cookie_name.clone(), "")).path("/");
    Ok((
        jar.remove(removal),
        Json(serde_json::json!({ "success": true })),
    ))
}

/// GET /api/auth/me
pub async fn me(session: AdminSession) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "data": {
            "authenticated": true,
            "locale": session.ctx.locale,
        }
    }))
}
