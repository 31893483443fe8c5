//! Locale extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use atelier_core::types::Locale;

use crate::state::AppState;

/// The locale resolved for this request.
///
/// The locale middleware stores its decision as a request extension;
/// routes that bypass the middleware fall back to fresh negotiation.
#[derive(Debug, Clone, Copy)]
pub struct RequestLocale(pub Locale);

impl FromRequestParts<AppState> for RequestLocale {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(RequestLocale(locale_from_parts(parts, state)))
    }
}

/// Locale for a request: the middleware's decision if present,
/// otherwise cookie → Accept-Language → configured default.
pub fn locale_from_parts(parts: &Parts, state: &AppState) -> Locale {
    if let Some(locale) = parts.extensions.get::<Locale>() {
        return *locale;
    }

    let jar = CookieJar::from_headers(&parts.headers);
    let cookie = jar
        .get(&state.config.locale.cookie_name)
        .map(|c| c.value().to_string());
    let accept_language = parts
        .headers
        .get("accept-language")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    Locale::negotiate(
        cookie.as_deref(),
        accept_language.as_deref(),
        state.config.locale.default_locale,
    )
}
