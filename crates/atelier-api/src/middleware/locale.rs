//! Locale-prefix routing.
//!
//! Every public page path carries a two-letter locale prefix. Requests
//! without one are redirected to the inferred locale (cookie →
//! Accept-Language → default); requests that already carry one get the
//! prefix locale stored as a request extension. API paths are never
//! redirected.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use atelier_core::types::Locale;

use crate::state::AppState;

/// Resolve the locale and redirect locale-less page paths.
pub async fn locale_routing(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    let locale = if let Some(from_path) = path_locale(&path) {
        from_path
    } else {
        let jar = CookieJar::from_headers(request.headers());
        let cookie = jar
            .get(&state.config.locale.cookie_name)
            .map(|c| c.value().to_string());
        let accept_language = request
            .headers()
            .get("accept-language")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Locale::negotiate(
            cookie.as_deref(),
            accept_language.as_deref(),
            state.config.locale.default_locale,
        )
    };

    // Page paths without a prefix get redirected; the API is exempt.
    if !path.starts_with("/api") && !Locale::path_has_locale(&path) {
        let suffix = if path == "/" { "" } else { path.as_str() };
        return Redirect::temporary(&format!("/{locale}{suffix}")).into_response();
    }

    request.extensions_mut().insert(locale);
    next.run(request).await
}

/// The locale named by the path prefix, if any.
fn path_locale(path: &str) -> Option<Locale> {
    let first = path.trim_start_matches('/').split('/').next()?;
    first.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_locale() {
        assert_eq!(path_locale("/en/gallery/abc"), Some(Locale::En));
        assert_eq!(path_locale("/cs"), Some(Locale::Cs));
        assert_eq!(path_locale("/gallery/abc"), None);
        assert_eq!(path_locale("/api/health"), None);
    }
}
