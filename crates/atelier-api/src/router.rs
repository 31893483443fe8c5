//! Route definitions for the Atelier HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`, except
//! the locale-prefixed public gallery page. The router receives
//! `AppState` and passes it to all handlers via Axum's `State`
//! extractor.

use axum::http::HeaderValue;
use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let admin_routes = Router::new()
        .merge(project_routes())
        .merge(client_gallery_routes())
        .route("/invoices", post(handlers::invoice::assemble_invoice));

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(selection_routes())
        .merge(site_routes())
        .nest("/admin", admin_routes)
        .route("/uploads/{token}", put(handlers::upload::accept_upload))
        .route("/health", get(handlers::health::health));

    let page_routes = Router::new().route(
        "/{lang}/gallery/{hash}",
        get(handlers::public::gallery_page),
    );

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .merge(page_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::locale::locale_routing,
        ))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: login, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Client selection actions on a shared gallery
fn selection_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/gallery/{hash}/photos/{photo_id}/like",
            post(handlers::public::like_photo),
        )
        .route(
            "/gallery/{hash}/photos/{photo_id}/like",
            delete(handlers::public::unlike_photo),
        )
        .route(
            "/gallery/{hash}/photos/{photo_id}/comment",
            put(handlers::public::comment_photo),
        )
}

/// Published portfolio for the public site
fn site_routes() -> Router<AppState> {
    Router::new()
        .route("/site/projects", get(handlers::public::site_projects))
        .route(
            "/site/projects/{slug}",
            get(handlers::public::site_project_by_slug),
        )
}

/// Project CRUD, ordering, and uploads
fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(handlers::project::list_tree))
        .route("/projects", post(handlers::project::create_project))
        .route("/projects/view", get(handlers::project::sibling_view))
        .route("/projects/reorder", put(handlers::project::reorder))
        .route("/projects/{id}", get(handlers::project::project_detail))
        .route("/projects/{id}", delete(handlers::project::delete_project))
        .route("/projects/{id}/name", put(handlers::project::rename_project))
        .route(
            "/projects/{id}/visibility",
            put(handlers::project::toggle_visibility),
        )
        .route(
            "/projects/{id}/title-style",
            put(handlers::project::update_title_style),
        )
        .route(
            "/projects/{id}/descriptions",
            put(handlers::project::update_descriptions),
        )
        .route("/projects/{id}/move", put(handlers::project::move_project))
        .route(
            "/projects/{id}/upload-url",
            post(handlers::project::create_upload_url),
        )
        .route(
            "/projects/{id}/photos",
            post(handlers::project::commit_photos),
        )
        .route(
            "/projects/{id}/photos",
            delete(handlers::project::delete_photo),
        )
        .route(
            "/projects/{id}/main-image",
            post(handlers::project::commit_main_image),
        )
}

/// Client gallery CRUD, uploads, and the Lightroom export
fn client_gallery_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/client-galleries",
            get(handlers::client_gallery::list_galleries),
        )
        .route(
            "/client-galleries",
            post(handlers::client_gallery::create_gallery),
        )
        .route(
            "/client-galleries/{id}",
            get(handlers::client_gallery::gallery_detail),
        )
        .route(
            "/client-galleries/{id}",
            delete(handlers::client_gallery::delete_gallery),
        )
        .route(
            "/client-galleries/{id}/upload-url",
            post(handlers::client_gallery::create_upload_url),
        )
        .route(
            "/client-galleries/{id}/photos",
            post(handlers::client_gallery::commit_photos),
        )
        .route(
            "/client-galleries/{id}/photos",
            delete(handlers::client_gallery::delete_photo),
        )
        .route(
            "/client-galleries/{id}/lightroom",
            get(handlers::client_gallery::lightroom_export),
        )
}

/// CORS layer from configured origins; same-origin only when empty.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = state
        .config
        .server
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    }
}
