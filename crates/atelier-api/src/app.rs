//! Application builder — wires configuration, database, storage, and
//! services into the Axum app, and runs the server.

use std::sync::Arc;

use atelier_auth::SessionManager;
use atelier_core::config::AppConfig;
use atelier_core::error::AppError;
use atelier_storage::manager::StorageManager;

use atelier_database::repositories::client_gallery::ClientGalleryRepository;
use atelier_database::repositories::client_photo::ClientPhotoRepository;
use atelier_database::repositories::photo::PhotoRepository;
use atelier_database::repositories::project::ProjectRepository;
use atelier_database::repositories::selection::SelectionRepository;

use atelier_service::gallery::export::ExportService;
use atelier_service::gallery::service::GalleryService;
use atelier_service::invoice::assembler::InvoiceService;
use atelier_service::project::ordering::OrderingService;
use atelier_service::project::service::ProjectService;
use atelier_service::project::tree::TreeService;
use atelier_service::selection::service::SelectionService;
use atelier_service::upload::service::UploadService;

use crate::router::build_router;
use crate::state::AppState;

/// Connect to the database, run migrations, and wire every repository
/// and service into an [`AppState`].
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    // ── Database ─────────────────────────────────────────────────
    let pool = atelier_database::connection::DatabasePool::connect(&config.database).await?;
    atelier_database::migration::run_migrations(pool.pool()).await?;
    let db_pool = pool.into_pool();

    // ── Storage ──────────────────────────────────────────────────
    let storage = Arc::new(StorageManager::new(
        &config.storage,
        &config.server.public_base_url,
    )?);

    // ── Auth ─────────────────────────────────────────────────────
    let sessions = Arc::new(SessionManager::new(config.auth.clone()));

    // ── Repositories ─────────────────────────────────────────────
    let project_repo = Arc::new(ProjectRepository::new(db_pool.clone()));
    let photo_repo = Arc::new(PhotoRepository::new(db_pool.clone()));
    let gallery_repo = Arc::new(ClientGalleryRepository::new(db_pool.clone()));
    let client_photo_repo = Arc::new(ClientPhotoRepository::new(db_pool.clone()));
    let selection_repo = Arc::new(SelectionRepository::new(db_pool.clone()));

    // ── Services ─────────────────────────────────────────────────
    let provider = storage.provider();
    let project_service = Arc::new(ProjectService::new(
        Arc::clone(&project_repo),
        Arc::clone(&photo_repo),
        Arc::clone(&provider),
    ));
    let ordering_service = Arc::new(OrderingService::new(Arc::clone(&project_repo)));
    let tree_service = Arc::new(TreeService::new(Arc::clone(&project_repo)));
    let gallery_service = Arc::new(GalleryService::new(
        Arc::clone(&gallery_repo),
        Arc::clone(&client_photo_repo),
        Arc::clone(&selection_repo),
        Arc::clone(&provider),
    ));
    let export_service = Arc::new(ExportService::new(
        Arc::clone(&gallery_repo),
        Arc::clone(&client_photo_repo),
    ));
    let selection_service = Arc::new(SelectionService::new(Arc::clone(&selection_repo)));
    let upload_service = Arc::new(UploadService::new(
        Arc::clone(&provider),
        &config.storage,
        Arc::clone(&project_repo),
        Arc::clone(&photo_repo),
        Arc::clone(&gallery_repo),
        Arc::clone(&client_photo_repo),
    ));
    let invoice_service = Arc::new(InvoiceService::new(config.invoice.clone()));

    Ok(AppState {
        config: Arc::new(config),
        db_pool,
        storage,
        sessions,
        project_repo,
        photo_repo,
        gallery_repo,
        client_photo_repo,
        selection_repo,
        project_service,
        ordering_service,
        tree_service,
        gallery_service,
        export_service,
        selection_service,
        upload_service,
        invoice_service,
    })
}

/// Run the Atelier server until a shutdown signal arrives.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Atelier server...");

    let state = build_state(config).await?;
    let selection_service = Arc::clone(&state.selection_service);
    let addr = format!(
        "{}:{}",
        state.config.server.host, state.config.server.port
    );

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Atelier server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // Let in-flight selection writes settle before the pool closes.
    selection_service.flush().await;

    tracing::info!("Atelier server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
