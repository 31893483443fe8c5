//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use atelier_auth::SessionManager;
use atelier_core::config::AppConfig;
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

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Storage provider manager
    pub storage: Arc<StorageManager>,
    /// Admin session manager
    pub sessions: Arc<SessionManager>,

    // ── Repositories ─────────────────────────────────────────
    /// Project repository
    pub project_repo: Arc<ProjectRepository>,
    /// Photo repository
    pub photo_repo: Arc<PhotoRepository>,
    /// Client gallery repository
    pub gallery_repo: Arc<ClientGalleryRepository>,
    /// Client photo repository
    pub client_photo_repo: Arc<ClientPhotoRepository>,
    /// Selection repository
    pub selection_repo: Arc<SelectionRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Project CRUD
    pub project_service: Arc<ProjectService>,
    /// Sibling-group ordering
    pub ordering_service: Arc<OrderingService>,
    /// Tree building
    pub tree_service: Arc<TreeService>,
    /// Client galleries
    pub gallery_service: Arc<GalleryService>,
    /// Lightroom export
    pub export_service: Arc<ExportService>,
    /// Client selections
    pub selection_service: Arc<SelectionService>,
    /// Uploads
    pub upload_service: Arc<UploadService>,
    /// Invoice assembly
    pub invoice_service: Arc<InvoiceService>,
}
