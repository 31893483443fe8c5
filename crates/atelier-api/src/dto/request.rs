//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create project request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Display name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Whether the new project is a collection.
    #[serde(default)]
    pub is_collection: bool,
    /// Czech description.
    pub description_cs: Option<String>,
    /// English description.
    pub description_en: Option<String>,
}

/// Rename project request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameProjectRequest {
    /// New display name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}

/// Update descriptions request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDescriptionsRequest {
    /// Czech description.
    pub description_cs: Option<String>,
    /// English description.
    pub description_en: Option<String>,
}

/// Update title style request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTitleStyleRequest {
    /// One of `white_text`, `white_on_black`, `black_text`,
    /// `black_on_white`.
    pub title_style: String,
}

/// Reorder one sibling group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRequest {
    /// Collection whose children are being reordered (omit for the
    /// root level).
    pub parent_id: Option<Uuid>,
    /// Source position within the group.
    pub from: usize,
    /// Target position within the group.
    pub to: usize,
}

/// Move a project between sibling groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveProjectRequest {
    /// Destination collection (omit to move back to the root level).
    pub new_parent_id: Option<Uuid>,
}

/// Delete a photo by its public URL.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeletePhotoRequest {
    /// Public URL of the photo to delete.
    #[validate(length(min = 1))]
    pub image_url: String,
}

/// Request a signed upload URL for a project image.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProjectUploadUrlRequest {
    /// Original file name.
    #[validate(length(min = 1))]
    pub file_name: String,
    /// Whether the upload replaces the cover image.
    #[serde(default)]
    pub is_main: bool,
}

/// Commit uploaded gallery photos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitPhotosRequest {
    /// Storage paths returned when the signed URLs were minted.
    pub paths: Vec<String>,
}

/// Commit an uploaded cover image.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommitMainImageRequest {
    /// Storage path returned when the signed URL was minted.
    #[validate(length(min = 1))]
    pub path: String,
}

/// Create client gallery request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGalleryRequest {
    /// Gallery display name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}

/// Request a signed upload URL for a client photo.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClientUploadUrlRequest {
    /// Original file name.
    #[validate(length(min = 1))]
    pub file_name: String,
}

/// One uploaded client photo to commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientPhotoUpload {
    /// Storage path returned when the signed URL was minted.
    pub path: String,
    /// Original file name, kept for the Lightroom export.
    pub original_name: Option<String>,
}

/// Commit uploaded client photos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitClientPhotosRequest {
    /// Uploads to register.
    pub uploads: Vec<ClientPhotoUpload>,
}

/// Set or clear a photo comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    /// Comment text; empty or whitespace clears the comment.
    #[serde(default)]
    pub comment: String,
}

/// Assemble an invoice.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InvoiceRequest {
    /// Invoice number.
    #[validate(length(min = 1))]
    pub invoice_number: String,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Due date.
    pub due_date: NaiveDate,
    /// Client display name.
    pub client_name: String,
    /// First client address line.
    pub client_address_1: String,
    /// Second client address line.
    pub client_address_2: String,
    /// Billed item description.
    pub item_description: String,
    /// Price in CZK.
    pub item_price: String,
}
