//! Invoice assembly handler.

use axum::extract::State;
use axum::Json;
use validator::Validate;

use atelier_core::error::AppError;
use atelier_entity::invoice::InvoiceForm;

use crate::dto::request::InvoiceRequest;
use crate::error::ApiError;
use crate::extractors::AdminSession;
use crate::state::AppState;

/// POST /api/admin/invoices
///
/// Validates the form and returns the assembled document with its
/// payment QR payload. Nothing is stored.
pub async fn assemble_invoice(
    State(state): State<AppState>,
    session: AdminSession,
    Json(req): Json<InvoiceRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))?;

    let form = InvoiceForm {
        invoice_number: req.invoice_number,
        issue_date: req.issue_date,
        due_date: req.due_date,
        client_name: req.client_name,
        client_address_1: req.client_address_1,
        client_address_2: req.client_address_2,
        item_description: req.item_description,
        item_price: req.item_price,
    };

    let document = state
        .invoice_service
        .assemble(&session.ctx, &form)
        .map_err(ApiError)?;
    Ok(Json(serde_json::json!({ "success": true, "data": document })))
}
