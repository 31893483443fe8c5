//! Invoice document assembly.

pub mod document;

pub use document::{spd_payload, InvoiceDocument, InvoiceForm};
