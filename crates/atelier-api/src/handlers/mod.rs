//! HTTP request handlers.

pub mod auth;
pub mod client_gallery;
pub mod health;
pub mod invoice;
pub mod project;
pub mod public;
pub mod upload;
