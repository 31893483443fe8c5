//! # atelier-api
//!
//! HTTP surface of Atelier: the Axum router, shared application state,
//! request extractors, middleware, and handlers.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
