//! # atelier-database
//!
//! PostgreSQL access for Atelier: the connection pool wrapper, the
//! migration runner, and one repository struct per table.

pub mod connection;
pub mod migration;
pub mod repositories;
