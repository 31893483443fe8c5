//! Invoice assembly.

pub mod assembler;

pub use assembler::InvoiceService;
