//! Invoice supplier configuration.

use serde::{Deserialize, Serialize};

/// Fixed supplier-side fields printed on every invoice.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InvoiceConfig {
    /// Supplier display name.
    #[serde(default)]
    pub supplier_name: String,
    /// Supplier address line.
    #[serde(default)]
    pub supplier_address: String,
    /// Supplier registration number (IČO).
    #[serde(default)]
    pub supplier_registration: String,
    /// Domestic bank account number printed on the invoice.
    #[serde(default)]
    pub bank_account: String,
    /// IBAN used in the payment QR payload. May contain spaces.
    #[serde(default)]
    pub iban: String,
}
