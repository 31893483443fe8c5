//! Invoice form validation and document assembly.
//!
//! Pure transformation: form fields plus the configured supplier block
//! become a structured, printable document and a Czech payment-QR
//! payload string. Nothing here touches persistence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use atelier_core::config::invoice::InvoiceConfig;
use atelier_core::error::AppError;
use atelier_core::result::AppResult;

/// User-entered invoice fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceForm {
    /// Invoice number, e.g. `2025-0012`. Its digits become the VS.
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
    /// Price in CZK as entered, e.g. `4500` or `4500.50`.
    pub item_price: String,
}

/// A fully assembled, printable invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDocument {
    /// Invoice number.
    pub invoice_number: String,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Due date.
    pub due_date: NaiveDate,
    /// Supplier display name.
    pub supplier_name: String,
    /// Supplier address line.
    pub supplier_address: String,
    /// Supplier registration number.
    pub supplier_registration: String,
    /// Bank account printed on the invoice.
    pub bank_account: String,
    /// Client display name.
    pub client_name: String,
    /// Client address lines.
    pub client_address: [String; 2],
    /// Billed item description.
    pub item_description: String,
    /// Price in CZK as entered.
    pub item_price: String,
    /// Variable symbol (digits of the invoice number).
    pub variable_symbol: String,
    /// Payment QR payload (SPD format).
    pub qr_payload: String,
}

impl InvoiceForm {
    /// Validate the form and assemble the printable document.
    ///
    /// Assembly refuses until every required field is non-empty and the
    /// price is a positive number.
    pub fn assemble(&self, supplier: &InvoiceConfig) -> AppResult<InvoiceDocument> {
        let required = [
            ("invoice_number", &self.invoice_number),
            ("client_name", &self.client_name),
            ("client_address_1", &self.client_address_1),
            ("client_address_2", &self.client_address_2),
            ("item_description", &self.item_description),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::validation(format!("Field '{field}' is required")));
            }
        }

        let price: f64 = self
            .item_price
            .trim()
            .parse()
            .map_err(|_| AppError::validation("Price must be a number"))?;
        if price <= 0.0 {
            return Err(AppError::validation("Price must be positive"));
        }

        let variable_symbol: String = self
            .invoice_number
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();

        let qr_payload = spd_payload(&supplier.iban, self.item_price.trim(), &variable_symbol);

        Ok(InvoiceDocument {
            invoice_number: self.invoice_number.clone(),
            issue_date: self.issue_date,
            due_date: self.due_date,
            supplier_name: supplier.supplier_name.clone(),
            supplier_address: supplier.supplier_address.clone(),
            supplier_registration: supplier.supplier_registration.clone(),
            bank_account: supplier.bank_account.clone(),
            client_name: self.client_name.clone(),
            client_address: [self.client_address_1.clone(), self.client_address_2.clone()],
            item_description: self.item_description.clone(),
            item_price: self.item_price.trim().to_string(),
            variable_symbol,
            qr_payload,
        })
    }
}

/// Build the Czech short payment descriptor (SPD 1.0) payload encoded
/// into payment QR codes. Spaces are stripped from the IBAN; the amount
/// is passed through as entered.
pub fn spd_payload(iban: &str, amount: &str, variable_symbol: &str) -> String {
    let iban: String = iban.chars().filter(|c| !c.is_whitespace()).collect();
    format!("SPD*1.0*ACC:{iban}*AM:{amount}*CC:CZK*VS:{variable_symbol}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supplier() -> InvoiceConfig {
        InvoiceConfig {
            supplier_name: "Jana Fotografka".to_string(),
            supplier_address: "Vinohradska 12, Praha".to_string(),
            supplier_registration: "12345678".to_string(),
            bank_account: "192000145399/0800".to_string(),
            iban: "CZ65 0800 0000 1920 0014 5399".to_string(),
        }
    }

    fn form() -> InvoiceForm {
        InvoiceForm {
            invoice_number: "2025-0012".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            client_name: "Novakovi".to_string(),
            client_address_1: "Dlouha 7".to_string(),
            client_address_2: "110 00 Praha".to_string(),
            item_description: "Svatebni foceni".to_string(),
            item_price: "4500".to_string(),
        }
    }

    #[test]
    fn test_spd_payload_format() {
        let payload = spd_payload("CZ65 0800 0000 1920 0014 5399", "4500", "20250012");
        assert_eq!(
            payload,
            "SPD*1.0*ACC:CZ6508000000192000145399*AM:4500*CC:CZK*VS:20250012"
        );
    }

    #[test]
    fn test_assemble_builds_vs_from_digits() {
        let doc = form().assemble(&supplier()).expect("valid form");
        assert_eq!(doc.variable_symbol, "20250012");
        assert!(doc.qr_payload.ends_with("*VS:20250012"));
        assert!(doc.qr_payload.contains("*AM:4500*"));
    }

    #[test]
    fn test_assemble_rejects_missing_fields() {
        let mut invalid = form();
        invalid.client_name = "   ".to_string();
        let err = invalid.assemble(&supplier()).unwrap_err();
        assert!(err.message.contains("client_name"));
    }

    #[test]
    fn test_assemble_rejects_non_positive_price() {
        let mut invalid = form();
        invalid.item_price = "0".to_string();
        assert!(invalid.assemble(&supplier()).is_err());

        invalid.item_price = "abc".to_string();
        assert!(invalid.assemble(&supplier()).is_err());
    }
}
