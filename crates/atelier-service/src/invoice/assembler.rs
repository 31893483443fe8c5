//! Invoice assembly against the configured supplier block.

use atelier_core::config::invoice::InvoiceConfig;
use atelier_core::result::AppResult;
use atelier_entity::invoice::{InvoiceDocument, InvoiceForm};

use crate::context::RequestContext;

/// Assembles printable invoices. Stateless apart from the configured
/// supplier fields; nothing is persisted.
#[derive(Debug, Clone)]
pub struct InvoiceService {
    /// Supplier block printed on every invoice.
    config: InvoiceConfig,
}

impl InvoiceService {
    /// Creates a new invoice service.
    pub fn new(config: InvoiceConfig) -> Self {
        Self { config }
    }

    /// Validate the form and assemble the document with its payment QR
    /// payload.
    pub fn assemble(
        &self,
        ctx: &RequestContext,
        form: &InvoiceForm,
    ) -> AppResult<InvoiceDocument> {
        ctx.require_admin()?;
        form.assemble(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::types::Locale;
    use chrono::NaiveDate;

    #[test]
    fn test_assemble_requires_admin() {
        let service = InvoiceService::new(InvoiceConfig::default());
        let form = InvoiceForm {
            invoice_number: "2025-01".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            client_name: "Client".to_string(),
            client_address_1: "Street 1".to_string(),
            client_address_2: "City".to_string(),
            item_description: "Shoot".to_string(),
            item_price: "1000".to_string(),
        };

        let anonymous = RequestContext::anonymous(Locale::Cs, "127.0.0.1");
        assert!(service.assemble(&anonymous, &form).is_err());

        let admin = RequestContext::admin(Locale::Cs, "127.0.0.1");
        let doc = service.assemble(&admin, &form).expect("assembles");
        assert_eq!(doc.variable_symbol, "202501");
    }
}
