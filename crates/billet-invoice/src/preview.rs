// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Synthetic records rendered by [`InvoiceRenderer::preview`](crate::InvoiceRenderer::preview).

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::model::{Customer, Invoice, InvoiceStatus, LineItem};

/// Invoice number of the preview sample.
pub const PREVIEW_INVOICE_ID: &str = "INV-PREVIEW-001";

const PAYMENT_TERM_DAYS: u64 = 30;

/// Three-line sample invoice issued `today`, due thirty days later.
pub fn sample_invoice(today: NaiveDate) -> Invoice {
    Invoice {
        id: PREVIEW_INVOICE_ID.to_string(),
        customer_id: "CUST-PREVIEW".to_string(),
        issue_date: today,
        due_date: today
            .checked_add_days(Days::new(PAYMENT_TERM_DAYS))
            .unwrap_or(today),
        line_items: vec![
            LineItem::new("Website Design", Decimal::ONE, Decimal::new(800, 0)),
            LineItem::new("Hosting (12 months)", Decimal::ONE, Decimal::new(250, 0)),
            LineItem::new("Support Hours", Decimal::TWO, Decimal::new(100, 0)),
        ],
        tax_rate: Decimal::TEN,
        amount_paid: Decimal::ZERO,
        notes: Some("This is a preview of your invoice template.".to_string()),
        status: InvoiceStatus::Pending,
    }
}

/// Customer billed by the preview sample.
pub fn sample_customer() -> Customer {
    Customer {
        id: "CUST-PREVIEW".to_string(),
        name: "Sample Customer Ltd.".to_string(),
        email: Some("billing@example.com".to_string()),
        address: Some("123 Sample Street, Example City".to_string()),
    }
}
