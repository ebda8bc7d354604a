// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Read-only invoice, customer and company records consumed by the renderers.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Display name used when an invoice's customer cannot be resolved.
pub const UNKNOWN_CUSTOMER: &str = "Unknown Customer";

/// One billed row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Free text shown in the item row.
    pub description: String,
    /// Units billed; may be fractional.
    pub quantity: Decimal,
    /// Price per unit before tax.
    pub unit_price: Decimal,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    /// Quantity times unit price, unrounded. Saturates at the decimal range.
    pub fn amount(&self) -> Decimal {
        self.quantity.saturating_mul(self.unit_price)
    }
}

/// Lifecycle state, printed verbatim in the `Status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InvoiceStatus {
    /// Not yet issued.
    Draft,
    /// Issued and awaiting payment.
    #[default]
    Pending,
    /// Settled in full.
    Paid,
    /// Marked overdue by the ledger.
    Overdue,
    /// Voided.
    Cancelled,
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Overdue => "Overdue",
            InvoiceStatus::Cancelled => "Cancelled",
        })
    }
}

/// An invoice as stored by the surrounding ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice number.
    pub id: String,
    /// Resolved through a [`CustomerDirectory`].
    pub customer_id: String,
    /// Date printed as `IssueDate`.
    pub issue_date: NaiveDate,
    /// Overdue once this date is in the past and money is owed.
    pub due_date: NaiveDate,
    /// Rows in display order.
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    /// Percentage, e.g. `10` for 10 %.
    #[serde(default)]
    pub tax_rate: Decimal,
    /// Payments received so far.
    #[serde(default)]
    pub amount_paid: Decimal,
    /// Free text shown when non-blank.
    #[serde(default)]
    pub notes: Option<String>,
    /// Stored status; overdue display is computed separately.
    #[serde(default)]
    pub status: InvoiceStatus,
}

// Invoice arithmetic saturates at `Decimal::MAX` / `Decimal::MIN` instead of
// panicking, so an absurd invoice still renders.
impl Invoice {
    /// Sum of the line item amounts.
    pub fn subtotal(&self) -> Decimal {
        self.line_items
            .iter()
            .map(LineItem::amount)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Subtotal times the tax rate, rounded to cents (midpoint away from zero).
    pub fn tax_amount(&self) -> Decimal {
        let taxed = self.subtotal().saturating_mul(self.tax_rate);
        let tax = taxed.checked_div(Decimal::ONE_HUNDRED).unwrap_or(Decimal::ZERO);
        tax.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Subtotal plus tax.
    pub fn total(&self) -> Decimal {
        self.subtotal().saturating_add(self.tax_amount())
    }

    /// Total minus the amount already paid.
    pub fn balance(&self) -> Decimal {
        self.total().saturating_sub(self.amount_paid)
    }

    /// Due strictly before `today` with money still owed.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date < today && self.balance() > Decimal::ZERO
    }
}

/// Billed party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Key used by [`CustomerDirectory`] lookups.
    pub id: String,
    /// The marker's name.
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
}

/// Issuing company details shown in every invoice header.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanySettings {
    /// The marker's name.
    pub name: String,
    /// Multi-line postal address.
    pub address: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Raw image bytes; bound base64-encoded.
    pub logo: Option<Vec<u8>>,
}

/// Read-only customer lookup supplied by the surrounding ledger.
pub trait CustomerDirectory {
    /// Returns the customer with this id, if known.
    fn find_customer(&self, id: &str) -> Option<&Customer>;
}

impl CustomerDirectory for [Customer] {
    fn find_customer(&self, id: &str) -> Option<&Customer> {
        self.iter().find(|customer| customer.id == id)
    }
}

impl CustomerDirectory for Vec<Customer> {
    fn find_customer(&self, id: &str) -> Option<&Customer> {
        self.as_slice().find_customer(id)
    }
}

impl CustomerDirectory for HashMap<String, Customer> {
    fn find_customer(&self, id: &str) -> Option<&Customer> {
        self.get(id)
    }
}
