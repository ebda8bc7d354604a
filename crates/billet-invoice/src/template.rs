// SPDX-License-Identifier: Apache-2.0 OR MIT
use std::fmt;
use std::str::FromStr;

use billet_engine::Error;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{CompanySettings, Invoice};

/// Bundled markup layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    /// Header band with a totals table.
    #[default]
    Professional,
    /// Coloured banner and cards.
    Modern,
    /// Bordered table, serif-friendly.
    Classic,
    /// Single column, no tables.
    Minimal,
}

impl TemplateKind {
    /// Every bundled layout, in display order.
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::Professional,
        TemplateKind::Modern,
        TemplateKind::Classic,
        TemplateKind::Minimal,
    ];

    /// Lower-case name accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Professional => "professional",
            TemplateKind::Modern => "modern",
            TemplateKind::Classic => "classic",
            TemplateKind::Minimal => "minimal",
        }
    }

    /// The static markup body for this layout.
    pub fn body(&self) -> &'static str {
        match self {
            TemplateKind::Professional => include_str!("../templates/professional.html"),
            TemplateKind::Modern => include_str!("../templates/modern.html"),
            TemplateKind::Classic => include_str!("../templates/classic.html"),
            TemplateKind::Minimal => include_str!("../templates/minimal.html"),
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::template(format!(
                    "unknown template kind \"{s}\" (expected one of: professional, modern, classic, minimal)"
                ))
            })
    }
}

/// Template selection plus its styling knobs and visibility flags.
///
/// Styling strings are passed through to the markup verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceTemplate {
    /// Display name; also the template name reported to telemetry.
    pub name: String,
    /// Bundled layout used when `custom_body` is unset.
    pub kind: TemplateKind,
    /// CSS `font-family` value.
    pub font_family: String,
    /// Headings and accents.
    pub primary_color: String,
    /// Muted text.
    pub secondary_color: String,
    /// Table and card backgrounds.
    pub accent_color: String,
    /// Title shown at the top, `INVOICE` by default.
    pub header_text: String,
    /// Closing line, shown on every layout.
    pub footer_text: String,
    /// Free text; shown only when non-blank.
    pub payment_instructions: String,
    /// Show the company logo when one is set.
    pub show_logo: bool,
    /// Show the company address when it is non-blank.
    pub show_company_address: bool,
    /// Show the due date line.
    pub show_due_date: bool,
    /// Show the tax line when the tax amount is non-zero.
    pub show_tax_breakdown: bool,
    /// Show the invoice notes when they are non-blank.
    pub show_notes: bool,
    /// Show the payment instructions when they are non-blank.
    pub show_payment_instructions: bool,
    /// Replaces the bundled body of `kind` when set.
    pub custom_body: Option<String>,
}

impl Default for InvoiceTemplate {
    fn default() -> Self {
        Self {
            name: "Professional".to_string(),
            kind: TemplateKind::Professional,
            font_family: "'Segoe UI', Arial, sans-serif".to_string(),
            primary_color: "#2563eb".to_string(),
            secondary_color: "#64748b".to_string(),
            accent_color: "#f1f5f9".to_string(),
            header_text: "INVOICE".to_string(),
            footer_text: "Thank you for your business!".to_string(),
            payment_instructions: String::new(),
            show_logo: true,
            show_company_address: true,
            show_due_date: true,
            show_tax_breakdown: true,
            show_notes: true,
            show_payment_instructions: true,
            custom_body: None,
        }
    }
}

impl InvoiceTemplate {
    /// Default styling with the given layout, named after it.
    pub fn new(kind: TemplateKind) -> Self {
        let mut name = kind.as_str().to_string();
        name[..1].make_ascii_uppercase();
        Self {
            name,
            kind,
            ..Self::default()
        }
    }

    /// Uses `body` instead of the bundled layout.
    pub fn with_custom_body(mut self, body: impl Into<String>) -> Self {
        self.custom_body = Some(body.into());
        self
    }

    /// The custom body if set, else the bundled body of `kind`.
    pub fn body(&self) -> &str {
        self.custom_body
            .as_deref()
            .unwrap_or_else(|| self.kind.body())
    }

    /// Whether the logo is both enabled and present.
    pub fn shows_logo(&self, company: &CompanySettings) -> bool {
        self.show_logo && company.logo.as_ref().is_some_and(|logo| !logo.is_empty())
    }

    /// Whether the address is both enabled and non-blank.
    pub fn shows_company_address(&self, company: &CompanySettings) -> bool {
        self.show_company_address && !is_blank(&company.address)
    }

    /// Whether the tax line is both enabled and non-zero.
    pub fn shows_tax_breakdown(&self, invoice: &Invoice) -> bool {
        self.show_tax_breakdown && invoice.tax_amount() != Decimal::ZERO
    }

    /// Whether notes are both enabled and non-blank.
    pub fn shows_notes(&self, invoice: &Invoice) -> bool {
        self.show_notes && invoice.notes.as_deref().is_some_and(|notes| !is_blank(notes))
    }

    /// Whether instructions are both enabled and non-blank.
    pub fn shows_payment_instructions(&self) -> bool {
        self.show_payment_instructions && !is_blank(&self.payment_instructions)
    }
}

pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
