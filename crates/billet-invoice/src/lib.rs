#![forbid(unsafe_code)]
// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Invoice rendering on top of `billet-engine`.
//!
//! [`InvoiceRenderer`] turns an [`Invoice`] into styled markup, using one of
//! the bundled [`TemplateKind`] layouts or a custom body, or into plain text.
//! Both forms share the [`format`] rules so their figures always agree.

mod binding;
/// Number and date formatting rules.
pub mod format;
mod model;
mod options;
mod plain_text;
mod preview;
mod render;
mod template;

pub use billet_engine::{analyze_template, Context, Error, Template, TemplateAnalysis};

pub use binding::{build_context, unknown_fields, CONTEXT_FIELDS, LINE_ITEM_FIELDS};
pub use model::{
    CompanySettings, Customer, CustomerDirectory, Invoice, InvoiceStatus, LineItem,
    UNKNOWN_CUSTOMER,
};
pub use options::RenderOptions;
pub use preview::{sample_customer, sample_invoice, PREVIEW_INVOICE_ID};
pub use render::InvoiceRenderer;
pub use template::{InvoiceTemplate, TemplateKind};
