// SPDX-License-Identifier: Apache-2.0 OR MIT
use billet_engine::Template;

use crate::binding::build_context;
use crate::model::{CompanySettings, Customer, CustomerDirectory, Invoice};
use crate::options::RenderOptions;
use crate::plain_text;
use crate::preview;
use crate::template::InvoiceTemplate;

/// Renders invoices into styled markup or plain text.
///
/// Rendering never fails: missing data renders as empty text and a missing
/// customer falls back to a placeholder name.
#[derive(Debug, Clone, Default)]
pub struct InvoiceRenderer {
    options: RenderOptions,
}

impl InvoiceRenderer {
    /// Creates a renderer with fixed options.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Options applied to every render.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders `invoice` through the markup body selected by `template`.
    pub fn render(
        &self,
        invoice: &Invoice,
        template: &InvoiceTemplate,
        company: &CompanySettings,
        customer: Option<&Customer>,
    ) -> String {
        let context = build_context(invoice, template, company, customer, &self.options);
        Template::new(template.name.as_str(), template.body()).render(&context)
    }

    /// Like [`render`](Self::render), resolving the customer by
    /// `invoice.customer_id` first.
    pub fn render_from_directory<D>(
        &self,
        invoice: &Invoice,
        template: &InvoiceTemplate,
        company: &CompanySettings,
        directory: &D,
    ) -> String
    where
        D: CustomerDirectory + ?Sized,
    {
        let customer = directory.find_customer(&invoice.customer_id);
        if customer.is_none() {
            tracing::debug!(
                invoice = %invoice.id,
                customer_id = %invoice.customer_id,
                "customer not found; rendering with placeholder name"
            );
        }
        self.render(invoice, template, company, customer)
    }

    /// Renders the sample invoice so a template can be inspected before use.
    ///
    /// The sample is due thirty days after `options.today`.
    pub fn preview(&self, template: &InvoiceTemplate, company: &CompanySettings) -> String {
        let invoice = preview::sample_invoice(self.options.today);
        let customer = preview::sample_customer();
        self.render(&invoice, template, company, Some(&customer))
    }

    /// Renders the plain-text form; figures match the markup form exactly.
    pub fn render_plain_text(
        &self,
        invoice: &Invoice,
        template: &InvoiceTemplate,
        company: &CompanySettings,
        customer: Option<&Customer>,
    ) -> String {
        plain_text::render_plain_text(invoice, template, company, customer, &self.options)
    }
}
