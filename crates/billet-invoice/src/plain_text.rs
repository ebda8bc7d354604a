// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Plain-text invoice form built by direct string concatenation.

use rust_decimal::Decimal;

use crate::binding::customer_name;
use crate::format::{format_currency, format_date, format_percentage, format_quantity};
use crate::model::{CompanySettings, Customer, Invoice};
use crate::options::RenderOptions;
use crate::template::{is_blank, InvoiceTemplate};

const RULE_WIDTH: usize = 48;

pub(crate) fn render_plain_text(
    invoice: &Invoice,
    template: &InvoiceTemplate,
    company: &CompanySettings,
    customer: Option<&Customer>,
    options: &RenderOptions,
) -> String {
    let symbol = options.currency_symbol.as_str();
    let money = |amount| format_currency(amount, symbol);
    let rule = "=".repeat(RULE_WIDTH);
    let thin = "-".repeat(RULE_WIDTH);

    let mut out = String::new();
    out.push_str(&format!("{}\n{rule}\n", template.header_text));

    out.push_str(&format!("{}\n", company.name));
    if template.shows_company_address(company) {
        push_line(&mut out, &company.address);
    }
    push_line(&mut out, &company.email);
    push_line(&mut out, &company.phone);
    out.push('\n');

    out.push_str(&format!("Invoice #: {}\n", invoice.id));
    out.push_str(&format!("Issue Date: {}\n", format_date(invoice.issue_date)));
    if template.show_due_date {
        out.push_str(&format!("Due Date: {}\n", format_date(invoice.due_date)));
    }
    out.push_str(&format!("Status: {}\n", invoice.status));
    if invoice.is_overdue(options.today) {
        out.push_str("*** OVERDUE ***\n");
    }
    out.push('\n');

    out.push_str("Bill To:\n");
    out.push_str(&format!("{}\n", customer_name(customer)));
    if let Some(customer) = customer {
        push_line(&mut out, customer.email.as_deref().unwrap_or_default());
        push_line(&mut out, customer.address.as_deref().unwrap_or_default());
    }
    out.push('\n');

    out.push_str(&format!("Items:\n{thin}\n"));
    for item in &invoice.line_items {
        out.push_str(&format!(
            "{}\n  {} x {} = {}\n",
            item.description,
            format_quantity(item.quantity),
            money(item.unit_price),
            money(item.amount()),
        ));
    }
    out.push_str(&format!("{thin}\n"));

    out.push_str(&format!("Subtotal: {}\n", money(invoice.subtotal())));
    if template.shows_tax_breakdown(invoice) {
        out.push_str(&format!(
            "Tax ({}%): {}\n",
            format_percentage(invoice.tax_rate),
            money(invoice.tax_amount())
        ));
    }
    out.push_str(&format!("Total: {}\n", money(invoice.total())));
    if invoice.amount_paid != Decimal::ZERO {
        out.push_str(&format!("Amount Paid: {}\n", money(invoice.amount_paid)));
    }
    out.push_str(&format!("Balance Due: {}\n", money(invoice.balance())));

    if template.shows_notes(invoice) {
        if let Some(notes) = &invoice.notes {
            out.push_str(&format!("\nNotes:\n{notes}\n"));
        }
    }
    if template.shows_payment_instructions() {
        out.push_str(&format!(
            "\nPayment Instructions:\n{}\n",
            template.payment_instructions
        ));
    }

    out.push_str(&format!("\n{rule}\n{}\n", template.footer_text));
    out
}

fn push_line(out: &mut String, text: &str) {
    if !is_blank(text) {
        out.push_str(text);
        out.push('\n');
    }
}
