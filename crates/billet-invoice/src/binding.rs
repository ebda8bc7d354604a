// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Builds the binding context an invoice template renders against.
//!
//! All number and date formatting happens here; the engine only ever sees
//! finished strings (plus the raw `AmountPaid` decimal, kept numeric so
//! `{{#AmountPaid}}` is falsy on unpaid invoices).

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use billet_engine::{analyze_template, Context};

use crate::format::{format_currency, format_date, format_percentage, format_quantity};
use crate::model::{CompanySettings, Customer, Invoice, LineItem, UNKNOWN_CUSTOMER};
use crate::options::RenderOptions;
use crate::template::InvoiceTemplate;

/// Names bound at the top level of every invoice context.
pub const CONTEXT_FIELDS: &[&str] = &[
    "FontFamily",
    "PrimaryColor",
    "SecondaryColor",
    "AccentColor",
    "HeaderText",
    "FooterText",
    "CompanyName",
    "CompanyAddress",
    "CompanyEmail",
    "CompanyPhone",
    "CompanyLogo",
    "ShowLogo",
    "ShowCompanyAddress",
    "InvoiceNumber",
    "IssueDate",
    "DueDate",
    "Status",
    "ShowDueDate",
    "IsOverdue",
    "CustomerName",
    "CustomerEmail",
    "CustomerAddress",
    "CurrencySymbol",
    "Subtotal",
    "TaxRate",
    "TaxAmount",
    "ShowTaxBreakdown",
    "Total",
    "AmountPaid",
    "AmountPaidFormatted",
    "Balance",
    "Notes",
    "ShowNotes",
    "PaymentInstructions",
    "ShowPaymentInstructions",
    "LineItems",
];

/// Names bound on each `LineItems` element.
pub const LINE_ITEM_FIELDS: &[&str] = &["Description", "Quantity", "UnitPrice", "Amount"];

/// Binds every name in [`CONTEXT_FIELDS`] for one invoice render.
pub fn build_context(
    invoice: &Invoice,
    template: &InvoiceTemplate,
    company: &CompanySettings,
    customer: Option<&Customer>,
    options: &RenderOptions,
) -> Context {
    let symbol = options.currency_symbol.as_str();
    let money = |amount| format_currency(amount, symbol);

    let logo = company
        .logo
        .as_deref()
        .map(|bytes| STANDARD.encode(bytes))
        .unwrap_or_default();

    let line_items: Vec<Context> = invoice
        .line_items
        .iter()
        .map(|item| line_item_context(item, symbol))
        .collect();

    Context::new()
        .with("FontFamily", template.font_family.as_str())
        .with("PrimaryColor", template.primary_color.as_str())
        .with("SecondaryColor", template.secondary_color.as_str())
        .with("AccentColor", template.accent_color.as_str())
        .with("HeaderText", template.header_text.as_str())
        .with("FooterText", template.footer_text.as_str())
        .with("CompanyName", company.name.as_str())
        .with("CompanyAddress", company.address.as_str())
        .with("CompanyEmail", company.email.as_str())
        .with("CompanyPhone", company.phone.as_str())
        .with("CompanyLogo", logo)
        .with("ShowLogo", template.shows_logo(company))
        .with("ShowCompanyAddress", template.shows_company_address(company))
        .with("InvoiceNumber", invoice.id.as_str())
        .with("IssueDate", format_date(invoice.issue_date))
        .with("DueDate", format_date(invoice.due_date))
        .with("Status", invoice.status.to_string())
        .with("ShowDueDate", template.show_due_date)
        .with("IsOverdue", invoice.is_overdue(options.today))
        .with("CustomerName", customer_name(customer))
        .with("CustomerEmail", customer.and_then(|c| c.email.clone()))
        .with("CustomerAddress", customer.and_then(|c| c.address.clone()))
        .with("CurrencySymbol", symbol)
        .with("Subtotal", money(invoice.subtotal()))
        .with("TaxRate", format_percentage(invoice.tax_rate))
        .with("TaxAmount", money(invoice.tax_amount()))
        .with("ShowTaxBreakdown", template.shows_tax_breakdown(invoice))
        .with("Total", money(invoice.total()))
        .with("AmountPaid", invoice.amount_paid)
        .with("AmountPaidFormatted", money(invoice.amount_paid))
        .with("Balance", money(invoice.balance()))
        .with("Notes", invoice.notes.clone())
        .with("ShowNotes", template.shows_notes(invoice))
        .with("PaymentInstructions", template.payment_instructions.as_str())
        .with(
            "ShowPaymentInstructions",
            template.shows_payment_instructions(),
        )
        .with("LineItems", line_items)
}

fn line_item_context(item: &LineItem, symbol: &str) -> Context {
    Context::new()
        .with("Description", item.description.as_str())
        .with("Quantity", format_quantity(item.quantity))
        .with("UnitPrice", format_currency(item.unit_price, symbol))
        .with("Amount", format_currency(item.amount(), symbol))
}

pub(crate) fn customer_name(customer: Option<&Customer>) -> &str {
    match customer {
        Some(customer) => customer.name.as_str(),
        None => UNKNOWN_CUSTOMER,
    }
}

/// Names a template body references that no invoice context ever binds.
pub fn unknown_fields(body: &str) -> Vec<String> {
    analyze_template(body)
        .names()
        .into_iter()
        .filter(|name| !CONTEXT_FIELDS.contains(name) && !LINE_ITEM_FIELDS.contains(name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use billet_engine::{Binding, Scalar};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::model::InvoiceStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoice() -> Invoice {
        Invoice {
            id: "INV-2025-001".into(),
            customer_id: "C-1".into(),
            issue_date: date(2025, 1, 15),
            due_date: date(2025, 2, 14),
            line_items: vec![
                LineItem::new("Design", dec!(1), dec!(800.00)),
                LineItem::new("Hosting", dec!(1), dec!(250.00)),
                LineItem::new("Support", dec!(2), dec!(100.00)),
            ],
            tax_rate: dec!(10),
            amount_paid: dec!(0),
            notes: Some("Net 30".into()),
            status: InvoiceStatus::Pending,
        }
    }

    fn text(ctx: &Context, name: &str) -> String {
        match ctx.get(name) {
            Some(Binding::Scalar(Scalar::Str(value))) => value.clone(),
            other => panic!("{name} is not a string: {other:?}"),
        }
    }

    fn flag(ctx: &Context, name: &str) -> bool {
        match ctx.get(name) {
            Some(Binding::Scalar(Scalar::Bool(value))) => *value,
            other => panic!("{name} is not a bool: {other:?}"),
        }
    }

    fn build(invoice: &Invoice, template: &InvoiceTemplate, today: NaiveDate) -> Context {
        build_context(
            invoice,
            template,
            &CompanySettings::default(),
            None,
            &RenderOptions::new(today),
        )
    }

    #[test]
    fn binds_every_advertised_field() {
        let ctx = build(&invoice(), &InvoiceTemplate::default(), date(2025, 1, 20));
        for name in CONTEXT_FIELDS {
            assert!(ctx.contains(name), "{name} missing");
        }
        assert_eq!(ctx.len(), CONTEXT_FIELDS.len());

        let items = ctx.get("LineItems").and_then(Binding::as_sequence).unwrap();
        for item in items {
            assert_eq!(item.names().count(), LINE_ITEM_FIELDS.len());
        }
    }

    #[test]
    fn monetary_fields_are_preformatted() {
        let ctx = build(&invoice(), &InvoiceTemplate::default(), date(2025, 1, 20));
        assert_eq!(text(&ctx, "Subtotal"), "$1,250.00");
        assert_eq!(text(&ctx, "TaxAmount"), "$125.00");
        assert_eq!(text(&ctx, "Total"), "$1,375.00");
        assert_eq!(text(&ctx, "Balance"), "$1,375.00");
        assert_eq!(text(&ctx, "TaxRate"), "10");
        assert_eq!(text(&ctx, "IssueDate"), "Jan 15, 2025");
        assert_eq!(ctx.get("AmountPaid"), Some(&Binding::from(dec!(0))));
    }

    #[test]
    fn line_items_carry_computed_amounts() {
        let ctx = build(&invoice(), &InvoiceTemplate::default(), date(2025, 1, 20));
        let items = ctx.get("LineItems").and_then(Binding::as_sequence).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(text(&items[2], "Quantity"), "2");
        assert_eq!(text(&items[2], "UnitPrice"), "$100.00");
        assert_eq!(text(&items[2], "Amount"), "$200.00");
    }

    #[test]
    fn flags_are_conjoined_with_data_presence() {
        let mut inv = invoice();
        inv.tax_rate = dec!(0);
        inv.notes = Some("   ".into());
        let template = InvoiceTemplate {
            payment_instructions: String::new(),
            ..InvoiceTemplate::default()
        };
        let ctx = build(&inv, &template, date(2025, 1, 20));
        assert!(!flag(&ctx, "ShowTaxBreakdown"));
        assert!(!flag(&ctx, "ShowNotes"));
        assert!(!flag(&ctx, "ShowPaymentInstructions"));
        assert!(!flag(&ctx, "ShowLogo"));
        assert!(!flag(&ctx, "ShowCompanyAddress"));
    }

    #[test]
    fn overdue_is_false_on_the_due_date() {
        let inv = invoice();
        let template = InvoiceTemplate::default();
        assert!(!flag(&build(&inv, &template, date(2025, 2, 14)), "IsOverdue"));
        assert!(flag(&build(&inv, &template, date(2025, 2, 15)), "IsOverdue"));
    }

    #[test]
    fn missing_customer_falls_back_to_sentinel() {
        let ctx = build(&invoice(), &InvoiceTemplate::default(), date(2025, 1, 20));
        assert_eq!(text(&ctx, "CustomerName"), UNKNOWN_CUSTOMER);
        assert_eq!(ctx.get("CustomerEmail"), Some(&Binding::Scalar(Scalar::Null)));
    }

    #[test]
    fn logo_is_base64_encoded() {
        let company = CompanySettings {
            logo: Some(b"png".to_vec()),
            ..CompanySettings::default()
        };
        let ctx = build_context(
            &invoice(),
            &InvoiceTemplate::default(),
            &company,
            None,
            &RenderOptions::new(date(2025, 1, 20)),
        );
        assert_eq!(text(&ctx, "CompanyLogo"), "cG5n");
        assert!(flag(&ctx, "ShowLogo"));
    }

    #[test]
    fn unknown_fields_lists_unbound_names() {
        let unknown = unknown_fields("{{Total}}{{#LineItems}}{{Amount}}{{Sku}}{{/LineItems}}{{Vat}}");
        assert_eq!(unknown, vec!["Sku".to_string(), "Vat".to_string()]);
    }
}
