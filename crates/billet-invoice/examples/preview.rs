// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Prints the preview invoice for one bundled layout in markup and plain text.
//!
//! Usage: `cargo run --example preview -- modern`

use billet_invoice::{
    sample_customer, sample_invoice, unknown_fields, CompanySettings, InvoiceRenderer,
    InvoiceTemplate, RenderOptions, TemplateKind,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let kind: TemplateKind = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("professional")
        .parse()?;
    let template = InvoiceTemplate::new(kind);

    let company = CompanySettings {
        name: "Billet Consulting".into(),
        address: "1 Ledger Way, Springfield".into(),
        email: "hello@billet.test".into(),
        phone: "+1 555 0100".into(),
        logo: None,
    };

    let unknown = unknown_fields(template.body());
    println!("template {kind}: unknown fields {unknown:?}");

    let renderer = InvoiceRenderer::new(RenderOptions::default());
    println!("{}", renderer.preview(&template, &company));

    let invoice = sample_invoice(renderer.options().today);
    let customer = sample_customer();
    println!(
        "{}",
        renderer.render_plain_text(&invoice, &template, &company, Some(&customer))
    );
    Ok(())
}
