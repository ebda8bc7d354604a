#![no_main]

use billet_engine::{Context, Template};
use billet_invoice::{
    build_context, sample_customer, sample_invoice, CompanySettings, InvoiceTemplate,
    RenderOptions,
};
use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;

static CONTEXT: Lazy<Context> = Lazy::new(|| {
    let options = RenderOptions::default();
    let invoice = sample_invoice(options.today);
    let customer = sample_customer();
    build_context(
        &invoice,
        &InvoiceTemplate::default(),
        &CompanySettings::default(),
        Some(&customer),
        &options,
    )
});

fuzz_target!(|data: &[u8]| {
    let source = match std::str::from_utf8(data) {
        Ok(src) => src,
        Err(_) => return,
    };

    let _ = Template::new("fuzz-template-render", source).render(&CONTEXT);
});
