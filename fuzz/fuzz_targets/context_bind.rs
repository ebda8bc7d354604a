#![no_main]

use billet_engine::{Context, Template};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

const PROBE: &str = "{{#Items}}{{Name}}{{/Items}}{{^Items}}-{{/Items}}{{Name}}";

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<Value>(data) else {
        return;
    };

    if let Ok(context) = Context::from_json(&value) {
        let _ = Template::new("fuzz-context-bind", PROBE).render(&context);
    }
});
