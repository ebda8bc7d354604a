#![no_main]

use billet_engine::analyze_template;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        let report = analyze_template(source);
        for usage in report.variables.iter().chain(&report.sections) {
            assert!(usage.span.end <= source.len());
        }
    }
});
