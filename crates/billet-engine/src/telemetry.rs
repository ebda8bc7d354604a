// SPDX-License-Identifier: Apache-2.0 OR MIT
#![cfg_attr(not(feature = "telemetry"), allow(dead_code))]

#[cfg(feature = "telemetry")]
mod otel {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::OnceLock;
    use std::time::Duration;

    use opentelemetry::global;
    use opentelemetry::metrics::{Counter, Histogram};
    use opentelemetry::trace::{Span, SpanKind};
    use opentelemetry::{trace::Tracer, KeyValue};

    const METER_NAME: &str = "billet_engine";
    const TRACER_NAME: &str = "billet_engine";

    static ENABLED: AtomicBool = AtomicBool::new(false);
    static HANDLES: OnceLock<Handles> = OnceLock::new();

    struct Handles {
        tracer: opentelemetry::global::BoxedTracer,
        render_hist: Histogram<f64>,
        render_counter: Counter<u64>,
        analyze_counter: Counter<u64>,
        loop_iterations: Histogram<u64>,
    }

    impl Handles {
        fn new() -> Self {
            let meter = global::meter(METER_NAME);
            let render_hist = meter
                .f64_histogram("billet.render.duration_ms")
                .with_description("Render duration in milliseconds")
                .init();
            let render_counter = meter
                .u64_counter("billet.render.count")
                .with_description("Number of template renders")
                .init();
            let analyze_counter = meter
                .u64_counter("billet.analyze.count")
                .with_description("Number of template analyses")
                .init();
            let loop_iterations = meter
                .u64_histogram("billet.loop.iterations")
                .with_description("Elements expanded per loop block")
                .init();
            let tracer = global::tracer(TRACER_NAME);
            Self {
                tracer,
                render_hist,
                render_counter,
                analyze_counter,
                loop_iterations,
            }
        }
    }

    fn handles() -> &'static Handles {
        HANDLES.get_or_init(Handles::new)
    }

    /// Starts recording metrics and spans.
    pub fn enable() {
        ENABLED.store(true, Ordering::Relaxed);
    }

    /// Stops recording.
    pub fn disable() {
        ENABLED.store(false, Ordering::Relaxed);
    }

    fn enabled() -> bool {
        ENABLED.load(Ordering::Relaxed)
    }

    /// Records one render: counter, duration histogram and a span.
    pub fn record_render(template: &str, template_len: usize, duration: Duration) {
        if !enabled() {
            return;
        }
        let hs = handles();
        let duration_ms = duration.as_secs_f64() * 1_000.0;
        let attrs = [
            KeyValue::new("template.name", template.to_string()),
            KeyValue::new("template.length", template_len as i64),
        ];
        hs.render_counter.add(1, &attrs);
        hs.render_hist.record(duration_ms, &attrs);
        let mut span = hs
            .tracer
            .span_builder("Template::render")
            .with_kind(SpanKind::Internal)
            .start(&hs.tracer);
        span.set_attribute(KeyValue::new("template.name", template.to_string()));
        span.set_attribute(KeyValue::new("template.length", template_len as i64));
        span.set_attribute(KeyValue::new("render.duration_ms", duration_ms));
        span.end();
    }

    /// Counts one template analysis.
    pub fn record_analyze(template: &str, issues: usize) {
        if !enabled() {
            return;
        }
        let attrs = [
            KeyValue::new("template.name", template.to_string()),
            KeyValue::new("analyze.issues", issues as i64),
        ];
        handles().analyze_counter.add(1, &attrs);
    }

    /// Records how many elements a loop block expanded.
    pub fn record_loop(name: &str, iterations: usize) {
        if !enabled() {
            return;
        }
        let attrs = [KeyValue::new("loop.name", name.to_string())];
        handles()
            .loop_iterations
            .record(iterations as u64, &attrs);
    }
}

#[cfg(not(feature = "telemetry"))]
mod otel {
    use std::time::Duration;

    /// Starts recording metrics and spans. No-op without the `telemetry` feature.
    pub fn enable() {}
    /// Stops recording.
    pub fn disable() {}
    /// Records one render.
    pub fn record_render(_template: &str, _template_len: usize, _duration: Duration) {}
    /// Counts one template analysis.
    pub fn record_analyze(_template: &str, _issues: usize) {}
    /// Records how many elements a loop block expanded.
    pub fn record_loop(_name: &str, _iterations: usize) {}
}

pub use otel::{disable, enable, record_analyze, record_loop, record_render};
