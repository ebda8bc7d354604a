#![forbid(unsafe_code)]
// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Mustache-flavoured micro-language used to render invoices.
//!
//! Templates understand three markers: `{{Name}}` substitutes a value,
//! `{{#Name}}...{{/Name}}` keeps its body when `Name` is truthy (or repeats
//! it when `Name` is bound to a sequence) and `{{^Name}}...{{/Name}}` keeps
//! its body when `Name` is absent or falsy.
//!
//! Rendering is a fixed three-pass pipeline over flat marker matches:
//! sections, then loops, then variables. It never fails; unknown names render
//! as empty text and malformed markers pass through unchanged.

/// Static inspection of template sources.
pub mod analyze;
mod context;
mod error;
mod loops;
mod runtime;
/// Marker scanning shared by every pass.
pub mod scan;
mod sections;
/// Optional OpenTelemetry instrumentation.
pub mod telemetry;
mod variables;

pub use analyze::{analyze_template, AnalysisIssue, IssueKind, MarkerUsage, TemplateAnalysis};
pub use context::{Binding, Context, Scalar, Scope};
pub use error::Error;
pub use loops::process_loops;
pub use runtime::{binding_to_string, is_truthy, render, scalar_to_string};
pub use scan::Span;
pub use sections::process_sections;
pub use variables::substitute_variables;

use std::fmt;
use std::time::Instant;

/// Named, immutable template source.
#[derive(Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    source: String,
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("name", &self.name)
            .field("len", &self.source.len())
            .finish()
    }
}

impl Template {
    /// Creates a template from its name and source text.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Returns the template name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the original template source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Lists referenced names and markers that will render literally.
    pub fn analyze(&self) -> TemplateAnalysis {
        let analysis = analyze::analyze_template(&self.source);
        telemetry::record_analyze(&self.name, analysis.issues.len());
        analysis
    }

    /// Renders the template against the provided context.
    pub fn render(&self, context: &Context) -> String {
        let started = Instant::now();
        let output = runtime::render(&self.source, context);
        telemetry::record_render(&self.name, self.source.len(), started.elapsed());
        output
    }
}
