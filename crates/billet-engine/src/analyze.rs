// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Static inspection of template sources for template authors.
//!
//! Rendering never consults the analysis. It exists to list the names a
//! template reads and to point at markers the flat matcher will leave as
//! literal text.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::scan::{next_marker, Marker, Sigil, Span};

/// Lists every marker in `source` and the ones that will not pair up the
/// way the renderer pairs them.
pub fn analyze_template(source: &str) -> TemplateAnalysis {
    let mut markers = Vec::new();
    let mut pos = 0;
    while let Some(marker) = next_marker(source, pos) {
        pos = marker.span.end;
        markers.push(marker);
    }
    Analyzer::default().run(&markers)
}

/// Names and marker positions found in a template source.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TemplateAnalysis {
    /// Bare `{{Name}}` markers in source order.
    pub variables: Vec<MarkerUsage>,
    /// `{{#Name}}` open markers.
    pub sections: Vec<MarkerUsage>,
    /// `{{^Name}}` open markers.
    pub inverted: Vec<MarkerUsage>,
    /// Problems sorted by source position.
    pub issues: Vec<AnalysisIssue>,
}

impl TemplateAnalysis {
    /// Every distinct name referenced by any marker kind.
    pub fn names(&self) -> BTreeSet<&str> {
        self.variables
            .iter()
            .chain(&self.sections)
            .chain(&self.inverted)
            .map(|usage| usage.name.as_str())
            .collect()
    }

    /// True when every open marker pairs with its own close.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// One occurrence of a name in a marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerUsage {
    /// Referenced name.
    pub name: String,
    /// Span of the marker.
    pub span: Span,
}

/// Marker shapes that leave literal text in the rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// `{{#Name}}` or `{{^Name}}` with no free `{{/Name}}` after it.
    UnclosedSection,
    /// `{{/Name}}` that no open marker claims.
    StrayClose,
    /// A block that opens inside another block and closes after it.
    OverlappingSection,
}

/// A marker the renderer will not treat the way its author intended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisIssue {
    /// What went wrong.
    pub kind: IssueKind,
    /// Name carried by the offending marker.
    pub name: String,
    /// Human-readable description.
    pub message: String,
    /// Span of the offending marker.
    pub span: Span,
}

/// An open marker paired with the close it claims.
struct Pair<'s> {
    name: &'s str,
    open: Span,
    close: Span,
}

#[derive(Default)]
struct Analyzer {
    analysis: TemplateAnalysis,
}

impl Analyzer {
    fn run(mut self, markers: &[Marker<'_>]) -> TemplateAnalysis {
        let mut claimed = vec![false; markers.len()];
        let mut pairs = Vec::new();

        for (idx, marker) in markers.iter().enumerate() {
            let usage = MarkerUsage {
                name: marker.name.to_string(),
                span: marker.span,
            };
            match marker.sigil {
                Sigil::Section => self.analysis.sections.push(usage),
                Sigil::Inverted => self.analysis.inverted.push(usage),
                Sigil::Variable => {
                    self.analysis.variables.push(usage);
                    continue;
                }
                Sigil::Close => continue,
            }

            // Same rule as the renderer: the first `{{/Name}}` after the open.
            let close = markers.iter().enumerate().skip(idx + 1).find(|(other, close)| {
                close.sigil == Sigil::Close && close.name == marker.name && !claimed[*other]
            });
            match close {
                Some((other, close)) => {
                    claimed[other] = true;
                    pairs.push(Pair {
                        name: marker.name,
                        open: marker.span,
                        close: close.span,
                    });
                }
                None => self.issue(IssueKind::UnclosedSection, marker.name, marker.span, || {
                    format!(
                        "section `{}` is never closed and will render literally",
                        marker.name
                    )
                }),
            }
        }

        for (idx, marker) in markers.iter().enumerate() {
            if marker.sigil == Sigil::Close && !claimed[idx] {
                self.issue(IssueKind::StrayClose, marker.name, marker.span, || {
                    format!("{{{{/{}}}}} has no matching open marker", marker.name)
                });
            }
        }

        for (idx, inner) in pairs.iter().enumerate() {
            let crossed = pairs[..idx].iter().find(|outer| {
                outer.open.start < inner.open.start
                    && inner.open.start < outer.close.start
                    && outer.close.end <= inner.close.start
            });
            if let Some(outer) = crossed {
                self.issue(IssueKind::OverlappingSection, inner.name, inner.open, || {
                    format!(
                        "section `{}` opens inside `{}` but closes after it; part of it will render literally",
                        inner.name, outer.name
                    )
                });
            }
        }

        self.analysis.issues.sort_by_key(|issue| issue.span.start);
        self.analysis
    }

    fn issue(
        &mut self,
        kind: IssueKind,
        name: &str,
        span: Span,
        message: impl FnOnce() -> String,
    ) {
        self.analysis.issues.push(AnalysisIssue {
            kind,
            name: name.to_string(),
            message: message(),
            span,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_marker_usage_by_kind() {
        let report = analyze_template("{{A}}{{#B}}{{C}}{{/B}}{{^D}}x{{/D}}");
        assert_eq!(report.variables.len(), 2);
        assert_eq!(report.sections[0].name, "B");
        assert_eq!(report.inverted[0].name, "D");
        assert_eq!(
            report.names().into_iter().collect::<Vec<_>>(),
            vec!["A", "B", "C", "D"]
        );
        assert!(report.is_clean());
    }

    #[test]
    fn reports_unclosed_and_stray_markers_in_source_order() {
        let report = analyze_template("{{/X}} {{#Open}} body");
        let kinds: Vec<_> = report.issues.iter().map(|issue| issue.kind).collect();
        assert_eq!(kinds, vec![IssueKind::StrayClose, IssueKind::UnclosedSection]);
        assert_eq!(report.issues[1].span, Span::new(7, 16));
        assert!(report.issues[1].message.contains("Open"));
    }

    #[test]
    fn crossing_blocks_are_reported() {
        let report = analyze_template("{{#A}}{{^B}}{{/A}}{{/B}}");
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].kind, IssueKind::OverlappingSection);
        assert_eq!(report.issues[0].name, "B");
        assert_eq!(report.issues[0].span, Span::new(6, 12));
    }

    #[test]
    fn same_name_nesting_pairs_like_the_renderer() {
        let report = analyze_template("{{#A}}{{#A}}x{{/A}}{{/A}}");
        let kinds: Vec<_> = report.issues.iter().map(|issue| issue.kind).collect();
        assert_eq!(kinds, vec![IssueKind::OverlappingSection]);

        let report = analyze_template("{{#A}}{{#A}}x{{/A}}");
        let kinds: Vec<_> = report.issues.iter().map(|issue| issue.kind).collect();
        assert_eq!(kinds, vec![IssueKind::UnclosedSection]);
        assert_eq!(report.issues[0].span.start, 6);
    }

    #[test]
    fn nested_blocks_with_distinct_names_are_clean() {
        assert!(analyze_template("{{#L}}{{^Paid}}due{{/Paid}}{{/L}}").is_clean());
        assert!(analyze_template("{{#L}}a{{/L}}{{^L}}b{{/L}}").is_clean());
    }
}
