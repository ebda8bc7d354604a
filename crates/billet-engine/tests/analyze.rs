// SPDX-License-Identifier: Apache-2.0 OR MIT
use billet_engine::{Context, IssueKind, Template};

#[test]
fn analysis_reports_names_by_marker_kind() {
    let tmpl = Template::new(
        "analysis",
        "<h1>{{CompanyName}}</h1>{{#ShowNotes}}<p>{{Notes}}</p>{{/ShowNotes}}\
         {{^IsOverdue}}on time{{/IsOverdue}}{{#LineItems}}{{Description}}{{/LineItems}}",
    );

    let report = tmpl.analyze();
    assert!(report.is_clean());

    let vars: Vec<_> = report.variables.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(vars, vec!["CompanyName", "Notes", "Description"]);

    let sections: Vec<_> = report.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(sections, vec!["ShowNotes", "LineItems"]);

    let inverted: Vec<_> = report.inverted.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(inverted, vec!["IsOverdue"]);

    assert!(report.names().contains("Description"));
}

#[test]
fn analysis_flags_markers_that_render_literally() {
    let tmpl = Template::new("broken", "{{#A}}x{{/B}}");
    let report = tmpl.analyze();

    let kinds: Vec<_> = report.issues.iter().map(|issue| issue.kind).collect();
    assert_eq!(kinds, vec![IssueKind::UnclosedSection, IssueKind::StrayClose]);
    assert_eq!(report.issues[0].name, "A");
    assert_eq!(report.issues[1].name, "B");
}

#[test]
fn shared_close_between_positive_and_negative_is_balanced() {
    let tmpl = Template::new("pair", "{{#Paid}}yes{{/Paid}}{{^Paid}}no{{/Paid}}");
    assert!(tmpl.analyze().is_clean());
}

#[test]
fn analysis_agrees_with_renderer_on_crossing_blocks() {
    let ctx = Context::new().with("A", false);
    for source in ["{{#A}}{{^B}}{{/A}}{{/B}}", "{{#A}}{{#A}}x{{/A}}{{/A}}"] {
        let tmpl = Template::new("crossing", source);
        let report = tmpl.analyze();
        assert!(!report.is_clean(), "{source}");
        assert!(report
            .issues
            .iter()
            .all(|issue| issue.kind == IssueKind::OverlappingSection));
        assert!(tmpl.render(&ctx).contains("{{/"), "{source}");
    }
}
