//! Markdown rendering of check results.
//!
//! Output is a pure function of its inputs: the same kind, stats, findings,
//! and diagnostics always render to the same bytes.

use novel_core::diagnostic::Diagnostic;
use novel_core::finding::Finding;
use novel_core::stats::ReportStats;

use super::kind::ReportKind;

/// First line of every derived report.
pub const MARKER: &str = "<!-- novel:derived v1; DO NOT EDIT BY HAND -->";

/// Placeholder for an empty findings list.
const NONE: &str = "(none)";

fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn finding_lines(finding: &Finding, lines: &mut Vec<String>) {
    let primary = finding.primary_evidence();
    lines.push(format!(
        "- [{}] {}: {} ({})",
        finding.severity,
        finding.code,
        one_line(&finding.message),
        primary.location()
    ));
    if let Some(fix) = &finding.suggested_fix {
        lines.push(format!("  - fix_hint: {}", one_line(fix)));
    }
    if let Some(repro) = &finding.repro {
        lines.push(format!("  - repro: {}", one_line(repro)));
    }
    if let Some(excerpt) = &primary.excerpt {
        lines.push(format!("  - excerpt: {}", one_line(excerpt)));
    }
    for extra in finding.evidence().iter().skip(1) {
        lines.push(format!("  - see_also: {}", extra.location()));
    }
}

fn diagnostic_line(diagnostic: &Diagnostic) -> String {
    let location = match (&diagnostic.file, diagnostic.line) {
        (Some(file), Some(line)) => format!(" ({file}:{line})"),
        (Some(file), None) => format!(" ({file})"),
        (None, _) => String::new(),
    };
    format!(
        "- [{}] {}{location}",
        diagnostic.kind,
        one_line(&diagnostic.message)
    )
}

/// Renders a report.
///
/// Findings are printed in the order given; callers sort them first.
#[must_use]
pub fn render(
    kind: ReportKind,
    stats: &dyn ReportStats,
    findings: &[Finding],
    diagnostics: &[Diagnostic],
) -> String {
    let mut lines = vec![
        MARKER.to_owned(),
        String::new(),
        format!("# {}", kind.title()),
        String::new(),
        "## Summary".to_owned(),
        String::new(),
    ];
    lines.extend(
        stats
            .summary()
            .into_iter()
            .map(|(name, value)| format!("- {name}: {value}")),
    );

    lines.push(String::new());
    lines.push("## Findings".to_owned());
    lines.push(String::new());
    if findings.is_empty() {
        lines.push(NONE.to_owned());
    } else {
        for finding in findings {
            finding_lines(finding, &mut lines);
        }
    }

    if !diagnostics.is_empty() {
        lines.push(String::new());
        lines.push("## Diagnostics".to_owned());
        lines.push(String::new());
        lines.extend(diagnostics.iter().map(diagnostic_line));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
