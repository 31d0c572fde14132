//! Result assembly and report writing.

use std::fs;

use novel_core::diagnostic::{Diagnostic, DiagnosticKind};
use novel_core::finding::{Finding, sort_findings};
use novel_core::result::{CheckResult, RESULT_VERSION};
use novel_core::stats::ReportStats;
use novel_manuscript::domain::layout::ManuscriptLayout;
use tracing::{info, warn};

use crate::domain::kind::ReportKind;
use crate::domain::render::render;

/// Analyzer output ready to be published.
#[derive(Debug, Clone)]
pub struct Analysis<S> {
    /// Analyzer counters.
    pub stats: S,
    /// Findings in any order.
    pub findings: Vec<Finding>,
    /// Engine notices gathered so far.
    pub diagnostics: Vec<Diagnostic>,
    /// Follow-up suggestions; empty means none.
    pub next_steps: Vec<String>,
}

fn write_report(layout: &ManuscriptLayout, relative: &str, text: &str) -> std::io::Result<()> {
    let path = layout.absolute(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)
}

/// Sorts findings, optionally writes the report, and builds the result.
///
/// A failed write is reported as a `report_write_failed` diagnostic and
/// leaves `report_path` unset.
#[must_use]
pub fn publish<S: ReportStats>(
    layout: &ManuscriptLayout,
    kind: ReportKind,
    write: bool,
    analysis: Analysis<S>,
) -> CheckResult<S> {
    let Analysis {
        stats,
        mut findings,
        mut diagnostics,
        next_steps,
    } = analysis;
    sort_findings(&mut findings);

    let mut report_path = None;
    if write {
        let relative = layout.report_file(&kind.file_name());
        let text = render(kind, &stats, &findings, &diagnostics);
        match write_report(layout, &relative, &text) {
            Ok(()) => {
                info!(report = %relative, findings = findings.len(), "report written");
                report_path = Some(relative);
            }
            Err(err) => {
                warn!(report = %relative, error = %err, "report write failed");
                diagnostics.push(
                    Diagnostic::new(
                        DiagnosticKind::ReportWriteFailed,
                        format!("cannot write {kind} report: {err}"),
                    )
                    .in_file(relative, None),
                );
            }
        }
    }

    CheckResult {
        version: RESULT_VERSION,
        report_path,
        stats,
        findings,
        next_steps: (!next_steps.is_empty()).then_some(next_steps),
        diagnostics,
    }
}
