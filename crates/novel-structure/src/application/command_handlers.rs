//! Command handlers for the Structural Coverage analyzer.

use novel_core::clock::{Clock, elapsed_millis};
use novel_core::command::Command;
use novel_core::error::EngineError;
use novel_core::result::CheckResult;
use novel_core::stats::SeverityTally;
use novel_manuscript::application::loader::load_scoped;
use novel_report::application::publish::{Analysis, publish};
use novel_report::domain::kind::ReportKind;
use tracing::debug;

use crate::domain::commands::CheckStructure;
use crate::domain::stats::StructureStats;
use crate::domain::{beats, threads};

/// Handles the `CheckStructure` command.
///
/// Thread continuity runs only when the scope is the whole manuscript. A
/// chapter scope that matches nothing yields no findings.
///
/// # Errors
///
/// Returns `EngineError::InvalidArgument` if the configuration is invalid.
pub fn handle_check_structure(
    command: &CheckStructure,
    clock: &dyn Clock,
) -> Result<CheckResult<StructureStats>, EngineError> {
    command.config.validate()?;
    let started = clock.now();

    let scoped = load_scoped(&command.layout, &command.scope);
    let chapters_dir = command.layout.chapters_dir();
    let mut beat_analysis = beats::analyze(&scoped.chapters, &command.config, &chapters_dir);
    if scoped.scope_missed() {
        beat_analysis.findings.clear();
    }
    let thread_analysis = if command.scope.is_all() {
        threads::analyze(&scoped.chapters, beat_analysis.manuscript_positions())
    } else {
        threads::ThreadAnalysis::default()
    };

    let mut findings = beat_analysis.findings;
    findings.extend(thread_analysis.findings);
    let tally = SeverityTally::of(&findings);

    let stats = StructureStats {
        chapter_count: scoped.chapters.len(),
        beat_count: beat_analysis.beat_count,
        required_beats: beat_analysis.required_beats,
        seen_required_beats: beat_analysis.seen_required_beats,
        coverage: beat_analysis.coverage,
        order_errors: beat_analysis.order_errors,
        open_threads: thread_analysis.open_threads,
        errors: tally.errors,
        warns: tally.warns,
        infos: tally.infos,
        duration_ms: elapsed_millis(clock, started),
    };
    debug!(
        correlation_id = %command.correlation_id,
        command_type = command.command_type(),
        coverage = stats.coverage,
        findings = findings.len(),
        "structure check complete"
    );

    let mut next_steps = beats::next_steps(&findings);
    next_steps.extend(threads::next_steps(&findings));
    Ok(publish(
        &command.layout,
        ReportKind::Structure,
        command.write_report,
        Analysis {
            stats,
            findings,
            diagnostics: scoped.diagnostics,
            next_steps,
        },
    ))
}
