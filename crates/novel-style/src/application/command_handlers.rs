//! Command handlers for the Style Consistency analyzer.

use novel_core::clock::{Clock, elapsed_millis};
use novel_core::command::Command;
use novel_core::error::EngineError;
use novel_core::finding::{Finding, Severity};
use novel_core::result::CheckResult;
use novel_core::stats::SeverityTally;
use novel_manuscript::application::loader::load_scoped;
use novel_report::application::publish::{Analysis, publish};
use novel_report::domain::kind::ReportKind;
use tracing::debug;

use crate::domain::catchphrases::{self, CATCHPHRASE_STATS};
use crate::domain::commands::CheckStyle;
use crate::domain::lexicon::{self, AVOID_WORD};
use crate::domain::stats::StyleStats;

fn next_steps(findings: &[Finding]) -> Vec<String> {
    let mut steps = Vec::new();
    if findings.iter().any(|f| f.code == AVOID_WORD) {
        steps.push("Revise the flagged passages to remove avoid-words.".to_owned());
    }
    if findings
        .iter()
        .any(|f| f.code == CATCHPHRASE_STATS && f.severity == Severity::Warn)
    {
        steps.push("Thin out overused catchphrases.".to_owned());
    }
    steps
}

/// Handles the `CheckStyle` command.
///
/// # Errors
///
/// Returns `EngineError::InvalidArgument` if the configuration is invalid.
pub fn handle_check_style(
    command: &CheckStyle,
    clock: &dyn Clock,
) -> Result<CheckResult<StyleStats>, EngineError> {
    command.config.validate()?;
    let started = clock.now();

    let scoped = load_scoped(&command.layout, &command.scope);
    let mut findings = lexicon::analyze(&scoped.chapters, &command.config.avoid_list());
    let avoid_word_hits = findings.len();
    let phrases = catchphrases::analyze(&scoped.chapters, &scoped.characters, &command.config);
    findings.extend(phrases.findings);

    let mut diagnostics = scoped.diagnostics;
    diagnostics.extend(phrases.diagnostics);
    let tally = SeverityTally::of(&findings);

    let stats = StyleStats {
        chapter_count: scoped.chapters.len(),
        character_count: phrases.character_count,
        avoid_word_hits,
        catchphrases_tracked: phrases.catchphrases_tracked,
        warns: tally.warns,
        infos: tally.infos,
        duration_ms: elapsed_millis(clock, started),
    };
    debug!(
        correlation_id = %command.correlation_id,
        command_type = command.command_type(),
        avoid_word_hits,
        findings = findings.len(),
        "style check complete"
    );

    let next_steps = next_steps(&findings);
    Ok(publish(
        &command.layout,
        ReportKind::Style,
        command.write_report,
        Analysis {
            stats,
            findings,
            diagnostics,
            next_steps,
        },
    ))
}
