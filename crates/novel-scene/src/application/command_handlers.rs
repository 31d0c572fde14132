//! Command handlers for the Scene Coherence analyzer.
//!
//! Handlers orchestrate one check: load the scoped manuscript, run the
//! rules, tally stats, and publish the result.

use novel_core::clock::{Clock, elapsed_millis};
use novel_core::command::Command;
use novel_core::error::EngineError;
use novel_core::result::CheckResult;
use novel_core::stats::SeverityTally;
use novel_manuscript::application::loader::load_scoped;
use novel_report::application::publish::{Analysis, publish};
use novel_report::domain::kind::ReportKind;
use tracing::debug;

use crate::domain::commands::CheckScenes;
use crate::domain::rules::{analyze, next_steps};
use crate::domain::stats::SceneStats;

/// Handles the `CheckScenes` command.
///
/// # Errors
///
/// Returns `EngineError::InvalidArgument` if the configuration is invalid.
/// Everything else is reported through the result's diagnostics.
pub fn handle_check_scenes(
    command: &CheckScenes,
    clock: &dyn Clock,
) -> Result<CheckResult<SceneStats>, EngineError> {
    command.config.validate()?;
    let started = clock.now();

    let scoped = load_scoped(&command.layout, &command.scope);
    let analysis = analyze(&scoped.chapters, &command.config);
    let tally = SeverityTally::of(&analysis.findings);

    let stats = SceneStats {
        chapter_count: scoped.chapters.len(),
        scene_count: analysis.scene_count,
        invalid_count: analysis.invalid_count,
        errors: tally.errors,
        warns: tally.warns,
        infos: tally.infos,
        duration_ms: elapsed_millis(clock, started),
    };
    debug!(
        correlation_id = %command.correlation_id,
        command_type = command.command_type(),
        scenes = stats.scene_count,
        findings = analysis.findings.len(),
        "scene check complete"
    );

    let next_steps = next_steps(&analysis.findings);
    Ok(publish(
        &command.layout,
        ReportKind::Scene,
        command.write_report,
        Analysis {
            stats,
            findings: analysis.findings,
            diagnostics: scoped.diagnostics,
            next_steps,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use novel_core::diagnostic::DiagnosticKind;
    use novel_manuscript::domain::layout::ManuscriptLayout;
    use novel_manuscript::domain::scope::Scope;
    use novel_test_support::{FixedClock, ManuscriptFixture};
    use uuid::Uuid;

    use crate::domain::config::SceneConfig;
    use crate::domain::rules::{MISSING_FIELD, NO_CONFLICT, NO_OUTCOME_CHANGE};

    const KEY_CHAPTER: &str = "---\nchapter_id: ch0001\nscenes:\n  - scene_id: s1\n    objective: 拿到钥匙\n    conflict: \"\"\n    outcome: 拿到钥匙\n---\n林推开门。\n";

    fn command(fixture: &ManuscriptFixture, scope: Scope, write_report: bool) -> CheckScenes {
        CheckScenes {
            correlation_id: Uuid::new_v4(),
            layout: ManuscriptLayout::new(fixture.root()),
            scope,
            write_report,
            config: SceneConfig::default(),
        }
    }

    #[test]
    fn test_key_scene_reports_no_conflict_and_no_outcome_change() {
        // Arrange
        let fixture = ManuscriptFixture::new().chapter("ch0001.md", KEY_CHAPTER);
        let cmd = command(&fixture, Scope::chapter("ch0001"), true);

        // Act
        let result = handle_check_scenes(&cmd, &FixedClock::default()).unwrap();

        // Assert
        assert_eq!(result.stats.scene_count, 1);
        assert_eq!(result.stats.invalid_count, 1);
        assert!(result.has_code(NO_CONFLICT));
        assert!(result.has_code(NO_OUTCOME_CHANGE));
        assert!(result.has_code(MISSING_FIELD));
        assert_eq!(result.stats.errors, 2);
        assert_eq!(result.stats.warns, 1);
        assert_eq!(result.stats.duration_ms, 0);
        let report_path = result.report_path.as_deref().unwrap();
        assert_eq!(report_path, "reports/scene-report.md");
        assert!(fixture.root().join(report_path).is_file());
        assert!(result.next_steps.is_some());
    }

    #[test]
    fn test_blank_conflict_under_an_objective_is_a_missing_field() {
        let fixture = ManuscriptFixture::new().chapter(
            "ch0001.md",
            "---\nchapter_id: ch0001\nscenes:\n  - scene_id: s1\n    objective: go\n    conflict: \"\"\n    outcome: won\n---\n",
        );

        let result =
            handle_check_scenes(&command(&fixture, Scope::All, false), &FixedClock::default())
                .unwrap();

        assert!(result.has_code(MISSING_FIELD));
        assert!(result.has_code(NO_CONFLICT));
        assert_eq!(result.stats.errors, 2);
        assert_eq!(result.stats.invalid_count, 1);
    }

    #[test]
    fn test_findings_are_ordered_by_line_within_chapter() {
        let fixture = ManuscriptFixture::new().chapter("ch0001.md", KEY_CHAPTER);

        let result =
            handle_check_scenes(&command(&fixture, Scope::All, false), &FixedClock::default())
                .unwrap();

        let codes: Vec<&str> = result.findings.iter().map(|f| f.code.as_str()).collect();
        assert_eq!(codes, vec![MISSING_FIELD, NO_CONFLICT, NO_OUTCOME_CHANGE]);
        assert!(result.report_path.is_none());
    }

    #[test]
    fn test_unknown_scope_yields_zero_findings_and_a_diagnostic() {
        let fixture = ManuscriptFixture::new().chapter("ch0001.md", KEY_CHAPTER);

        let result = handle_check_scenes(
            &command(&fixture, Scope::chapter("ch9999"), false),
            &FixedClock::default(),
        )
        .unwrap();

        assert!(result.findings.is_empty());
        assert_eq!(result.stats.scene_count, 0);
        assert_eq!(result.stats.chapter_count, 0);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::ScopeNotFound);
        assert!(result.next_steps.is_none());
    }

    #[test]
    fn test_malformed_chapter_is_skipped_with_one_diagnostic() {
        let fixture = ManuscriptFixture::new()
            .chapter("ch0001.md", KEY_CHAPTER)
            .chapter("ch0002.md", "---\nchapter_id: [unclosed\n---\n")
            .chapter(
                "ch0003.md",
                "---\nchapter_id: ch0003\nscenes:\n  - scene_id: s3\n    objective: run\n    conflict: dogs\n---\n",
            );

        let result =
            handle_check_scenes(&command(&fixture, Scope::All, false), &FixedClock::default())
                .unwrap();

        assert_eq!(result.stats.chapter_count, 2);
        assert_eq!(result.stats.scene_count, 2);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::ParseError);
    }

    #[test]
    fn test_blank_required_field_is_rejected() {
        let fixture = ManuscriptFixture::new();
        let mut cmd = command(&fixture, Scope::All, false);
        cmd.config.required_fields = vec![String::new()];

        let err = handle_check_scenes(&cmd, &FixedClock::default()).unwrap_err();

        assert!(matches!(err, EngineError::InvalidArgument(_)));
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let fixture = ManuscriptFixture::new().chapter("ch0001.md", KEY_CHAPTER);

        let result =
            handle_check_scenes(&command(&fixture, Scope::All, false), &FixedClock::default())
                .unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["version"], 1);
        assert_eq!(json["stats"]["sceneCount"], 1);
        assert_eq!(json["stats"]["invalidCount"], 1);
        assert_eq!(json["stats"]["durationMs"], 0);
        assert!(json.get("reportPath").is_none());
        assert_eq!(json["findings"][0]["code"], MISSING_FIELD);
        assert_eq!(json["findings"][1]["code"], NO_CONFLICT);
    }
}
