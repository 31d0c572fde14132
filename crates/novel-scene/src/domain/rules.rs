//! Scene coherence rules.
//!
//! Rules run per scene in a fixed order and each emits at most one finding
//! per scene:
//!
//! 1. [`MISSING_FIELD`]: objective, conflict, or a required field is blank.
//! 2. [`NO_CONFLICT`]: an objective with nothing in its way.
//! 3. [`NO_OUTCOME_CHANGE`]: the outcome restates the objective.
//! 4. [`DUPLICATE_SCENE_ID`]: the scene id was used earlier in the run.

use std::collections::HashMap;

use novel_core::finding::{Anchor, Evidence, Finding, Severity};
use novel_manuscript::domain::chapter::{Chapter, Scene};
use novel_manuscript::domain::scope::chapter_repro;

use super::config::SceneConfig;

/// A scene lacks one or more required fields.
pub const MISSING_FIELD: &str = "SCN_MISSING_FIELD";
/// A scene has an objective but no conflict.
pub const NO_CONFLICT: &str = "SCN_NO_CONFLICT";
/// A scene's outcome equals its objective.
pub const NO_OUTCOME_CHANGE: &str = "SCN_NO_OUTCOME_CHANGE";
/// A scene id is reused.
pub const DUPLICATE_SCENE_ID: &str = "SCN_DUPLICATE_SCENE_ID";

const TRAILING_PUNCTUATION: &[char] = &[
    '.', '!', '?', ',', ';', ':', '…', '。', '！', '？', '，', '；', '：',
];

/// Normalizes text for the outcome comparison: trims, collapses runs of
/// whitespace, lowercases ASCII, and strips trailing sentence punctuation.
#[must_use]
pub fn normalize(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .to_ascii_lowercase()
        .trim_end_matches(|c: char| TRAILING_PUNCTUATION.contains(&c) || c.is_whitespace())
        .to_owned()
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Findings and counters for a set of chapters.
#[derive(Debug, Clone, Default)]
pub struct SceneAnalysis {
    /// Unsorted findings.
    pub findings: Vec<Finding>,
    /// Scenes examined.
    pub scene_count: usize,
    /// Scenes with at least one error.
    pub invalid_count: usize,
}

struct SceneContext<'a> {
    chapter: &'a Chapter,
    scene: &'a Scene,
}

impl SceneContext<'_> {
    fn finding(&self, severity: Severity, code: &str, message: String, line: usize) -> Finding {
        Finding::new(
            severity,
            code,
            message,
            Anchor::Chapter {
                ordinal: self.chapter.ordinal,
                position: line,
            },
            Evidence::line(&self.chapter.path, line),
        )
        .with_repro(chapter_repro("scene", &self.chapter.chapter_id))
    }

    fn label(&self) -> String {
        format!("{}/{}", self.chapter.chapter_id, self.scene.label())
    }
}

fn missing_fields(ctx: &SceneContext<'_>, config: &SceneConfig) -> Option<Finding> {
    let scene = ctx.scene;
    let mut missing: Vec<&str> = Vec::new();
    for field in ["objective", "conflict"]
        .into_iter()
        .chain(config.extra_required())
    {
        if !missing.contains(&field) && !scene.has_field(field) {
            missing.push(field);
        }
    }
    if missing.is_empty() {
        return None;
    }

    let finding = ctx
        .finding(
            Severity::Error,
            MISSING_FIELD,
            format!("scene {} is missing {}", ctx.label(), missing.join(", ")),
            scene.line(),
        )
        .with_fix(format!("fill in `{}` for this scene", missing.join("`, `")));
    Some(finding)
}

fn no_conflict(ctx: &SceneContext<'_>) -> Option<Finding> {
    let scene = ctx.scene;
    if !scene.has_field("objective") || scene.has_field("conflict") {
        return None;
    }
    let line = scene.field_line("conflict");
    let mut finding = ctx
        .finding(
            Severity::Error,
            NO_CONFLICT,
            format!(
                "scene {} has an objective but no conflict",
                ctx.label()
            ),
            line,
        )
        .with_fix("state what stands between the character and the objective");
    if line != scene.field_line("objective") {
        finding = finding.with_evidence(Evidence::line(
            &ctx.chapter.path,
            scene.field_line("objective"),
        ));
    }
    Some(finding)
}

fn no_outcome_change(ctx: &SceneContext<'_>) -> Option<Finding> {
    let scene = ctx.scene;
    let objective = present(scene.objective.as_ref())?;
    let outcome = present(scene.outcome.as_ref())?;
    if normalize(objective) != normalize(outcome) {
        return None;
    }
    let line = scene.field_line("outcome");
    let finding = Finding::new(
        Severity::Warn,
        NO_OUTCOME_CHANGE,
        format!("scene {} ends exactly where its objective started", ctx.label()),
        Anchor::Chapter {
            ordinal: ctx.chapter.ordinal,
            position: line,
        },
        Evidence::line(&ctx.chapter.path, line).with_excerpt(outcome),
    )
    .with_evidence(Evidence::line(&ctx.chapter.path, scene.field_line("objective")))
    .with_fix("let the outcome change the situation: a cost, a twist, or a new problem")
    .with_repro(chapter_repro("scene", &ctx.chapter.chapter_id));
    Some(finding)
}

/// Runs every scene rule over `chapters`.
#[must_use]
pub fn analyze(chapters: &[Chapter], config: &SceneConfig) -> SceneAnalysis {
    let mut analysis = SceneAnalysis::default();
    let mut first_seen: HashMap<&str, (&str, usize)> = HashMap::new();

    for chapter in chapters {
        for scene in &chapter.scenes {
            let ctx = SceneContext { chapter, scene };
            analysis.scene_count += 1;

            let mut scene_findings: Vec<Finding> = [
                missing_fields(&ctx, config),
                no_conflict(&ctx),
                no_outcome_change(&ctx),
            ]
            .into_iter()
            .flatten()
            .collect();

            if let Some(id) = present(scene.scene_id.as_ref()) {
                let line = scene.field_line("scene_id");
                match first_seen.get(id) {
                    Some(&(path, first_line)) => scene_findings.push(
                        ctx.finding(
                            Severity::Warn,
                            DUPLICATE_SCENE_ID,
                            format!("scene id `{id}` is already used by {path}:{first_line}"),
                            line,
                        )
                        .with_evidence(Evidence::line(path, first_line))
                        .with_fix("give every scene a unique scene_id"),
                    ),
                    None => {
                        first_seen.insert(id, (chapter.path.as_str(), line));
                    }
                }
            }

            if scene_findings.iter().any(|f| f.severity == Severity::Error) {
                analysis.invalid_count += 1;
            }
            analysis.findings.extend(scene_findings);
        }
    }

    analysis
}

/// Follow-up suggestions for the codes present in `findings`.
#[must_use]
pub fn next_steps(findings: &[Finding]) -> Vec<String> {
    let has = |code: &str| findings.iter().any(|f| f.code == code);
    let mut steps = Vec::new();
    if has(MISSING_FIELD) {
        steps.push("Fill in the missing scene fields, then rerun the scene check.".to_owned());
    }
    if has(NO_CONFLICT) {
        steps.push("Give each flagged scene an obstacle in `conflict`.".to_owned());
    }
    if has(NO_OUTCOME_CHANGE) {
        steps.push(
            "Rewrite flagged outcomes so each scene ends in a changed situation.".to_owned(),
        );
    }
    if has(DUPLICATE_SCENE_ID) {
        steps.push("Rename duplicate scene ids.".to_owned());
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(ordinal: usize, scenes_yaml: &str) -> Chapter {
        let id = format!("ch{:04}", ordinal + 1);
        let source = format!("---\nchapter_id: {id}\nscenes:\n{scenes_yaml}---\nProse.\n");
        Chapter::parse(&format!("manuscript/chapters/{id}.md"), ordinal, &source).unwrap()
    }

    fn codes(analysis: &SceneAnalysis) -> Vec<&str> {
        analysis.findings.iter().map(|f| f.code.as_str()).collect()
    }

    #[test]
    fn test_normalize_collapses_case_space_and_trailing_punctuation() {
        assert_eq!(normalize("  Find   the KEY!! "), "find the key");
        assert_eq!(normalize("拿到钥匙。"), "拿到钥匙");
        assert_eq!(normalize("a. b"), "a. b");
    }

    #[test]
    fn test_blank_conflict_with_objective_is_missing_field_and_no_conflict() {
        // Arrange
        let chapters = vec![chapter(
            0,
            "  - scene_id: s1\n    objective: find the key\n    conflict: \"\"\n    outcome: key lost\n",
        )];

        // Act
        let analysis = analyze(&chapters, &SceneConfig::default());

        // Assert
        assert_eq!(codes(&analysis), vec![MISSING_FIELD, NO_CONFLICT]);
        assert_eq!(analysis.invalid_count, 1);
        assert_eq!(
            analysis.findings[0].message,
            "scene ch0001/s1 is missing conflict"
        );
        let finding = &analysis.findings[1];
        assert_eq!(finding.severity, Severity::Error);
        assert_eq!(finding.evidence()[0].line, Some(6));
        assert_eq!(finding.evidence()[1].line, Some(5));
    }

    #[test]
    fn test_blank_objective_reports_both_fields_in_one_finding() {
        let chapters = vec![chapter(0, "  - scene_id: s1\n    outcome: done\n")];

        let analysis = analyze(&chapters, &SceneConfig::default());

        assert_eq!(codes(&analysis), vec![MISSING_FIELD]);
        assert!(analysis.findings[0].message.contains("objective, conflict"));
        assert_eq!(analysis.findings[0].evidence()[0].line, Some(4));
    }

    #[test]
    fn test_conflict_listed_as_required_is_reported_once() {
        let chapters = vec![chapter(
            0,
            "  - scene_id: s1\n    objective: go\n    conflict: \"  \"\n    outcome: won\n",
        )];
        let config = SceneConfig {
            required_fields: vec!["conflict".into(), "stakes".into()],
        };

        let analysis = analyze(&chapters, &config);

        assert_eq!(codes(&analysis), vec![MISSING_FIELD, NO_CONFLICT]);
        assert_eq!(
            analysis.findings[0].message,
            "scene ch0001/s1 is missing conflict, stakes"
        );
    }

    #[test]
    fn test_required_fields_join_the_missing_field_finding() {
        let chapters = vec![chapter(
            0,
            "  - scene_id: s1\n    objective: go\n    conflict: rain\n    stakes: life\n",
        )];
        let config = SceneConfig {
            required_fields: vec!["hook".into(), "stakes".into(), "conflict".into()],
        };

        let analysis = analyze(&chapters, &config);

        assert_eq!(codes(&analysis), vec![MISSING_FIELD]);
        assert_eq!(analysis.findings[0].message, "scene ch0001/s1 is missing hook");
    }

    #[test]
    fn test_outcome_equal_to_objective_after_normalization_warns() {
        let chapters = vec![chapter(
            0,
            "  - scene_id: s1\n    objective: Find the key.\n    conflict: guards\n    outcome: \" find  the KEY \"\n",
        )];

        let analysis = analyze(&chapters, &SceneConfig::default());

        assert_eq!(codes(&analysis), vec![NO_OUTCOME_CHANGE]);
        assert_eq!(analysis.findings[0].severity, Severity::Warn);
        assert_eq!(analysis.invalid_count, 0);
    }

    #[test]
    fn test_different_outcome_is_clean() {
        let chapters = vec![chapter(
            0,
            "  - scene_id: s1\n    objective: find the key\n    conflict: guards\n    outcome: the key is a fake\n",
        )];

        let analysis = analyze(&chapters, &SceneConfig::default());

        assert!(analysis.findings.is_empty());
        assert_eq!(analysis.scene_count, 1);
    }

    #[test]
    fn test_duplicate_scene_id_across_chapters_warns_on_later_scene() {
        let scene = "  - scene_id: s1\n    objective: go\n    conflict: rain\n";
        let chapters = vec![chapter(0, scene), chapter(1, scene)];

        let analysis = analyze(&chapters, &SceneConfig::default());

        assert_eq!(codes(&analysis), vec![DUPLICATE_SCENE_ID]);
        let finding = &analysis.findings[0];
        assert_eq!(finding.evidence()[0].file, "manuscript/chapters/ch0002.md");
        assert_eq!(finding.evidence()[1].file, "manuscript/chapters/ch0001.md");
    }

    #[test]
    fn test_next_steps_follow_codes_present() {
        let chapters = vec![chapter(0, "  - scene_id: s1\n    objective: go\n")];
        let analysis = analyze(&chapters, &SceneConfig::default());

        let steps = next_steps(&analysis.findings);

        assert_eq!(
            steps,
            vec![
                "Fill in the missing scene fields, then rerun the scene check.",
                "Give each flagged scene an obstacle in `conflict`.",
            ]
        );
        assert!(next_steps(&[]).is_empty());
    }
}
