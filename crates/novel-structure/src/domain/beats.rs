//! Beat coverage, beat order, and act progression.

use std::collections::HashMap;

use novel_core::finding::{Anchor, Evidence, Finding, Severity};
use novel_manuscript::domain::chapter::Chapter;
use novel_manuscript::domain::scope::chapter_repro;

use super::config::StructureConfig;

/// A required beat is declared by no chapter.
pub const REQUIRED_BEAT_MISSING: &str = "STR_REQUIRED_BEAT_MISSING";
/// A required beat comes before a beat that should precede it.
pub const BEAT_ORDER: &str = "STR_BEAT_ORDER";
/// Coverage is below the requested minimum.
pub const COVERAGE_BELOW_MIN: &str = "STR_COVERAGE_BELOW_MIN";
/// A chapter's act is lower than an earlier chapter's.
pub const ACT_REGRESSION: &str = "STR_ACT_REGRESSION";

/// Beat findings and counters.
#[derive(Debug, Clone, Default)]
pub struct BeatAnalysis {
    /// Unsorted findings.
    pub findings: Vec<Finding>,
    /// Chapters declaring a beat.
    pub beat_count: usize,
    /// Distinct required beats.
    pub required_beats: usize,
    /// Required beats found.
    pub seen_required_beats: usize,
    /// Fraction of required beats found.
    pub coverage: f64,
    /// `STR_BEAT_ORDER` findings emitted.
    pub order_errors: usize,
}

impl BeatAnalysis {
    /// Manuscript-level anchor positions consumed by this analysis.
    #[must_use]
    pub fn manuscript_positions(&self) -> usize {
        self.required_beats + 1
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(seen: usize, required: usize) -> f64 {
    if required == 0 {
        1.0
    } else {
        seen as f64 / required as f64
    }
}

fn chapter_finding(
    chapter: &Chapter,
    severity: Severity,
    code: &str,
    message: String,
    line: usize,
) -> Finding {
    Finding::new(
        severity,
        code,
        message,
        Anchor::Chapter {
            ordinal: chapter.ordinal,
            position: line,
        },
        Evidence::line(&chapter.path, line),
    )
    .with_repro(chapter_repro("structure", &chapter.chapter_id))
}

fn beat_order(required: &[&str], first_chapter: &HashMap<&str, &Chapter>) -> Vec<Finding> {
    let mut findings = Vec::new();
    // Latest chapter among the required beats seen so far.
    let mut latest: Option<(&str, &Chapter)> = None;
    for &beat in required {
        let Some(&chapter) = first_chapter.get(beat) else {
            continue;
        };
        match latest {
            Some((earlier, later_chapter)) if later_chapter.ordinal > chapter.ordinal => {
                let line = chapter.field_line("structure.beat_id");
                findings.push(
                    chapter_finding(
                        chapter,
                        Severity::Warn,
                        BEAT_ORDER,
                        format!(
                            "beat `{beat}` in {} comes before `{earlier}` in {}",
                            chapter.chapter_id, later_chapter.chapter_id
                        ),
                        line,
                    )
                    .with_evidence(Evidence::line(
                        &later_chapter.path,
                        later_chapter.field_line("structure.beat_id"),
                    ))
                    .with_fix(format!(
                        "move `{beat}` after `{earlier}` or reorder the required beats"
                    )),
                );
            }
            _ => latest = Some((beat, chapter)),
        }
    }
    findings
}

fn act_regressions(chapters: &[Chapter]) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut highest: Option<(u32, &Chapter)> = None;
    for chapter in chapters {
        let Some(act) = chapter.structure.as_ref().and_then(|s| s.act) else {
            continue;
        };
        match highest {
            Some((top, top_chapter)) if act < top => {
                let line = chapter.field_line("structure.act");
                findings.push(
                    chapter_finding(
                        chapter,
                        Severity::Warn,
                        ACT_REGRESSION,
                        format!(
                            "{} is in act {act} but {} already reached act {top}",
                            chapter.chapter_id, top_chapter.chapter_id
                        ),
                        line,
                    )
                    .with_evidence(Evidence::line(
                        &top_chapter.path,
                        top_chapter.field_line("structure.act"),
                    ))
                    .with_fix("check the act number or the chapter order"),
                );
            }
            Some((top, _)) if act == top => {}
            _ => highest = Some((act, chapter)),
        }
    }
    findings
}

/// Checks beat coverage, beat order, and act progression.
///
/// `chapters_dir` is cited as evidence for manuscript-level findings. With no
/// chapters every required beat is missing.
#[must_use]
pub fn analyze(chapters: &[Chapter], config: &StructureConfig, chapters_dir: &str) -> BeatAnalysis {
    let required = config.required();
    let mut first_chapter: HashMap<&str, &Chapter> = HashMap::new();
    let mut beat_count = 0;
    for chapter in chapters {
        if let Some(beat) = chapter.beat_id() {
            beat_count += 1;
            first_chapter.entry(beat).or_insert(chapter);
        }
    }

    let seen = required
        .iter()
        .filter(|beat| first_chapter.contains_key(*beat))
        .count();
    let mut analysis = BeatAnalysis {
        findings: Vec::new(),
        beat_count,
        required_beats: required.len(),
        seen_required_beats: seen,
        coverage: ratio(seen, required.len()),
        order_errors: 0,
    };

    for (position, beat) in required.iter().enumerate() {
        if first_chapter.contains_key(beat) {
            continue;
        }
        analysis.findings.push(
            Finding::new(
                Severity::Error,
                REQUIRED_BEAT_MISSING,
                format!("required beat `{beat}` is not declared by any chapter"),
                Anchor::Manuscript { position },
                Evidence::file(chapters_dir),
            )
            .with_fix(format!(
                "add `structure: {{beat_id: {beat}}}` to the chapter that carries it"
            )),
        );
    }

    let order = beat_order(&required, &first_chapter);
    analysis.order_errors = order.len();
    analysis.findings.extend(order);

    if let Some(min) = config.min_coverage
        && analysis.coverage < min
    {
        analysis.findings.push(
            Finding::new(
                Severity::Warn,
                COVERAGE_BELOW_MIN,
                format!(
                    "beat coverage {:.4} is below the minimum {min:.4}",
                    analysis.coverage
                ),
                Anchor::Manuscript {
                    position: required.len(),
                },
                Evidence::file(chapters_dir),
            )
            .with_fix("declare the missing beats or lower minCoverage"),
        );
    }

    analysis.findings.extend(act_regressions(chapters));
    analysis
}

/// Follow-up suggestions for beat codes present in `findings`.
#[must_use]
pub fn next_steps(findings: &[Finding]) -> Vec<String> {
    let has = |code: &str| findings.iter().any(|f| f.code == code);
    let mut steps = Vec::new();
    if has(REQUIRED_BEAT_MISSING) || has(COVERAGE_BELOW_MIN) {
        steps.push("Plan chapters for the missing beats, then rerun the structure check.".to_owned());
    }
    if has(BEAT_ORDER) {
        steps.push("Reorder chapters so required beats follow the expected sequence.".to_owned());
    }
    if has(ACT_REGRESSION) {
        steps.push("Fix act numbers that step backwards.".to_owned());
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(ordinal: usize, structure: &str) -> Chapter {
        let id = format!("ch{:04}", ordinal + 1);
        let source = format!("---\nchapter_id: {id}\nstructure:\n{structure}---\n");
        Chapter::parse(&format!("manuscript/chapters/{id}.md"), ordinal, &source).unwrap()
    }

    fn beat(ordinal: usize, act: u32, beat_id: &str) -> Chapter {
        chapter(ordinal, &format!("  act: {act}\n  beat_id: {beat_id}\n"))
    }

    fn config(beats: &[&str], min_coverage: Option<f64>) -> StructureConfig {
        StructureConfig {
            required_beats: beats.iter().map(|b| (*b).to_owned()).collect(),
            min_coverage,
        }
    }

    fn codes(analysis: &BeatAnalysis) -> Vec<&str> {
        analysis.findings.iter().map(|f| f.code.as_str()).collect()
    }

    #[test]
    fn test_missing_required_beats_lower_coverage() {
        // Arrange
        let chapters = vec![beat(0, 1, "setup"), beat(1, 1, "inciting_incident")];
        let config = config(&["setup", "inciting_incident", "midpoint", "climax"], None);

        // Act
        let analysis = analyze(&chapters, &config, "manuscript/chapters");

        // Assert
        assert_eq!(analysis.required_beats, 4);
        assert_eq!(analysis.seen_required_beats, 2);
        assert!((analysis.coverage - 0.5).abs() < f64::EPSILON);
        assert_eq!(
            codes(&analysis),
            vec![REQUIRED_BEAT_MISSING, REQUIRED_BEAT_MISSING]
        );
        assert!(analysis.findings[0].message.contains("midpoint"));
        assert_eq!(analysis.findings[0].evidence()[0].file, "manuscript/chapters");
    }

    #[test]
    fn test_empty_required_list_counts_as_full_coverage() {
        let chapters = vec![beat(0, 1, "setup")];

        let analysis = analyze(&chapters, &config(&[], Some(1.0)), "manuscript/chapters");

        assert!((analysis.coverage - 1.0).abs() < f64::EPSILON);
        assert!(analysis.findings.is_empty());
        assert_eq!(analysis.beat_count, 1);
    }

    #[test]
    fn test_out_of_order_beat_is_reported_once_per_beat() {
        let chapters = vec![
            beat(0, 1, "midpoint"),
            beat(1, 1, "setup"),
            beat(2, 2, "climax"),
        ];

        let analysis = analyze(
            &chapters,
            &config(&["setup", "midpoint", "climax"], None),
            "manuscript/chapters",
        );

        assert_eq!(codes(&analysis), vec![BEAT_ORDER]);
        assert_eq!(analysis.order_errors, 1);
        let finding = &analysis.findings[0];
        assert_eq!(finding.evidence()[0].file, "manuscript/chapters/ch0001.md");
        assert_eq!(finding.evidence()[0].line, Some(5));
        assert_eq!(finding.evidence()[1].file, "manuscript/chapters/ch0002.md");
    }

    #[test]
    fn test_coverage_below_minimum_warns() {
        let chapters = vec![beat(0, 1, "setup")];

        let analysis = analyze(
            &chapters,
            &config(&["setup", "climax"], Some(0.75)),
            "manuscript/chapters",
        );

        assert_eq!(
            codes(&analysis),
            vec![REQUIRED_BEAT_MISSING, COVERAGE_BELOW_MIN]
        );
        assert!(analysis.findings[1].message.contains("0.5000"));
    }

    #[test]
    fn test_act_regression_is_flagged_against_highest_act() {
        let chapters = vec![
            beat(0, 1, "setup"),
            beat(1, 2, "midpoint"),
            beat(2, 2, "twist"),
            beat(3, 1, "flashback"),
        ];

        let analysis = analyze(&chapters, &config(&[], None), "manuscript/chapters");

        assert_eq!(codes(&analysis), vec![ACT_REGRESSION]);
        assert_eq!(analysis.findings[0].evidence()[0].line, Some(4));
        assert_eq!(
            analysis.findings[0].evidence()[1].file,
            "manuscript/chapters/ch0002.md"
        );
    }

    #[test]
    fn test_empty_chapter_set_misses_every_required_beat() {
        let analysis = analyze(&[], &StructureConfig::default(), "manuscript/chapters");

        assert_eq!(analysis.findings.len(), 7);
        assert!(analysis.findings.iter().all(|f| f.code == REQUIRED_BEAT_MISSING));
        assert_eq!(analysis.seen_required_beats, 0);
        assert!(analysis.coverage.abs() < f64::EPSILON);
    }
}
