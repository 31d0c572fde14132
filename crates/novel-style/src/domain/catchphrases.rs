//! Catchphrase usage.

use std::collections::BTreeMap;

use novel_core::diagnostic::{Diagnostic, DiagnosticKind};
use novel_core::finding::{Anchor, Evidence, Finding, Severity};
use novel_manuscript::domain::chapter::Chapter;
use novel_manuscript::domain::character::Character;
use novel_manuscript::domain::prose::prose_ranges;
use novel_manuscript::domain::text::line_of;

use super::config::StyleConfig;
use super::lexicon::occurrences;

/// Usage count for one character catchphrase.
pub const CATCHPHRASE_STATS: &str = "STYLE_CATCHPHRASE_STATS";

/// Catchphrase findings, counters, and unresolved references.
#[derive(Debug, Clone, Default)]
pub struct CatchphraseAnalysis {
    /// Findings in character, then catchphrase, order.
    pub findings: Vec<Finding>,
    /// Referenced characters that resolved.
    pub character_count: usize,
    /// Catchphrases evaluated.
    pub catchphrases_tracked: usize,
    /// One `unresolved_reference` per chapter reference to an unknown id.
    pub diagnostics: Vec<Diagnostic>,
}

/// Character ids in first-reference order, with the chapters that
/// reference each.
fn references(chapters: &[Chapter]) -> Vec<(&str, Vec<&Chapter>)> {
    let mut refs: Vec<(&str, Vec<&Chapter>)> = Vec::new();
    for chapter in chapters {
        for id in chapter.characters.iter().map(|id| id.trim()) {
            if id.is_empty() {
                continue;
            }
            match refs.iter_mut().find(|(known, _)| *known == id) {
                Some((_, list)) => {
                    if !list.iter().any(|c| c.ordinal == chapter.ordinal) {
                        list.push(chapter);
                    }
                }
                None => refs.push((id, vec![chapter])),
            }
        }
    }
    refs
}

fn usage(chapters: &[&Chapter], phrase: &str) -> (usize, Option<Evidence>) {
    let mut count = 0;
    let mut first = None;
    for chapter in chapters {
        let body = chapter.body.as_str();
        let hits = occurrences(body, &prose_ranges(body), phrase);
        if first.is_none() {
            first = hits.first().map(|&offset| {
                Evidence::line(&chapter.path, line_of(body, offset, chapter.body_start_line))
            });
        }
        count += hits.len();
    }
    (count, first)
}

/// Counts catchphrase uses for every character referenced by `chapters`.
///
/// Counts cover only the in-scope chapters that reference the character.
#[must_use]
pub fn analyze(
    chapters: &[Chapter],
    characters: &BTreeMap<String, Character>,
    config: &StyleConfig,
) -> CatchphraseAnalysis {
    let mut analysis = CatchphraseAnalysis::default();

    for (id, referencing) in references(chapters) {
        let Some(character) = characters.get(id) else {
            for chapter in referencing {
                analysis.diagnostics.push(
                    Diagnostic::new(
                        DiagnosticKind::UnresolvedReference,
                        format!("{} references unknown character `{id}`", chapter.chapter_id),
                    )
                    .in_file(chapter.path.clone(), Some(chapter.field_line("characters"))),
                );
            }
            continue;
        };
        analysis.character_count += 1;

        for phrase in &character.catchphrases {
            analysis.catchphrases_tracked += 1;
            let (count, first_use) = usage(&referencing, phrase);
            if count == 0 && !config.catchphrase_report_missing {
                continue;
            }

            let overused = count > config.catchphrase_max_count;
            let (severity, message) = if overused {
                (
                    Severity::Warn,
                    format!(
                        "{} ({}) says \"{phrase}\" {count} times, above the limit of {}",
                        character.name, character.id, config.catchphrase_max_count
                    ),
                )
            } else {
                (
                    Severity::Info,
                    format!(
                        "{} ({}) says \"{phrase}\" {count} times in {} chapter(s)",
                        character.name,
                        character.id,
                        referencing.len()
                    ),
                )
            };

            let position = analysis.findings.len();
            let mut finding = Finding::new(
                severity,
                CATCHPHRASE_STATS,
                message,
                Anchor::Manuscript { position },
                Evidence::line(&character.path, character.catchphrases_line)
                    .with_excerpt(phrase.as_str()),
            );
            if let Some(evidence) = first_use {
                finding = finding.with_evidence(evidence);
            }
            if overused {
                finding = finding.with_fix("vary the voice instead of repeating the catchphrase");
            } else if count == 0 {
                finding = finding.with_fix("use the catchphrase or drop it from the character file");
            }
            analysis.findings.push(finding);
        }
    }

    analysis
}
