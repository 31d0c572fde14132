//! Lexicon avoidance.

use std::ops::Range;

use novel_core::finding::{Anchor, Evidence, Finding, Severity};
use novel_manuscript::domain::chapter::Chapter;
use novel_manuscript::domain::prose::prose_ranges;
use novel_manuscript::domain::scope::chapter_repro;
use novel_manuscript::domain::text::{EXCERPT_RADIUS, excerpt, find_all, line_of};

/// An avoid-word occurs in prose.
pub const AVOID_WORD: &str = "STYLE_AVOID_WORD";

/// Byte offsets in `body` of every occurrence of `needle` inside `ranges`.
pub(crate) fn occurrences(body: &str, ranges: &[Range<usize>], needle: &str) -> Vec<usize> {
    ranges
        .iter()
        .flat_map(|range| {
            find_all(&body[range.clone()], needle)
                .into_iter()
                .map(move |offset| range.start + offset)
        })
        .collect()
}

/// One finding per avoid-word occurrence, in text order per chapter.
///
/// Overlapping matches count once: the longest match at the earliest offset
/// wins and hits inside it are dropped.
#[must_use]
pub fn analyze(chapters: &[Chapter], avoid_words: &[&str]) -> Vec<Finding> {
    let mut findings = Vec::new();
    if avoid_words.is_empty() {
        return findings;
    }

    for chapter in chapters {
        let body = chapter.body.as_str();
        let ranges = prose_ranges(body);
        let mut hits: Vec<(usize, &str)> = avoid_words
            .iter()
            .flat_map(|word| {
                occurrences(body, &ranges, word)
                    .into_iter()
                    .map(move |offset| (offset, *word))
            })
            .collect();
        hits.sort_by(|(a, a_word), (b, b_word)| a.cmp(b).then(b_word.len().cmp(&a_word.len())));

        let mut covered_until = 0;
        for (offset, word) in hits {
            if offset < covered_until {
                continue;
            }
            let end = offset + word.len();
            covered_until = end;
            let line = line_of(body, offset, chapter.body_start_line);
            findings.push(
                Finding::new(
                    Severity::Warn,
                    AVOID_WORD,
                    format!("avoid-word `{word}` used in {}", chapter.chapter_id),
                    Anchor::Chapter {
                        ordinal: chapter.ordinal,
                        position: line,
                    },
                    Evidence::line(&chapter.path, line)
                        .with_excerpt(excerpt(body, offset, end, EXCERPT_RADIUS)),
                )
                .with_fix(format!("rephrase without `{word}`"))
                .with_repro(chapter_repro("style", &chapter.chapter_id)),
            );
        }
    }
    findings
}
