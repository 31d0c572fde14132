//! Plot thread continuity.
//!
//! Threads are opened, advanced, and closed by chapter headers. Run over
//! the whole manuscript only.

use novel_core::finding::{Anchor, Evidence, Finding, Severity};
use novel_manuscript::domain::chapter::Chapter;

/// A chapter advances or closes a thread that is not open.
pub const THREAD_NOT_OPEN: &str = "STR_THREAD_NOT_OPEN";
/// A thread is still open after the last chapter.
pub const THREAD_UNRESOLVED: &str = "STR_THREAD_UNRESOLVED";

/// Thread findings and counters.
#[derive(Debug, Clone, Default)]
pub struct ThreadAnalysis {
    /// Unsorted findings.
    pub findings: Vec<Finding>,
    /// Threads still open at the end.
    pub open_threads: usize,
}

fn not_open(chapter: &Chapter, thread: &str, verb: &str, field: &str) -> Finding {
    let line = chapter.field_line(field);
    Finding::new(
        Severity::Warn,
        THREAD_NOT_OPEN,
        format!(
            "{} {verb} thread `{thread}`, which is not open at that point",
            chapter.chapter_id
        ),
        Anchor::Chapter {
            ordinal: chapter.ordinal,
            position: line,
        },
        Evidence::line(&chapter.path, line),
    )
    .with_fix(format!(
        "open `{thread}` in an earlier chapter's threads_opened, or fix the id"
    ))
}

fn position_of(open: &[(&str, &Chapter)], thread: &str) -> Option<usize> {
    open.iter().position(|(t, _)| *t == thread)
}

/// Follows threads through `chapters` in order.
///
/// Manuscript-level findings take anchor positions from `first_position`
/// upward.
#[must_use]
pub fn analyze(chapters: &[Chapter], first_position: usize) -> ThreadAnalysis {
    let mut findings = Vec::new();
    // Open threads in opening order with the chapter that opened them.
    let mut open: Vec<(&str, &Chapter)> = Vec::new();

    for chapter in chapters {
        for thread in &chapter.threads.opened {
            if position_of(&open, thread).is_none() {
                open.push((thread.as_str(), chapter));
            }
        }
        for thread in &chapter.threads.advanced {
            if position_of(&open, thread).is_none() {
                findings.push(not_open(chapter, thread, "advances", "threads_advanced"));
            }
        }
        for thread in &chapter.threads.closed {
            match position_of(&open, thread) {
                Some(index) => {
                    open.remove(index);
                }
                None => findings.push(not_open(chapter, thread, "closes", "threads_closed")),
            }
        }
    }

    for (offset, (thread, opener)) in open.iter().enumerate() {
        findings.push(
            Finding::new(
                Severity::Info,
                THREAD_UNRESOLVED,
                format!(
                    "thread `{thread}` opened in {} is never closed",
                    opener.chapter_id
                ),
                Anchor::Manuscript {
                    position: first_position + offset,
                },
                Evidence::line(&opener.path, opener.field_line("threads_opened")),
            )
            .with_fix(format!("close `{thread}` in a later chapter's threads_closed")),
        );
    }

    ThreadAnalysis {
        findings,
        open_threads: open.len(),
    }
}

/// Follow-up suggestions for thread codes present in `findings`.
#[must_use]
pub fn next_steps(findings: &[Finding]) -> Vec<String> {
    let has = |code: &str| findings.iter().any(|f| f.code == code);
    let mut steps = Vec::new();
    if has(THREAD_NOT_OPEN) {
        steps.push("Check thread ids in threads_advanced and threads_closed.".to_owned());
    }
    if has(THREAD_UNRESOLVED) {
        steps.push("Resolve or deliberately leave open the threads listed as unresolved.".to_owned());
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(ordinal: usize, threads: &str) -> Chapter {
        let id = format!("ch{:04}", ordinal + 1);
        let source = format!("---\nchapter_id: {id}\n{threads}---\n");
        Chapter::parse(&format!("manuscript/chapters/{id}.md"), ordinal, &source).unwrap()
    }

    #[test]
    fn test_opened_then_closed_thread_is_clean() {
        let chapters = vec![
            chapter(0, "threads_opened: [key]\n"),
            chapter(1, "threads_advanced: [key]\n"),
            chapter(2, "threads_closed: [key]\n"),
        ];

        let analysis = analyze(&chapters, 0);

        assert!(analysis.findings.is_empty());
        assert_eq!(analysis.open_threads, 0);
    }

    #[test]
    fn test_advancing_unknown_thread_warns_at_its_line() {
        // Arrange
        let chapters = vec![chapter(0, "title: t\nthreads_advanced: [ghost]\n")];

        // Act
        let analysis = analyze(&chapters, 0);

        // Assert
        assert_eq!(analysis.findings.len(), 1);
        let finding = &analysis.findings[0];
        assert_eq!(finding.code, THREAD_NOT_OPEN);
        assert_eq!(finding.evidence()[0].line, Some(4));
        assert!(finding.message.contains("advances thread `ghost`"));
    }

    #[test]
    fn test_closing_twice_warns_on_second_close() {
        let chapters = vec![
            chapter(0, "threads_opened: [key]\nthreads_closed: [key]\n"),
            chapter(1, "threads_closed: [key]\n"),
        ];

        let analysis = analyze(&chapters, 0);

        assert_eq!(analysis.findings.len(), 1);
        assert_eq!(analysis.findings[0].code, THREAD_NOT_OPEN);
        assert_eq!(
            analysis.findings[0].evidence()[0].file,
            "manuscript/chapters/ch0002.md"
        );
    }

    #[test]
    fn test_unclosed_threads_are_info_in_opening_order() {
        let chapters = vec![
            chapter(0, "threads_opened: [key, map]\n"),
            chapter(1, "threads_opened: [debt]\nthreads_closed: [map]\n"),
        ];

        let analysis = analyze(&chapters, 5);

        assert_eq!(analysis.open_threads, 2);
        let messages: Vec<&str> = analysis.findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "thread `key` opened in ch0001 is never closed",
                "thread `debt` opened in ch0002 is never closed",
            ]
        );
        assert!(analysis.findings.iter().all(|f| f.severity == Severity::Info));
        assert_eq!(
            analysis.findings[1].anchor(),
            Anchor::Manuscript { position: 6 }
        );
    }
}
