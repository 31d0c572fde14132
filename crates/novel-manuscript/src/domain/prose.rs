//! Prose extraction from markdown bodies.

use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Byte ranges of `body` that hold prose text.
///
/// Code blocks, inline code, and raw HTML are excluded. Adjacent text runs
/// that the markdown parser splits are merged back into one range so matches
/// are not cut at run boundaries.
#[must_use]
pub fn prose_ranges(body: &str) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = Vec::new();
    let mut code_depth = 0usize;

    for (event, range) in Parser::new_ext(body, Options::empty()).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(_)) => code_depth += 1,
            Event::End(TagEnd::CodeBlock) => code_depth = code_depth.saturating_sub(1),
            Event::Text(_) if code_depth == 0 => match ranges.last_mut() {
                Some(last) if last.end == range.start => last.end = range.end,
                _ => ranges.push(range),
            },
            _ => {}
        }
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slices(body: &str) -> Vec<&str> {
        prose_ranges(body).into_iter().map(|r| &body[r]).collect()
    }

    #[test]
    fn test_plain_paragraphs_are_prose() {
        let body = "First paragraph.\n\nSecond paragraph.\n";

        assert_eq!(slices(body), vec!["First paragraph.", "Second paragraph."]);
    }

    #[test]
    fn test_code_is_not_prose() {
        let body = "Before `very inline` after.\n\n```\nvery fenced\n```\n\nEnd.\n";

        let joined = slices(body).join("|");

        assert!(!joined.contains("very"));
        assert!(joined.contains("Before"));
        assert!(joined.contains("End."));
    }

    #[test]
    fn test_emphasis_text_is_still_prose() {
        let body = "She was *very* tired.\n";

        assert!(slices(body).iter().any(|s| s.contains("very")));
    }
}
