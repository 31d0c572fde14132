//! Text helpers for locating and quoting matches in prose.

/// Excerpt radius, in characters, on each side of a match.
pub const EXCERPT_RADIUS: usize = 24;

/// Byte offsets of every non-overlapping occurrence of `needle`.
///
/// ASCII needles match case-insensitively; anything else matches exactly.
#[must_use]
pub fn find_all(haystack: &str, needle: &str) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }
    if needle.is_ascii() {
        // ASCII lowercasing keeps byte offsets intact.
        let folded = haystack.to_ascii_lowercase();
        let needle = needle.to_ascii_lowercase();
        folded.match_indices(&needle).map(|(i, _)| i).collect()
    } else {
        haystack.match_indices(needle).map(|(i, _)| i).collect()
    }
}

/// 1-based line of byte `offset` in `text`, where `text` starts at
/// `first_line`.
#[must_use]
pub fn line_of(text: &str, offset: usize, first_line: usize) -> usize {
    first_line + text[..offset].matches('\n').count()
}

/// A single-line excerpt around `text[start..end]`.
///
/// Keeps at most `radius` characters on each side, stays within the
/// match's line, and marks truncation with `...`.
#[must_use]
pub fn excerpt(text: &str, start: usize, end: usize, radius: usize) -> String {
    let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = text[end..].find('\n').map_or(text.len(), |i| end + i);

    let before = &text[line_start..start];
    let before_chars = before.chars().count();
    let before = if before_chars > radius {
        let skip = before.char_indices().nth(before_chars - radius).map_or(0, |(i, _)| i);
        format!("...{}", &before[skip..])
    } else {
        before.to_owned()
    };

    let after = &text[end..line_end];
    let after = match after.char_indices().nth(radius) {
        Some((cut, _)) => format!("{}...", &after[..cut]),
        None => after.to_owned(),
    };

    format!("{before}{}{after}", &text[start..end])
        .trim()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_all_is_case_insensitive_for_ascii() {
        assert_eq!(find_all("Very good, very VERY.", "very"), vec![0, 11, 16]);
    }

    #[test]
    fn test_find_all_matches_cjk_exactly() {
        let text = "他突然站起来，突然又坐下。";

        let hits = find_all(text, "突然");

        assert_eq!(hits.len(), 2);
        assert_eq!(&text[hits[1]..hits[1] + "突然".len()], "突然");
    }

    #[test]
    fn test_find_all_with_empty_needle_finds_nothing() {
        assert!(find_all("anything", "").is_empty());
    }

    #[test]
    fn test_line_of_counts_newlines_before_offset() {
        let text = "one\ntwo\nthree";

        assert_eq!(line_of(text, 0, 10), 10);
        assert_eq!(line_of(text, text.find("three").unwrap(), 10), 12);
    }

    #[test]
    fn test_excerpt_stays_on_the_matching_line() {
        let text = "first line\nShe was very tired.\nlast line";
        let start = text.find("very").unwrap();

        assert_eq!(excerpt(text, start, start + 4, 24), "She was very tired.");
    }

    #[test]
    fn test_excerpt_truncates_long_context() {
        let text = "abcdefghij MATCH klmnopqrst";
        let start = text.find("MATCH").unwrap();

        assert_eq!(excerpt(text, start, start + 5, 3), "...ij MATCH kl...");
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        let text = "一二三四五突然六七八九十";
        let start = text.find("突然").unwrap();

        assert_eq!(excerpt(text, start, start + "突然".len(), 2), "...四五突然六七...");
    }
}
