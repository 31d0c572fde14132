//! Style check counters.

use novel_core::stats::{ReportStats, StatValue};
use serde::Serialize;

/// Counters for one style check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleStats {
    /// In-scope chapters.
    pub chapter_count: usize,
    /// Referenced characters that resolved to a character file.
    pub character_count: usize,
    /// `STYLE_AVOID_WORD` findings.
    pub avoid_word_hits: usize,
    /// Character catchphrases evaluated.
    pub catchphrases_tracked: usize,
    /// Warn findings.
    pub warns: usize,
    /// Info findings.
    pub infos: usize,
    /// Wall time of the check.
    pub duration_ms: u64,
}

impl ReportStats for StyleStats {
    fn summary(&self) -> Vec<(&'static str, StatValue)> {
        vec![
            ("chapterCount", StatValue::Count(self.chapter_count)),
            ("characterCount", StatValue::Count(self.character_count)),
            ("avoidWordHits", StatValue::Count(self.avoid_word_hits)),
            ("catchphrasesTracked", StatValue::Count(self.catchphrases_tracked)),
            ("warns", StatValue::Count(self.warns)),
            ("infos", StatValue::Count(self.infos)),
            ("durationMs", StatValue::Millis(self.duration_ms)),
        ]
    }
}
