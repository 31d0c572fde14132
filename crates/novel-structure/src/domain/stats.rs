//! Structure check counters.

use novel_core::stats::{ReportStats, StatValue};
use serde::Serialize;

/// Counters for one structure check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureStats {
    /// In-scope chapters.
    pub chapter_count: usize,
    /// Chapters that declare a beat.
    pub beat_count: usize,
    /// Distinct required beats.
    pub required_beats: usize,
    /// Required beats found in scope.
    pub seen_required_beats: usize,
    /// `seen_required_beats / required_beats`, or 1 when nothing is required.
    pub coverage: f64,
    /// Required beats found out of order.
    pub order_errors: usize,
    /// Threads still open after the last chapter.
    pub open_threads: usize,
    /// Error findings.
    pub errors: usize,
    /// Warn findings.
    pub warns: usize,
    /// Info findings.
    pub infos: usize,
    /// Wall time of the check.
    pub duration_ms: u64,
}

impl ReportStats for StructureStats {
    fn summary(&self) -> Vec<(&'static str, StatValue)> {
        vec![
            ("chapterCount", StatValue::Count(self.chapter_count)),
            ("beatCount", StatValue::Count(self.beat_count)),
            ("requiredBeats", StatValue::Count(self.required_beats)),
            ("seenRequiredBeats", StatValue::Count(self.seen_required_beats)),
            ("coverage", StatValue::Ratio(self.coverage)),
            ("orderErrors", StatValue::Count(self.order_errors)),
            ("openThreads", StatValue::Count(self.open_threads)),
            ("errors", StatValue::Count(self.errors)),
            ("warns", StatValue::Count(self.warns)),
            ("infos", StatValue::Count(self.infos)),
            ("durationMs", StatValue::Millis(self.duration_ms)),
        ]
    }
}
