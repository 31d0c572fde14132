//! Scene check counters.

use novel_core::stats::{ReportStats, StatValue};
use serde::Serialize;

/// Counters for one scene check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneStats {
    /// In-scope chapters.
    pub chapter_count: usize,
    /// Scenes examined.
    pub scene_count: usize,
    /// Scenes with at least one error.
    pub invalid_count: usize,
    /// Error findings.
    pub errors: usize,
    /// Warn findings.
    pub warns: usize,
    /// Info findings.
    pub infos: usize,
    /// Wall time of the check.
    pub duration_ms: u64,
}

impl ReportStats for SceneStats {
    fn summary(&self) -> Vec<(&'static str, StatValue)> {
        vec![
            ("chapterCount", StatValue::Count(self.chapter_count)),
            ("sceneCount", StatValue::Count(self.scene_count)),
            ("invalidCount", StatValue::Count(self.invalid_count)),
            ("errors", StatValue::Count(self.errors)),
            ("warns", StatValue::Count(self.warns)),
            ("infos", StatValue::Count(self.infos)),
            ("durationMs", StatValue::Millis(self.duration_ms)),
        ]
    }
}
