//! Commands for the Scene Coherence analyzer.

use novel_core::command::Command;
use novel_manuscript::domain::layout::ManuscriptLayout;
use novel_manuscript::domain::scope::Scope;
use uuid::Uuid;

use super::config::SceneConfig;

/// Command to check scene coherence.
#[derive(Debug, Clone)]
pub struct CheckScenes {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Where the manuscript lives.
    pub layout: ManuscriptLayout,
    /// Which chapters to analyze.
    pub scope: Scope,
    /// Whether to write `scene-report.md`.
    pub write_report: bool,
    /// Rule knobs.
    pub config: SceneConfig,
}

impl Command for CheckScenes {
    fn command_type(&self) -> &'static str {
        "scene.check"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
