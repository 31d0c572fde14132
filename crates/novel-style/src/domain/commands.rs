//! Commands for the Style Consistency analyzer.

use novel_core::command::Command;
use novel_manuscript::domain::layout::ManuscriptLayout;
use novel_manuscript::domain::scope::Scope;
use uuid::Uuid;

use super::config::StyleConfig;

/// Command to check lexicon and catchphrase usage.
#[derive(Debug, Clone)]
pub struct CheckStyle {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Where the manuscript lives.
    pub layout: ManuscriptLayout,
    /// Which chapters to analyze.
    pub scope: Scope,
    /// Whether to write `style-report.md`.
    pub write_report: bool,
    /// Rule knobs.
    pub config: StyleConfig,
}

impl Command for CheckStyle {
    fn command_type(&self) -> &'static str {
        "style.check"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
