//! Commands for the Structural Coverage analyzer.

use novel_core::command::Command;
use novel_manuscript::domain::layout::ManuscriptLayout;
use novel_manuscript::domain::scope::Scope;
use uuid::Uuid;

use super::config::StructureConfig;

/// Command to check beat coverage and thread continuity.
#[derive(Debug, Clone)]
pub struct CheckStructure {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Where the manuscript lives.
    pub layout: ManuscriptLayout,
    /// Which chapters to analyze.
    pub scope: Scope,
    /// Whether to write `structure-report.md`.
    pub write_report: bool,
    /// Rule knobs.
    pub config: StructureConfig,
}

impl Command for CheckStructure {
    fn command_type(&self) -> &'static str {
        "structure.check"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
