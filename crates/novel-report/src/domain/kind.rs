//! Report kinds.

use std::fmt;

/// Which analyzer a report belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Scene coherence.
    Scene,
    /// Structural coverage.
    Structure,
    /// Style consistency.
    Style,
}

impl ReportKind {
    /// Lowercase kind name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scene => "scene",
            Self::Structure => "structure",
            Self::Style => "style",
        }
    }

    /// Report heading, e.g. `SCENE REPORT`.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Scene => "SCENE REPORT",
            Self::Structure => "STRUCTURE REPORT",
            Self::Style => "STYLE REPORT",
        }
    }

    /// File name the report is written to.
    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}-report.md", self.as_str())
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
