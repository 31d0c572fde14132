//! The payload returned by every check invocation.

use serde::Serialize;

use crate::diagnostic::Diagnostic;
use crate::finding::Finding;

/// Schema version of [`CheckResult`].
pub const RESULT_VERSION: u32 = 1;

/// Outcome of one check invocation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult<S> {
    /// Result schema version, always [`RESULT_VERSION`].
    pub version: u32,
    /// Root-relative path of the written report, if one was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<String>,
    /// Analyzer-specific counters.
    pub stats: S,
    /// Findings in report order.
    pub findings: Vec<Finding>,
    /// Follow-up suggestions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<Vec<String>>,
    /// Engine-level notices.
    pub diagnostics: Vec<Diagnostic>,
}

impl<S> CheckResult<S> {
    /// Returns true when any finding has the given code.
    #[must_use]
    pub fn has_code(&self, code: &str) -> bool {
        self.findings.iter().any(|f| f.code == code)
    }

    /// Number of findings with the given code.
    #[must_use]
    pub fn count_code(&self, code: &str) -> usize {
        self.findings.iter().filter(|f| f.code == code).count()
    }
}
