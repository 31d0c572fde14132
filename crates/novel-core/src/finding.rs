//! Findings: manuscript defects reported by the analyzers.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// How serious a finding is.
///
/// Variants are declared from most to least severe; the derived ordering is
/// the tie-breaker used when sorting findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A structural defect.
    Error,
    /// A likely problem worth a look.
    Warn,
    /// An observation.
    Info,
}

impl Severity {
    /// Lowercase name used in reports and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pointer into the manuscript substantiating a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evidence {
    /// Root-relative path with forward slashes.
    pub file: String,
    /// 1-based line, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Short excerpt of the cited text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

impl Evidence {
    /// Evidence citing a whole file.
    #[must_use]
    pub fn file(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: None,
            excerpt: None,
        }
    }

    /// Evidence citing a line of a file.
    #[must_use]
    pub fn line(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line: Some(line),
            excerpt: None,
        }
    }

    /// Attaches an excerpt.
    #[must_use]
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    /// `file[:line]` as printed in reports.
    #[must_use]
    pub fn location(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{line}", self.file),
            None => self.file.clone(),
        }
    }
}

/// Where a finding sits in the manuscript, used only for ordering.
///
/// Chapter-level findings sort before manuscript-level ones; within a
/// chapter, by position (usually the source line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Anchor {
    /// Inside the chapter at `ordinal` in load order.
    Chapter {
        /// Chapter position in load order.
        ordinal: usize,
        /// Position inside the chapter.
        position: usize,
    },
    /// About the manuscript as a whole.
    Manuscript {
        /// Emission position among manuscript-level findings.
        position: usize,
    },
}

/// One reported manuscript defect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Severity.
    pub severity: Severity,
    /// Stable machine-readable code (`SCN_`, `STR_`, or `STYLE_` prefixed).
    pub code: String,
    /// Human-readable message.
    pub message: String,
    evidence: Vec<Evidence>,
    /// Suggested remedy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,
    /// How to reproduce or inspect the problem.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repro: Option<String>,
    #[serde(skip)]
    anchor: Anchor,
}

impl Finding {
    /// Creates a finding with its primary evidence.
    #[must_use]
    pub fn new(
        severity: Severity,
        code: &str,
        message: impl Into<String>,
        anchor: Anchor,
        evidence: Evidence,
    ) -> Self {
        Self {
            severity,
            code: code.to_owned(),
            message: message.into(),
            evidence: vec![evidence],
            suggested_fix: None,
            repro: None,
            anchor,
        }
    }

    /// Appends further evidence after the primary entry.
    #[must_use]
    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence.push(evidence);
        self
    }

    /// Attaches a suggested fix.
    #[must_use]
    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.suggested_fix = Some(fix.into());
        self
    }

    /// Attaches a reproduction hint.
    #[must_use]
    pub fn with_repro(mut self, repro: impl Into<String>) -> Self {
        self.repro = Some(repro.into());
        self
    }

    /// The ordering anchor.
    #[must_use]
    pub const fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Non-empty, ordered evidence list.
    #[must_use]
    pub fn evidence(&self) -> &[Evidence] {
        &self.evidence
    }

    /// The first evidence entry.
    #[must_use]
    pub fn primary_evidence(&self) -> &Evidence {
        // `new` seeds one entry and entries are only ever appended.
        &self.evidence[0]
    }
}

fn compare(a: &Finding, b: &Finding) -> Ordering {
    a.anchor
        .cmp(&b.anchor)
        .then_with(|| a.severity.cmp(&b.severity))
}

/// Sorts findings by chapter, then position, then severity.
///
/// The sort is stable, so findings with equal keys keep emission order.
pub fn sort_findings(findings: &mut [Finding]) {
    findings.sort_by(compare);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(severity: Severity, code: &str, anchor: Anchor) -> Finding {
        Finding::new(
            severity,
            code,
            "message",
            anchor,
            Evidence::file("manuscript/chapters/ch0001.md"),
        )
    }

    #[test]
    fn test_sort_orders_by_chapter_then_position_then_severity() {
        // Arrange
        let mut findings = vec![
            finding(Severity::Info, "C", Anchor::Manuscript { position: 0 }),
            finding(Severity::Warn, "B", Anchor::Chapter { ordinal: 1, position: 3 }),
            finding(Severity::Warn, "A2", Anchor::Chapter { ordinal: 0, position: 7 }),
            finding(Severity::Error, "A1", Anchor::Chapter { ordinal: 0, position: 7 }),
            finding(Severity::Error, "A0", Anchor::Chapter { ordinal: 0, position: 2 }),
        ];

        // Act
        sort_findings(&mut findings);

        // Assert
        let codes: Vec<&str> = findings.iter().map(|f| f.code.as_str()).collect();
        assert_eq!(codes, vec!["A0", "A1", "A2", "B", "C"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let anchor = Anchor::Chapter { ordinal: 0, position: 1 };
        let mut findings = vec![
            finding(Severity::Error, "FIRST", anchor),
            finding(Severity::Error, "SECOND", anchor),
        ];

        sort_findings(&mut findings);

        assert_eq!(findings[0].code, "FIRST");
        assert_eq!(findings[1].code, "SECOND");
    }

    #[test]
    fn test_finding_serializes_camel_case_and_omits_empty_options() {
        let f = finding(Severity::Warn, "SCN_NO_OUTCOME_CHANGE", Anchor::Manuscript { position: 0 })
            .with_fix("give the scene a new outcome");

        let json = serde_json::to_value(&f).unwrap();

        assert_eq!(json["severity"], "warn");
        assert_eq!(json["suggestedFix"], "give the scene a new outcome");
        assert!(json.get("repro").is_none());
        assert!(json.get("anchor").is_none());
        assert!(json["evidence"][0].get("line").is_none());
    }

    #[test]
    fn test_primary_evidence_stays_first_as_evidence_is_added() {
        let f = finding(Severity::Warn, "STR_BEAT_ORDER", Anchor::Manuscript { position: 0 })
            .with_evidence(Evidence::line("manuscript/chapters/ch0002.md", 5));

        assert_eq!(f.evidence().len(), 2);
        assert_eq!(f.primary_evidence().file, "manuscript/chapters/ch0001.md");
        assert_eq!(f.evidence()[1].location(), "manuscript/chapters/ch0002.md:5");
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["evidence"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_evidence_location_includes_line_when_known() {
        assert_eq!(Evidence::line("a.md", 4).location(), "a.md:4");
        assert_eq!(Evidence::file("a.md").location(), "a.md");
    }
}
