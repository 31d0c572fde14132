//! Summary statistics shared by every analyzer.

use std::fmt;

use crate::finding::{Finding, Severity};

/// One value in a report summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatValue {
    /// A plain counter.
    Count(usize),
    /// A fraction in `[0, 1]`.
    Ratio(f64),
    /// A duration in milliseconds.
    Millis(u64),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Ratio(r) => write!(f, "{r:.4}"),
            Self::Millis(ms) => write!(f, "{ms}"),
        }
    }
}

/// Statistics that can be rendered as a report summary.
pub trait ReportStats {
    /// Stat fields in their declared order, keyed by their JSON name.
    fn summary(&self) -> Vec<(&'static str, StatValue)>;
}

/// Finding totals by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityTally {
    /// Error-severity findings.
    pub errors: usize,
    /// Warn-severity findings.
    pub warns: usize,
    /// Info-severity findings.
    pub infos: usize,
}

impl SeverityTally {
    /// Counts findings by severity.
    #[must_use]
    pub fn of(findings: &[Finding]) -> Self {
        findings
            .iter()
            .fold(Self::default(), |mut tally, finding| {
                match finding.severity {
                    Severity::Error => tally.errors += 1,
                    Severity::Warn => tally.warns += 1,
                    Severity::Info => tally.infos += 1,
                }
                tally
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::{Anchor, Evidence};

    #[test]
    fn test_tally_counts_each_severity() {
        let make = |severity| {
            Finding::new(
                severity,
                "X",
                "m",
                Anchor::Manuscript { position: 0 },
                Evidence::file("f.md"),
            )
        };
        let findings = vec![
            make(Severity::Error),
            make(Severity::Warn),
            make(Severity::Warn),
            make(Severity::Info),
        ];

        let tally = SeverityTally::of(&findings);

        assert_eq!(
            tally,
            SeverityTally {
                errors: 1,
                warns: 2,
                infos: 1
            }
        );
    }

    #[test]
    fn test_ratio_renders_with_fixed_precision() {
        assert_eq!(StatValue::Ratio(2.0 / 3.0).to_string(), "0.6667");
        assert_eq!(StatValue::Ratio(1.0).to_string(), "1.0000");
        assert_eq!(StatValue::Count(12).to_string(), "12");
    }
}
