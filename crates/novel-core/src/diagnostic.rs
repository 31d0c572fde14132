//! Engine-level notices.
//!
//! Diagnostics describe problems with the *run* (unreadable files, scope
//! misses, unwritable reports), never problems with the manuscript content.
//! Content problems are [`Finding`](crate::finding::Finding)s.

use std::fmt;

use serde::Serialize;

use crate::error::EngineError;

/// Category of an engine notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A document header was absent or undecodable; the document was skipped.
    ParseError,
    /// A document could not be read from disk.
    ReadError,
    /// Two documents declared the same identity; the later one was skipped.
    DuplicateId,
    /// An expected directory does not exist.
    MissingDirectory,
    /// The requested scope matched no loaded chapter.
    ScopeNotFound,
    /// A chapter references a record that was not loaded.
    UnresolvedReference,
    /// The report file could not be written.
    ReportWriteFailed,
}

impl DiagnosticKind {
    /// Snake-case name, identical to the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ParseError => "parse_error",
            Self::ReadError => "read_error",
            Self::DuplicateId => "duplicate_id",
            Self::MissingDirectory => "missing_directory",
            Self::ScopeNotFound => "scope_not_found",
            Self::UnresolvedReference => "unresolved_reference",
            Self::ReportWriteFailed => "report_write_failed",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One engine-level notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Notice category.
    pub kind: DiagnosticKind,
    /// Human-readable description.
    pub message: String,
    /// Root-relative file the notice concerns, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// 1-based line within `file`, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Diagnostic {
    /// Creates a notice that is not tied to a file.
    #[must_use]
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            file: None,
            line: None,
        }
    }

    /// Attaches the file (and optionally line) the notice concerns.
    #[must_use]
    pub fn in_file(mut self, file: impl Into<String>, line: Option<usize>) -> Self {
        self.file = Some(file.into());
        self.line = line;
        self
    }
}

/// `InvalidArgument` has no notice kind of its own and maps to a fileless
/// `parse_error`.
impl From<&EngineError> for Diagnostic {
    fn from(err: &EngineError) -> Self {
        let message = err.to_string();
        match err {
            EngineError::Io { path, .. } => {
                Self::new(DiagnosticKind::ReadError, message).in_file(path.clone(), None)
            }
            EngineError::MissingHeader { path } | EngineError::UnsupportedSchema { path, .. } => {
                Self::new(DiagnosticKind::ParseError, message).in_file(path.clone(), Some(1))
            }
            EngineError::UnterminatedHeader { path, line }
            | EngineError::InvalidHeader { path, line, .. } => {
                Self::new(DiagnosticKind::ParseError, message).in_file(path.clone(), Some(*line))
            }
            EngineError::InvalidArgument(_) => Self::new(DiagnosticKind::ParseError, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_header_becomes_parse_error_with_line() {
        let err = EngineError::InvalidHeader {
            path: "manuscript/chapters/ch0002.md".to_owned(),
            line: 4,
            message: "expected a mapping".to_owned(),
        };

        let diagnostic = Diagnostic::from(&err);

        assert_eq!(diagnostic.kind, DiagnosticKind::ParseError);
        assert_eq!(
            diagnostic.file.as_deref(),
            Some("manuscript/chapters/ch0002.md")
        );
        assert_eq!(diagnostic.line, Some(4));
        assert!(diagnostic.message.contains("expected a mapping"));
    }

    #[test]
    fn test_io_error_becomes_read_error() {
        let err = EngineError::Io {
            path: "manuscript/chapters/ch0003.md".to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        let diagnostic = Diagnostic::from(&err);

        assert_eq!(diagnostic.kind, DiagnosticKind::ReadError);
        assert_eq!(diagnostic.line, None);
    }

    #[test]
    fn test_invalid_argument_becomes_fileless_parse_error() {
        let err = EngineError::InvalidArgument("minCoverage must be between 0 and 1".to_owned());

        let diagnostic = Diagnostic::from(&err);

        assert_eq!(diagnostic.kind, DiagnosticKind::ParseError);
        assert!(diagnostic.file.is_none());
        assert!(diagnostic.message.contains("minCoverage"));
    }

    #[test]
    fn test_diagnostic_serializes_kind_in_snake_case() {
        let diagnostic = Diagnostic::new(DiagnosticKind::ScopeNotFound, "no chapter ch9999");

        let json = serde_json::to_value(&diagnostic).unwrap();

        assert_eq!(json["kind"], "scope_not_found");
        assert!(json.get("file").is_none());
    }
}
