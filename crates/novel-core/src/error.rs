//! Engine error types.

use thiserror::Error;

/// Top-level engine error type.
///
/// Loader variants never escape a check: they are converted into
/// [`Diagnostic`](crate::diagnostic::Diagnostic)s at the batch boundary so a
/// single bad document cannot abort a run.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A file or directory could not be read or written.
    #[error("i/o error on {path}: {source}")]
    Io {
        /// Root-relative path of the file involved.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document does not start with a structured header.
    #[error("{path}: missing structured header")]
    MissingHeader {
        /// Root-relative path of the document.
        path: String,
    },

    /// The header was opened but never terminated.
    #[error("{path}:{line}: header is never closed")]
    UnterminatedHeader {
        /// Root-relative path of the document.
        path: String,
        /// Line of the opening delimiter.
        line: usize,
    },

    /// The header could not be decoded into the expected record shape.
    #[error("{path}:{line}: invalid header: {message}")]
    InvalidHeader {
        /// Root-relative path of the document.
        path: String,
        /// Best-known line of the problem.
        line: usize,
        /// Decoder message.
        message: String,
    },

    /// The header declares a schema version this engine does not read.
    #[error("{path}: unsupported header schema {found}")]
    UnsupportedSchema {
        /// Root-relative path of the document.
        path: String,
        /// The declared schema version.
        found: u64,
    },

    /// A caller-supplied argument is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
