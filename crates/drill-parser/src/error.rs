//! Parser error types for drill-parser.

use std::path::PathBuf;

use drill_core::ids::PointId;

/// Errors raised while reading, parsing, or rewriting study sets.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    /// A question line without an answer line, or an unreadable identifier suffix.
    #[error("Malformed source {}:{line}: {reason}", .path.display())]
    MalformedSource {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// The same identifier sits on two question lines.
    #[error("Duplicate identifier {id}: found at {first} and {second}")]
    DuplicateIdentifier {
        id: PointId,
        first: String,
        second: String,
    },

    /// A configured source path does not exist.
    #[error("Source not found: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory walk failure during discovery.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),
}

impl ParserError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
