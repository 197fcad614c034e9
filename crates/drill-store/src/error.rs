//! Store error types for drill-store.

use std::path::PathBuf;

use drill_core::ids::PointId;
use thiserror::Error;

/// Errors from metadata store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document exists but cannot be read as a store. Never overwritten.
    #[error("Metadata store {} is corrupt: {reason}", .path.display())]
    StoreCorrupt { path: PathBuf, reason: String },

    /// A record was requested for an identifier that was never registered.
    #[error(
        "No metadata for point {id} in {}; is this the store these files were studied with?",
        .path.display()
    )]
    UnknownPoint { id: PointId, path: PathBuf },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
