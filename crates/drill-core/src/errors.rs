//! Cross-cutting error types for drill.
//!
//! Parsing and store failures live in `drill-parser` and `drill-store`. The
//! binary converges everything into `anyhow`.

use thiserror::Error;

use crate::ids::PointId;

/// Errors that can be raised by the core types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A point reached scheduling or the session without an identifier.
    #[error("Point at {path}:{line} has no identifier assigned")]
    Unassigned { path: String, line: usize },

    /// An outcome was recorded for a point the session never received.
    #[error("Point {0} is not part of this session")]
    NotInSession(PointId),

    /// Data failed validation (range, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
