//! CLI response types returned by `drill` commands.

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::StudyItem;
use crate::ids::PointId;

/// End-of-session counts printed after `drill study`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SessionSummary {
    pub attempted: u32,
    pub correct: u32,
    pub passed: u32,
    pub hidden: u32,
}

/// One row of `drill stats` and `drill queue`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PointStats {
    pub id: PointId,
    pub question: String,
    pub source: String,
    pub line: usize,
    pub attempts: u32,
    pub successes: u32,
    pub success_rate: f64,
    pub hidden: bool,
}

impl From<&StudyItem> for PointStats {
    fn from(item: &StudyItem) -> Self {
        Self {
            id: item.id,
            question: item.point.question.clone(),
            source: item.point.source.display().to_string(),
            line: item.point.line,
            attempts: item.record.total_attempt_count,
            successes: item.record.successful_attempt_count,
            success_rate: item.record.success_rate(),
            hidden: item.record.is_hidden,
        }
    }
}

/// Uncertainty lines collected from one source file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UncertaintyReport {
    pub source: PathBuf,
    pub lines: Vec<String>,
}

/// Response from `drill sync`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SyncResponse {
    pub files: usize,
    pub points: usize,
    pub assigned: Vec<PointId>,
    pub rewritten_files: Vec<PathBuf>,
    pub registered: usize,
}
