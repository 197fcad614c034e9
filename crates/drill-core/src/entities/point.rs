use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::MetadataRecord;
use crate::errors::CoreError;
use crate::ids::PointId;

/// A question/answer pair parsed from a source file.
///
/// Points are rebuilt from the source files on every run. `id` is `None`
/// until the allocator assigns one and writes it back to `line`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Point {
    pub id: Option<PointId>,
    /// Display text with the `" <id>"` suffix and one trailing `?` removed.
    pub question: String,
    /// The line after the question, verbatim.
    pub answer: String,
    pub question_is_media: bool,
    pub answer_is_media: bool,
    pub source: PathBuf,
    /// 1-based line number of the question line.
    pub line: usize,
}

impl Point {
    /// `path:line` location used in diagnostics.
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}:{}", self.source.display(), self.line)
    }
}

/// A point paired with its identifier and the stored record it was scheduled with.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StudyItem {
    pub id: PointId,
    pub point: Point,
    pub record: MetadataRecord,
}

impl StudyItem {
    /// Pair an allocated point with its record.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Unassigned`] if the point has no identifier yet.
    pub fn new(point: Point, record: MetadataRecord) -> Result<Self, CoreError> {
        let id = point.id.ok_or_else(|| CoreError::Unassigned {
            path: point.source.display().to_string(),
            line: point.line,
        })?;
        Ok(Self { id, point, record })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(id: Option<PointId>) -> Point {
        Point {
            id,
            question: "What is 2+2?".into(),
            answer: "4".into(),
            question_is_media: false,
            answer_is_media: false,
            source: PathBuf::from("math.txt"),
            line: 3,
        }
    }

    #[test]
    fn study_item_requires_identifier() {
        let err = StudyItem::new(point(None), MetadataRecord::default()).unwrap_err();
        assert_eq!(err.to_string(), "Point at math.txt:3 has no identifier assigned");
    }

    #[test]
    fn study_item_copies_identifier() {
        let item = StudyItem::new(point(Some(9)), MetadataRecord::default()).unwrap();
        assert_eq!(item.id, 9);
        assert_eq!(item.point.location(), "math.txt:3");
    }
}
