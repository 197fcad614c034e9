//! Identifier allocation and source rewriting.
//!
//! Allocation runs over the whole corpus at once: duplicates are rejected
//! first, then every point without an identifier gets the next free one in
//! file order, then line order. Each touched file is rewritten in one atomic
//! step (temp file in the same directory, then rename) with only the recorded
//! question lines changed.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};

use drill_core::entities::Point;
use drill_core::ids::PointId;

use crate::classify::{IdSuffix, LineKind, classify};
use crate::error::ParserError;
use crate::parser::ParsedFile;

/// A point after allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatedPoint {
    pub point: Point,
    pub newly_assigned: bool,
}

/// One question line that needs `" <id>"` appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRewrite {
    /// 1-based line number.
    pub line: usize,
    pub id: PointId,
}

/// Result of [`allocate_and_persist`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocation {
    /// Every point of the corpus, file order then line order.
    pub points: Vec<AllocatedPoint>,
    pub rewritten_files: Vec<PathBuf>,
}

impl Allocation {
    /// Identifiers assigned during this run, in encounter order.
    #[must_use]
    pub fn assigned(&self) -> Vec<PointId> {
        self.points
            .iter()
            .filter(|p| p.newly_assigned)
            .filter_map(|p| p.point.id)
            .collect()
    }

    /// All identifiers of the corpus after allocation.
    #[must_use]
    pub fn ids(&self) -> Vec<PointId> {
        self.points.iter().filter_map(|p| p.point.id).collect()
    }
}

/// Reject corpora where one identifier appears on two question lines.
///
/// Returns the set of identifiers already present in the files.
///
/// # Errors
///
/// Returns [`ParserError::DuplicateIdentifier`] naming both locations.
pub fn check_unique(files: &[ParsedFile]) -> Result<BTreeSet<PointId>, ParserError> {
    let mut seen: HashMap<PointId, String> = HashMap::new();
    for point in files.iter().flat_map(|file| file.points.iter()) {
        let Some(id) = point.id else {
            continue;
        };
        if let Some(first) = seen.get(&id) {
            return Err(ParserError::DuplicateIdentifier {
                id,
                first: first.clone(),
                second: point.location(),
            });
        }
        seen.insert(id, point.location());
    }
    Ok(seen.into_keys().collect())
}

/// Assign identifiers to every unassigned point and write them back.
///
/// New identifiers start above the highest of `existing_ids` and the
/// identifiers already in the files, so a point deleted from the sources
/// never has its identifier reused while the store remembers it. Running this
/// on a fully assigned corpus changes nothing on disk.
///
/// # Errors
///
/// Returns [`ParserError::DuplicateIdentifier`] before anything is assigned,
/// and [`ParserError::Io`] or [`ParserError::MalformedSource`] if a file
/// cannot be rewritten. Files rewritten before a failure keep their new
/// identifiers; a re-run picks them up as existing.
pub fn allocate_and_persist(
    files: Vec<ParsedFile>,
    existing_ids: &BTreeSet<PointId>,
) -> Result<Allocation, ParserError> {
    let corpus_ids = check_unique(&files)?;
    let highest = existing_ids
        .iter()
        .chain(corpus_ids.iter())
        .copied()
        .max()
        .unwrap_or(0);
    let mut next_id = highest + 1;

    let mut allocation = Allocation::default();
    for file in files {
        let mut rewrites = Vec::new();
        for mut point in file.points {
            let newly_assigned = point.id.is_none();
            if newly_assigned {
                point.id = Some(next_id);
                rewrites.push(LineRewrite {
                    line: point.line,
                    id: next_id,
                });
                next_id += 1;
            }
            allocation.points.push(AllocatedPoint {
                point,
                newly_assigned,
            });
        }

        if !rewrites.is_empty() {
            rewrite_lines(&file.path, &rewrites)?;
            tracing::info!(
                path = %file.path.display(),
                assigned = rewrites.len(),
                "wrote new identifiers"
            );
            allocation.rewritten_files.push(file.path);
        }
    }

    Ok(allocation)
}

/// Append `" <id>"` to the given question lines of `path`.
///
/// Every other byte of the file, line endings included, is preserved. The new
/// content replaces the file through a rename, so readers see either the old
/// file or the fully rewritten one.
///
/// # Errors
///
/// Returns [`ParserError::MalformedSource`] if a target line is missing or is
/// no longer an unassigned question, and [`ParserError::Io`] on read/write
/// failure.
pub fn rewrite_lines(path: &Path, rewrites: &[LineRewrite]) -> Result<(), ParserError> {
    let content = std::fs::read_to_string(path).map_err(|e| ParserError::io(path, e))?;
    let updated = apply_rewrites(path, &content, rewrites)?;
    write_atomic(path, &updated)
}

fn apply_rewrites(
    path: &Path,
    content: &str,
    rewrites: &[LineRewrite],
) -> Result<String, ParserError> {
    let targets: BTreeMap<usize, PointId> = rewrites.iter().map(|r| (r.line, r.id)).collect();
    let segments: Vec<&str> = content.split_inclusive('\n').collect();

    if let Some((&line, _)) = targets.range(segments.len() + 1..).next() {
        return Err(ParserError::MalformedSource {
            path: path.to_path_buf(),
            line,
            reason: "line no longer exists".into(),
        });
    }

    let mut out = String::with_capacity(content.len() + rewrites.len() * 8);
    for (index, segment) in segments.iter().enumerate() {
        let Some(id) = targets.get(&(index + 1)) else {
            out.push_str(segment);
            continue;
        };

        let terminator = if segment.ends_with("\r\n") {
            "\r\n"
        } else if segment.ends_with('\n') {
            "\n"
        } else {
            ""
        };
        let body = &segment[..segment.len() - terminator.len()];

        if classify(body).kind != LineKind::Question(IdSuffix::Unassigned) {
            return Err(ParserError::MalformedSource {
                path: path.to_path_buf(),
                line: index + 1,
                reason: "line changed since it was parsed".into(),
            });
        }

        out.push_str(body.trim_end());
        out.push(' ');
        out.push_str(&id.to_string());
        out.push_str(terminator);
    }

    Ok(out)
}

fn write_atomic(path: &Path, content: &str) -> Result<(), ParserError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| ParserError::io(dir, e))?;
    temp.write_all(content.as_bytes())
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| ParserError::io(temp.path(), e))?;

    if let Ok(metadata) = std::fs::metadata(path) {
        std::fs::set_permissions(temp.path(), metadata.permissions())
            .map_err(|e| ParserError::io(temp.path(), e))?;
    }

    temp.persist(path)
        .map_err(|e| ParserError::io(path, e.error))?;
    Ok(())
}
