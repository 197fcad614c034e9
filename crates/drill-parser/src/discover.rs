//! Source discovery.
//!
//! Files named explicitly are always study sets. Directories are walked with
//! the `ignore` crate (so `.gitignore` applies) and contribute only files whose
//! first non-blank line is the shebang.

use std::collections::HashSet;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::classify::{LineKind, classify};
use crate::error::ParserError;

/// Resolve configured source paths into the ordered list of files to parse.
///
/// Order is argument order; files found under one directory are sorted by
/// path. A file reached twice, under any spelling, is kept at its first
/// position and in its first spelling.
///
/// # Errors
///
/// Returns [`ParserError::MissingSource`] for a path that does not exist and
/// [`ParserError::Walk`] if a directory cannot be walked.
pub fn discover(paths: &[PathBuf]) -> Result<Vec<PathBuf>, ParserError> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if seen.insert(identity(path)) {
                files.push(path.clone());
            }
            continue;
        }
        if !path.is_dir() {
            return Err(ParserError::MissingSource(path.clone()));
        }

        let mut found = Vec::new();
        for entry in WalkBuilder::new(path).build() {
            let entry = entry?;
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            if has_shebang(entry.path()) {
                found.push(entry.into_path());
            } else {
                tracing::trace!(path = %entry.path().display(), "skipping file without shebang");
            }
        }
        found.sort();
        tracing::debug!(dir = %path.display(), files = found.len(), "discovered study sets");

        for file in found {
            if seen.insert(identity(&file)) {
                files.push(file);
            }
        }
    }

    Ok(files)
}

/// Key that is equal for every spelling of the same file.
fn identity(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Whether the first non-blank line of `path` is the shebang.
///
/// Unreadable or non-UTF-8 files are treated as not eligible.
#[must_use]
pub fn has_shebang(path: &Path) -> bool {
    let Ok(file) = std::fs::File::open(path) else {
        return false;
    };
    for line in BufReader::new(file).lines() {
        let Ok(line) = line else {
            return false;
        };
        match classify(&line).kind {
            LineKind::Blank => {}
            LineKind::Shebang => return true,
            _ => return false,
        }
    }
    false
}
