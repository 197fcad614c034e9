//! Line classification.
//!
//! Rules, first match wins, applied to the trimmed line:
//! 1. equals [`SHEBANG`] -> `Shebang`
//! 2. starts with [`NOTE_MARKER`] -> `Note`
//! 3. starts with [`UNCERTAINTY_MARKER`] -> `Uncertainty`
//! 4. ends with `?`, or with `? <digits>` -> `Question`
//! 5. empty -> `Blank`, anything else -> `Text`

use drill_core::ids::{PointId, parse_canonical};

/// Marks a file as eligible for directory discovery.
pub const SHEBANG: &str = "#!drill";

/// Prefix of a note line.
pub const NOTE_MARKER: &str = "//";

/// Prefix of an uncertainty line.
pub const UNCERTAINTY_MARKER: char = '#';

/// Substrings that make a question or answer a media reference.
pub const MEDIA_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".bmp", ".svg", ".webp"];

/// Identifier state of a question line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdSuffix {
    /// Ends in `?`, no identifier yet.
    Unassigned,
    /// Ends in `? <id>`.
    Assigned(PointId),
    /// Looks like an identifier suffix but cannot be read back unchanged.
    Ambiguous(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Shebang,
    Note,
    Uncertainty,
    Question(IdSuffix),
    /// Any other non-blank line; answers are usually this.
    Text,
    Blank,
}

/// A classified physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub kind: LineKind,
}

impl Line {
    #[must_use]
    pub const fn is_question(&self) -> bool {
        matches!(self.kind, LineKind::Question(_))
    }

    /// The identifier embedded in an assigned question line.
    #[must_use]
    pub const fn id(&self) -> Option<PointId> {
        match self.kind {
            LineKind::Question(IdSuffix::Assigned(id)) => Some(id),
            _ => None,
        }
    }
}

/// Classify one line of text. Total and pure.
#[must_use]
pub fn classify(text: &str) -> Line {
    let trimmed = text.trim();
    let kind = if trimmed == SHEBANG {
        LineKind::Shebang
    } else if trimmed.starts_with(NOTE_MARKER) {
        LineKind::Note
    } else if trimmed.starts_with(UNCERTAINTY_MARKER) {
        LineKind::Uncertainty
    } else if trimmed.is_empty() {
        LineKind::Blank
    } else {
        question_suffix(trimmed).map_or(LineKind::Text, LineKind::Question)
    };

    Line {
        text: text.to_string(),
        kind,
    }
}

/// Whether `text` refers to a media file.
#[must_use]
pub fn is_media(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    MEDIA_EXTENSIONS.iter().any(|ext| lower.contains(ext))
}

/// Display form of a question line: the `" <id>"` suffix is removed, then one
/// trailing `?`. The same step applies to media paths.
#[must_use]
pub fn display_question(text: &str) -> &str {
    let trimmed = text.trim();
    let stem = match trimmed.rfind('?') {
        Some(pos) => &trimmed[..pos],
        None => trimmed,
    };
    stem.trim_end()
}

fn question_suffix(trimmed: &str) -> Option<IdSuffix> {
    if trimmed.ends_with('?') {
        return Some(IdSuffix::Unassigned);
    }

    let pos = trimmed.rfind('?')?;
    let rest = &trimmed[pos + 1..];
    let digits = rest.trim_start();
    if digits.len() == rest.len() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    if rest.len() - digits.len() != 1 || !rest.starts_with(' ') {
        return Some(IdSuffix::Ambiguous(format!(
            "identifier '{digits}' must follow '?' after exactly one space"
        )));
    }

    Some(parse_canonical(digits).map_or_else(
        || {
            IdSuffix::Ambiguous(format!(
                "identifier '{digits}' is not a positive integer without leading zeros"
            ))
        },
        IdSuffix::Assigned,
    ))
}
