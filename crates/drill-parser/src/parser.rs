//! Point parsing.
//!
//! Each question line is paired with the line right after it, which becomes
//! the answer verbatim. The answer line is consumed, so it never starts a
//! point of its own. Identifiers are read when present; unassigned points
//! carry `id: None` until the allocator runs.

use std::path::{Path, PathBuf};

use drill_core::entities::Point;

use crate::classify::{IdSuffix, LineKind, classify, display_question, is_media};
use crate::error::ParserError;

/// Everything extracted from one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    pub path: PathBuf,
    /// Points in order of appearance.
    pub points: Vec<Point>,
    /// Uncertainty lines, trimmed, in order of appearance.
    pub uncertainties: Vec<String>,
    pub has_shebang: bool,
}

impl ParsedFile {
    /// Points still waiting for an identifier.
    pub fn unassigned(&self) -> impl Iterator<Item = &Point> {
        self.points.iter().filter(|point| point.id.is_none())
    }
}

/// Read and parse a study-set file.
///
/// # Errors
///
/// Returns [`ParserError::Io`] if the file cannot be read and
/// [`ParserError::MalformedSource`] for a question without an answer or an
/// ambiguous identifier suffix.
pub fn parse_file(path: &Path) -> Result<ParsedFile, ParserError> {
    let content = std::fs::read_to_string(path).map_err(|e| ParserError::io(path, e))?;
    let parsed = parse_str(path, &content)?;
    tracing::debug!(
        path = %path.display(),
        points = parsed.points.len(),
        unassigned = parsed.unassigned().count(),
        uncertainties = parsed.uncertainties.len(),
        "parsed study set"
    );
    Ok(parsed)
}

/// Parse study-set content that was read from `path`.
///
/// # Errors
///
/// Returns [`ParserError::MalformedSource`] for a question without an answer
/// or an ambiguous identifier suffix.
pub fn parse_str(path: &Path, content: &str) -> Result<ParsedFile, ParserError> {
    let raw: Vec<&str> = content.lines().collect();
    let mut parsed = ParsedFile {
        path: path.to_path_buf(),
        points: Vec::new(),
        uncertainties: Vec::new(),
        has_shebang: false,
    };

    let mut index = 0;
    while index < raw.len() {
        let line = classify(raw[index]);
        let line_number = index + 1;

        match line.kind {
            LineKind::Shebang => parsed.has_shebang = true,
            LineKind::Uncertainty => parsed.uncertainties.push(line.text.trim().to_string()),
            LineKind::Question(suffix) => {
                let id = match suffix {
                    IdSuffix::Unassigned => None,
                    IdSuffix::Assigned(id) => Some(id),
                    IdSuffix::Ambiguous(reason) => {
                        return Err(malformed(path, line_number, reason));
                    }
                };

                let answer = raw.get(index + 1).ok_or_else(|| {
                    malformed(path, line_number, "question line has no answer line".into())
                })?;

                let question = display_question(&line.text).to_string();
                parsed.points.push(Point {
                    id,
                    question_is_media: is_media(&question),
                    answer_is_media: is_media(answer),
                    question,
                    answer: (*answer).to_string(),
                    source: path.to_path_buf(),
                    line: line_number,
                });

                index += 2;
                continue;
            }
            LineKind::Note | LineKind::Text | LineKind::Blank => {}
        }

        index += 1;
    }

    Ok(parsed)
}

fn malformed(path: &Path, line: usize, reason: String) -> ParserError {
    ParserError::MalformedSource {
        path: path.to_path_buf(),
        line,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(content: &str) -> ParsedFile {
        parse_str(Path::new("deck.txt"), content).expect("content should parse")
    }

    #[test]
    fn pairs_question_with_next_line() {
        let parsed = parse("#!drill\n// arithmetic\nWhat is 2+2?? 1\n4\n\nCapital of France?\nParis\n");

        assert!(parsed.has_shebang);
        assert_eq!(parsed.points.len(), 2);

        let first = &parsed.points[0];
        assert_eq!(first.id, Some(1));
        assert_eq!(first.question, "What is 2+2?");
        assert_eq!(first.answer, "4");
        assert_eq!(first.line, 3);

        let second = &parsed.points[1];
        assert_eq!(second.id, None);
        assert_eq!(second.question, "Capital of France");
        assert_eq!(second.answer, "Paris");
        assert_eq!(second.line, 6);
        assert_eq!(parsed.unassigned().count(), 1);
    }

    #[test]
    fn answer_line_is_consumed_even_if_it_looks_like_a_question() {
        let parsed = parse("Why?\nWhy not?\nNext?\nok\n");
        let questions: Vec<&str> = parsed.points.iter().map(|p| p.question.as_str()).collect();
        assert_eq!(questions, vec!["Why", "Next"]);
        assert_eq!(parsed.points[0].answer, "Why not?");
    }

    #[test]
    fn answer_is_kept_verbatim() {
        let parsed = parse("Spell it?\n  a b  c \n");
        assert_eq!(parsed.points[0].answer, "  a b  c ");
    }

    #[test]
    fn collects_uncertainties() {
        let parsed = parse("# was it 1066?\nWhen?\n1066\n  # check spelling\n");
        assert_eq!(parsed.uncertainties, vec!["# was it 1066?", "# check spelling"]);
        assert_eq!(parsed.points.len(), 1);
    }

    #[test]
    fn media_question_path_is_clean() {
        let parsed = parse("cells/mitosis.png? 7\nProphase\nName the stage?\nslides/anaphase.jpg\n");
        let media = &parsed.points[0];
        assert_eq!(media.question, "cells/mitosis.png");
        assert!(media.question_is_media);
        assert!(!media.answer_is_media);
        assert_eq!(media.id, Some(7));

        let answer_media = &parsed.points[1];
        assert!(!answer_media.question_is_media);
        assert!(answer_media.answer_is_media);
    }

    #[test]
    fn question_on_last_line_is_malformed() {
        let err = parse_str(Path::new("deck.txt"), "Fine?\nyes\nDangling?").unwrap_err();
        match err {
            ParserError::MalformedSource { line, reason, .. } => {
                assert_eq!(line, 3);
                assert!(reason.contains("no answer"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn ambiguous_suffix_is_malformed() {
        let err = parse_str(Path::new("deck.txt"), "Who?  12\nme\n").unwrap_err();
        assert!(err.to_string().starts_with("Malformed source deck.txt:1:"));
    }

    #[test]
    fn crlf_lines_parse_like_lf() {
        let parsed = parse("What?\r\nThat\r\n");
        assert_eq!(parsed.points[0].question, "What");
        assert_eq!(parsed.points[0].answer, "That");
    }

    #[test]
    fn empty_file_has_no_points() {
        let parsed = parse("");
        assert!(parsed.points.is_empty());
        assert!(!parsed.has_shebang);
    }
}
