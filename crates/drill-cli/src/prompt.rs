//! The interactive study loop.
//!
//! Generic over the reader and writer so tests can drive it with in-memory
//! buffers. Every recorded outcome goes straight into the shared
//! [`SessionState`] so an interrupt never loses an answer already given.

use std::io::{BufRead, Write};
use std::sync::Mutex;

use drill_config::MediaConfig;
use drill_core::entities::{Point, StudyItem};
use drill_core::enums::Outcome;
use drill_core::session::SessionState;

const RESPONSE_PROMPT: &str = "[y]es [n]o [p]ass [h]ide [q]uit > ";

/// What the user answered for one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Record(Outcome),
    Quit,
}

/// Parse a response token; `None` for anything outside the fixed set.
#[must_use]
pub fn parse_response(token: &str) -> Option<Response> {
    let token = token.trim().to_ascii_lowercase();
    match token.as_str() {
        "q" | "quit" => Some(Response::Quit),
        other => Outcome::from_token(other).map(Response::Record),
    }
}

/// Prompt until a valid token arrives. Returns `None` at end of input.
pub fn read_response<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> std::io::Result<Option<Response>> {
    loop {
        write!(output, "{RESPONSE_PROMPT}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if let Some(response) = parse_response(&line) {
            return Ok(Some(response));
        }
        writeln!(output, "unrecognized response '{}'", line.trim())?;
    }
}

/// Drive one session over `queue`, recording outcomes into `state`.
pub fn run_session<R: BufRead, W: Write>(
    queue: &[StudyItem],
    media: &MediaConfig,
    state: &Mutex<SessionState>,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<()> {
    for (index, item) in queue.iter().enumerate() {
        writeln!(output)?;
        writeln!(
            output,
            "[{}/{}] #{} {}",
            index + 1,
            queue.len(),
            item.id,
            item.point.location()
        )?;
        writeln!(output, "Q: {}", question_text(&item.point, media))?;
        write!(output, "(enter to reveal) ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 || parse_response(&line) == Some(Response::Quit) {
            break;
        }
        writeln!(output, "A: {}", answer_text(&item.point, media))?;

        match read_response(input, output)? {
            None | Some(Response::Quit) => break,
            Some(Response::Record(outcome)) => {
                state
                    .lock()
                    .map_err(|_| anyhow::anyhow!("session state lock poisoned"))?
                    .record_outcome(item.id, outcome)?;
                tracing::debug!(id = item.id, outcome = %outcome, "recorded outcome");
            }
        }
    }
    Ok(())
}

fn question_text(point: &Point, media: &MediaConfig) -> String {
    if point.question_is_media {
        format!("[media] {}", media.resolve(&point.source, &point.question).display())
    } else {
        point.question.clone()
    }
}

fn answer_text(point: &Point, media: &MediaConfig) -> String {
    if point.answer_is_media {
        format!("[media] {}", media.resolve(&point.source, &point.answer).display())
    } else {
        point.answer.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::PathBuf;

    use drill_core::entities::MetadataRecord;
    use pretty_assertions::assert_eq;

    use super::*;

    fn item(id: u64, question: &str, answer: &str) -> StudyItem {
        StudyItem {
            id,
            point: Point {
                id: Some(id),
                question: question.into(),
                answer: answer.into(),
                question_is_media: false,
                answer_is_media: answer.ends_with(".png"),
                source: PathBuf::from("/decks/bio.txt"),
                line: usize::try_from(id).unwrap() * 2 - 1,
            },
            record: MetadataRecord::default(),
        }
    }

    fn run(queue: &[StudyItem], input: &str) -> (SessionState, String) {
        let state = Mutex::new(SessionState::new(queue));
        let mut output = Vec::new();
        run_session(
            queue,
            &MediaConfig::default(),
            &state,
            &mut Cursor::new(input.as_bytes()),
            &mut output,
        )
        .unwrap();
        (
            state.into_inner().unwrap(),
            String::from_utf8(output).unwrap(),
        )
    }

    #[test]
    fn tokens_map_to_responses() {
        assert_eq!(parse_response("y\n"), Some(Response::Record(Outcome::Succeeded)));
        assert_eq!(parse_response(" N "), Some(Response::Record(Outcome::Failed)));
        assert_eq!(parse_response("pass"), Some(Response::Record(Outcome::Passed)));
        assert_eq!(parse_response("h"), Some(Response::Record(Outcome::Hidden)));
        assert_eq!(parse_response("q"), Some(Response::Quit));
        assert_eq!(parse_response("maybe"), None);
        assert_eq!(parse_response(""), None);
    }

    #[test]
    fn invalid_tokens_reprompt_without_recursion() {
        let mut input = Cursor::new("x\n\nwhat\ny\n".as_bytes());
        let mut output = Vec::new();

        let response = read_response(&mut input, &mut output).unwrap();

        assert_eq!(response, Some(Response::Record(Outcome::Succeeded)));
        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches(RESPONSE_PROMPT).count(), 4);
        assert!(output.contains("unrecognized response 'what'"));
    }

    #[test]
    fn end_of_input_stops_prompting() {
        let mut input = Cursor::new("zzz\n".as_bytes());
        let mut output = Vec::new();
        assert_eq!(read_response(&mut input, &mut output).unwrap(), None);
    }

    #[test]
    fn session_records_each_answer() {
        let queue = vec![item(1, "A", "a"), item(2, "B", "b"), item(3, "C", "c")];

        let (state, output) = run(&queue, "\ny\n\nn\n\np\n");

        assert_eq!(state.outcome(1), Some(Outcome::Succeeded));
        assert_eq!(state.outcome(2), Some(Outcome::Failed));
        assert_eq!(state.outcome(3), Some(Outcome::Passed));
        assert!(output.contains("[1/3] #1 /decks/bio.txt:1"));
        assert!(output.contains("A: c"));
    }

    #[test]
    fn quitting_keeps_earlier_outcomes() {
        let queue = vec![item(1, "A", "a"), item(2, "B", "b")];

        let (state, _) = run(&queue, "\nh\n\nq\n");

        assert_eq!(state.outcome(1), Some(Outcome::Hidden));
        assert_eq!(state.outcome(2), None);
        assert_eq!(state.updates().len(), 1);
    }

    #[test]
    fn media_answers_are_resolved_next_to_the_source() {
        let queue = vec![item(1, "Which organelle is this", "cells/mito.png")];

        let (_, output) = run(&queue, "\ny\n");

        assert!(output.contains("A: [media] /decks/cells/mito.png"));
    }
}
