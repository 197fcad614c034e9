//! # drill-parser
//!
//! Turns plain-text study sets into addressable points.
//!
//! - [`classify`]: pure line classification (shebang, note, uncertainty,
//!   question, blank, other text)
//! - [`parser`]: groups each question line with the line after it
//! - [`allocate`]: duplicate detection, identifier assignment and the in-place
//!   rewrite of question lines that lack an identifier
//! - [`discover`]: finds shebang-marked files under directories
//!
//! ```text
//! #!drill
//! // chapter 3
//! What is 2+2?? 1
//! 4
//! # is this on the exam?
//! ```

pub mod allocate;
pub mod classify;
pub mod discover;
pub mod error;
pub mod parser;

pub use allocate::{
    AllocatedPoint, Allocation, LineRewrite, allocate_and_persist, check_unique, rewrite_lines,
};
pub use classify::{IdSuffix, Line, LineKind, classify, display_question, is_media};
pub use discover::discover;
pub use error::ParserError;
pub use parser::{ParsedFile, parse_file, parse_str};
