//! Session outcome enum.
//!
//! Serialized in `snake_case`. `Outcome::from_token` maps the single-letter
//! answers typed during an interactive session.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened to a point during the current session.
///
/// A point with no recorded outcome was not seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Succeeded,
    Failed,
    Passed,
    Hidden,
}

impl Outcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Passed => "passed",
            Self::Hidden => "hidden",
        }
    }

    /// Whether this outcome counts as an attempt.
    #[must_use]
    pub const fn is_attempt(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Map an interactive answer token (`y`, `n`, `p`, `h`) to an outcome.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Some(Self::Succeeded),
            "n" | "no" => Some(Self::Failed),
            "p" | "pass" => Some(Self::Passed),
            "h" | "hide" => Some(Self::Hidden),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
