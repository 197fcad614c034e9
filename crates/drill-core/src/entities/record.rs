//! Persisted performance counters for one point.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Outcome;

/// Persisted performance counters and hidden flag for one point.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MetadataRecord {
    pub total_attempt_count: u32,
    pub successful_attempt_count: u32,
    pub is_hidden: bool,
}

impl MetadataRecord {
    /// Successful attempts divided by total attempts, `0.0` with no attempts.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.total_attempt_count == 0 {
            return 0.0;
        }
        f64::from(self.successful_attempt_count) / f64::from(self.total_attempt_count)
    }

    /// The record that results from applying one session outcome.
    #[must_use]
    pub const fn apply(self, outcome: Outcome) -> Self {
        let mut next = self;
        match outcome {
            Outcome::Succeeded => {
                next.total_attempt_count = next.total_attempt_count.saturating_add(1);
                next.successful_attempt_count = next.successful_attempt_count.saturating_add(1);
            }
            Outcome::Failed => {
                next.total_attempt_count = next.total_attempt_count.saturating_add(1);
            }
            Outcome::Passed => {}
            Outcome::Hidden => next.is_hidden = true,
        }
        next
    }
}
