//! Study session configuration.

use drill_core::scheduler::{DEFAULT_MIN_ATTEMPTS, DEFAULT_THRESHOLD, ScheduleOptions};
use serde::{Deserialize, Serialize};

const fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

const fn default_min_attempts() -> u32 {
    DEFAULT_MIN_ATTEMPTS
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StudyConfig {
    /// Include points that were hidden in an earlier session.
    #[serde(default)]
    pub show_hidden: bool,

    /// Points above this success rate are skipped once they have enough attempts.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Points with fewer attempts are always studied.
    #[serde(default = "default_min_attempts")]
    pub min_attempts: u32,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            threshold: default_threshold(),
            min_attempts: default_min_attempts(),
        }
    }
}

impl StudyConfig {
    #[must_use]
    pub const fn schedule_options(&self) -> ScheduleOptions {
        ScheduleOptions {
            show_hidden: self.show_hidden,
            threshold: self.threshold,
            min_attempts: self.min_attempts,
        }
    }
}
