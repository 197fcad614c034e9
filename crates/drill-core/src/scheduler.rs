//! Study queue selection and ordering.
//!
//! A point is dropped when it is hidden (unless hidden points are shown) or
//! when it has enough attempts and a success rate above the threshold. What
//! remains is ordered least-attempted first, then weakest first. The sort is
//! stable, so ties keep file order, then line order.

use std::cmp::Ordering;

use crate::entities::StudyItem;
use crate::errors::CoreError;

/// Default success-rate threshold above which a point is skipped.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Points with fewer attempts than this are always retained.
pub const DEFAULT_MIN_ATTEMPTS: u32 = 3;

/// Filtering knobs for [`Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleOptions {
    pub show_hidden: bool,
    pub threshold: f64,
    pub min_attempts: u32,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            show_hidden: false,
            threshold: DEFAULT_THRESHOLD,
            min_attempts: DEFAULT_MIN_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    options: ScheduleOptions,
}

impl Scheduler {
    /// Build a scheduler.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the threshold is outside `[0, 1]`.
    pub fn new(options: ScheduleOptions) -> Result<Self, CoreError> {
        if !(0.0..=1.0).contains(&options.threshold) {
            return Err(CoreError::Validation(format!(
                "success-rate threshold must be within [0, 1], got {}",
                options.threshold
            )));
        }
        Ok(Self { options })
    }

    #[must_use]
    pub const fn options(&self) -> ScheduleOptions {
        self.options
    }

    /// Whether a single item belongs in the queue.
    #[must_use]
    pub fn is_eligible(&self, item: &StudyItem) -> bool {
        if item.record.is_hidden && !self.options.show_hidden {
            return false;
        }
        if item.record.total_attempt_count < self.options.min_attempts {
            return true;
        }
        item.record.success_rate() <= self.options.threshold
    }

    /// Filter `items` and order the survivors.
    ///
    /// `items` must already be in file order, then line order.
    #[must_use]
    pub fn select_and_order(&self, items: Vec<StudyItem>) -> Vec<StudyItem> {
        let mut queue: Vec<StudyItem> = items
            .into_iter()
            .filter(|item| self.is_eligible(item))
            .collect();
        queue.sort_by(compare_priority);
        queue
    }
}

fn compare_priority(a: &StudyItem, b: &StudyItem) -> Ordering {
    a.record
        .total_attempt_count
        .cmp(&b.record.total_attempt_count)
        .then_with(|| a.record.success_rate().total_cmp(&b.record.success_rate()))
}
