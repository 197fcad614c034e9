//! Per-session outcome ledger.
//!
//! Outcomes are kept in memory and never touch the store while the session
//! runs. At teardown [`SessionState::updates`] yields the replacement records
//! for every point that received an outcome; unseen points are left out.

use std::collections::BTreeMap;

use crate::entities::{MetadataRecord, StudyItem};
use crate::enums::Outcome;
use crate::errors::CoreError;
use crate::ids::PointId;
use crate::responses::SessionSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    base: MetadataRecord,
    outcome: Option<Outcome>,
}

/// Outcomes recorded during one study session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    entries: BTreeMap<PointId, Entry>,
}

impl SessionState {
    /// Start a session over the scheduled queue.
    #[must_use]
    pub fn new(queue: &[StudyItem]) -> Self {
        let entries = queue
            .iter()
            .map(|item| {
                (
                    item.id,
                    Entry {
                        base: item.record,
                        outcome: None,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Record the outcome for a point. A later call for the same point
    /// replaces the earlier outcome.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotInSession`] for a point outside the queue.
    pub fn record_outcome(&mut self, id: PointId, outcome: Outcome) -> Result<(), CoreError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(CoreError::NotInSession(id))?;
        entry.outcome = Some(outcome);
        Ok(())
    }

    #[must_use]
    pub fn outcome(&self, id: PointId) -> Option<Outcome> {
        self.entries.get(&id).and_then(|entry| entry.outcome)
    }

    /// The record a point should be stored with after this session, or `None`
    /// if the point was not seen.
    #[must_use]
    pub fn compute_delta(&self, id: PointId) -> Option<MetadataRecord> {
        let entry = self.entries.get(&id)?;
        entry.outcome.map(|outcome| entry.base.apply(outcome))
    }

    /// Replacement records for every point that received an outcome.
    #[must_use]
    pub fn updates(&self) -> BTreeMap<PointId, MetadataRecord> {
        self.entries
            .keys()
            .filter_map(|id| self.compute_delta(*id).map(|record| (*id, record)))
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(|entry| entry.outcome.is_none())
    }

    /// Counts for the end-of-session report.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        let mut summary = SessionSummary::default();
        for outcome in self.entries.values().filter_map(|entry| entry.outcome) {
            match outcome {
                Outcome::Succeeded => {
                    summary.attempted += 1;
                    summary.correct += 1;
                }
                Outcome::Failed => summary.attempted += 1,
                Outcome::Passed => summary.passed += 1,
                Outcome::Hidden => summary.hidden += 1,
            }
        }
        summary
    }
}
