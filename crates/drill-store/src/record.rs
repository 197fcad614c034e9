//! On-disk record shape and the schema merge.
//!
//! Older stores may lack fields that newer versions write; newer stores may
//! carry fields this version does not know. [`merge_defaults`] is the single
//! place where a raw record becomes a [`MetadataRecord`]: missing fields take
//! their defaults, unknown fields are kept aside in [`StoredEntry::extra`] and
//! written back unchanged.

use drill_core::entities::MetadataRecord;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record exactly as found in the document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RawRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_attempt_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successful_attempt_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
    /// Fields written by other versions.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A record held in memory by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredEntry {
    pub record: MetadataRecord,
    pub extra: Map<String, Value>,
}

impl StoredEntry {
    #[must_use]
    pub fn new(record: MetadataRecord) -> Self {
        Self {
            record,
            extra: Map::new(),
        }
    }

    /// Shape written to disk: every known field, then the preserved extras.
    #[must_use]
    pub fn to_raw(&self) -> RawRecord {
        RawRecord {
            total_attempt_count: Some(self.record.total_attempt_count),
            successful_attempt_count: Some(self.record.successful_attempt_count),
            is_hidden: Some(self.record.is_hidden),
            extra: self.extra.clone(),
        }
    }
}

/// Fill in defaults for missing fields and check the counters.
///
/// # Errors
///
/// Returns a description of the problem when the successful count exceeds
/// the total count.
pub fn merge_defaults(raw: RawRecord) -> Result<StoredEntry, String> {
    let defaults = MetadataRecord::default();
    let record = MetadataRecord {
        total_attempt_count: raw
            .total_attempt_count
            .unwrap_or(defaults.total_attempt_count),
        successful_attempt_count: raw
            .successful_attempt_count
            .unwrap_or(defaults.successful_attempt_count),
        is_hidden: raw.is_hidden.unwrap_or(defaults.is_hidden),
    };

    if record.successful_attempt_count > record.total_attempt_count {
        return Err(format!(
            "successful_attempt_count {} exceeds total_attempt_count {}",
            record.successful_attempt_count, record.total_attempt_count
        ));
    }

    Ok(StoredEntry {
        record,
        extra: raw.extra,
    })
}
