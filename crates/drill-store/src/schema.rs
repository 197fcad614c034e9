//! JSON Schema of the metadata store document.

use std::collections::BTreeMap;

use schemars::schema_for;

use crate::record::RawRecord;

/// Schema of the whole document: an object of records keyed by identifier.
#[must_use]
pub fn document_schema() -> serde_json::Value {
    serde_json::to_value(schema_for!(BTreeMap<String, RawRecord>)).unwrap_or_default()
}
