//! # drill-store
//!
//! The metadata store client. One JSON document maps stringified point
//! identifiers to performance records:
//!
//! ```json
//! { "1": { "total_attempt_count": 1, "successful_attempt_count": 1, "is_hidden": false } }
//! ```
//!
//! [`MetadataStore`] is the only component that opens this file. Reads merge
//! missing fields with defaults, unknown fields survive rewrites, and every
//! write replaces the whole document through a rename.

pub mod error;
pub mod record;
pub mod schema;
pub mod store;

pub use error::StoreError;
pub use record::{RawRecord, StoredEntry, merge_defaults};
pub use schema::document_schema;
pub use store::MetadataStore;
