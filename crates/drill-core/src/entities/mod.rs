//! Entity structs for drill domain objects.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so they can
//! be rendered by the CLI and validated against their generated schemas.

mod point;
mod record;

pub use point::{Point, StudyItem};
pub use record::MetadataRecord;
