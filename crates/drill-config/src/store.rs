//! Metadata store location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// `<data_dir>/drill/metadata.json`, or `.drill/metadata.json` when the
/// platform has no data directory.
fn default_store_path() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from(".drill").join("metadata.json"),
        |dir| dir.join("drill").join("metadata.json"),
    )
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}
