//! Media file resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MediaConfig {
    /// Root that media paths in study sets are relative to. When unset, paths
    /// are relative to the directory of the file they appear in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

impl MediaConfig {
    /// Resolve a media reference found in `source`.
    #[must_use]
    pub fn resolve(&self, source: &Path, reference: &str) -> PathBuf {
        let reference = Path::new(reference.trim());
        if reference.is_absolute() {
            return reference.to_path_buf();
        }
        match &self.root {
            Some(root) => root.join(reference),
            None => source
                .parent()
                .map_or_else(|| reference.to_path_buf(), |dir| dir.join(reference)),
        }
    }
}
