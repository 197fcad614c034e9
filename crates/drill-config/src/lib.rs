//! # drill-config
//!
//! Layered configuration loading for drill using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Command-line overrides ([`ConfigOverrides`])
//! 2. Environment variables (`DRILL_*` prefix, `__` as separator)
//! 3. Project-level `.drill/config.toml`
//! 4. User-level `~/.config/drill/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `DRILL_STUDY__THRESHOLD` -> `study.threshold`,
//! `DRILL_STORE__PATH` -> `store.path`, `DRILL_SOURCES` -> `sources`.
//!
//! # Usage
//!
//! ```no_run
//! use drill_config::DrillConfig;
//!
//! let config = DrillConfig::load().expect("config");
//! println!("store: {}", config.store.path.display());
//! ```

mod error;
mod media;
mod store;
mod study;

pub use error::ConfigError;
pub use media::MediaConfig;
pub use store::StoreConfig;
pub use study::StudyConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DrillConfig {
    #[serde(default)]
    pub study: StudyConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub media: MediaConfig,
    /// Study-set files or directories to discover them in.
    #[serde(default)]
    pub sources: Vec<PathBuf>,
}

/// Values given on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub show_hidden: bool,
    pub threshold: Option<f64>,
    pub store_path: Option<PathBuf>,
    pub media_root: Option<PathBuf>,
    pub sources: Vec<PathBuf>,
}

impl DrillConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be read or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with command-line overrides on top.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be read or a value
    /// has the wrong type.
    pub fn load_with_overrides(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        Self::with_overrides(Self::figment(), overrides)
            .extract()
            .map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".drill/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("DRILL_").split("__"))
    }

    /// Merge command-line overrides into `figment`.
    pub fn with_overrides(mut figment: Figment, overrides: &ConfigOverrides) -> Figment {
        if overrides.show_hidden {
            figment = figment.merge(Serialized::default("study.show_hidden", true));
        }
        if let Some(threshold) = overrides.threshold {
            figment = figment.merge(Serialized::default("study.threshold", threshold));
        }
        if let Some(path) = &overrides.store_path {
            figment = figment.merge(Serialized::default("store.path", path));
        }
        if let Some(root) = &overrides.media_root {
            figment = figment.merge(Serialized::default("media.root", root));
        }
        if !overrides.sources.is_empty() {
            figment = figment.merge(Serialized::default("sources", &overrides.sources));
        }
        figment
    }

    /// Check the values the study pipeline depends on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a threshold outside `[0, 1]`
    /// and [`ConfigError::NotConfigured`] when no sources are given.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.study.threshold) {
            return Err(ConfigError::InvalidValue {
                field: "study.threshold".into(),
                reason: format!("{} is outside [0, 1]", self.study.threshold),
            });
        }
        if self.sources.is_empty() {
            return Err(ConfigError::NotConfigured {
                field: "sources".into(),
                hint: "pass study-set paths on the command line or set `sources` in .drill/config.toml"
                    .into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("drill").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_sources() {
        let config = DrillConfig::default();
        assert!(config.sources.is_empty());
        assert!(!config.study.show_hidden);
        assert!(config.media.root.is_none());
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = DrillConfig::figment();
        let config: DrillConfig = figment.extract().expect("should extract defaults");
        assert!((config.study.threshold - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn validate_requires_sources() {
        let err = DrillConfig::default().validate().unwrap_err();
        assert!(matches!(err, ConfigError::NotConfigured { .. }));
    }

    #[test]
    fn validate_rejects_threshold_out_of_range() {
        let mut config = DrillConfig {
            sources: vec![PathBuf::from("deck.txt")],
            ..DrillConfig::default()
        };
        config.study.threshold = 1.2;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("study.threshold"));
    }
}
