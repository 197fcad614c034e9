use std::path::PathBuf;

use clap::{Args, Subcommand};
use drill_config::ConfigOverrides;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Study the scheduled points interactively.
    Study(SourceArgs),
    /// Assign identifiers to new questions and register them in the store.
    Sync(SourceArgs),
    /// Print the study queue without starting a session.
    Queue(SourceArgs),
    /// Per-point attempt statistics.
    Stats(SourceArgs),
    /// List uncertainty lines grouped by file.
    Uncertain(SourceArgs),
    /// Print the JSON Schema of the metadata store document.
    Schema,
}

impl Commands {
    /// Source and scheduling arguments of the command, if it takes any.
    #[must_use]
    pub const fn source_args(&self) -> Option<&SourceArgs> {
        match self {
            Self::Study(args)
            | Self::Sync(args)
            | Self::Queue(args)
            | Self::Stats(args)
            | Self::Uncertain(args) => Some(args),
            Self::Schema => None,
        }
    }
}

/// Arguments shared by every command that compiles study sets.
#[derive(Clone, Debug, Default, Args)]
pub struct SourceArgs {
    /// Study-set files or directories (replaces `sources` from config)
    pub paths: Vec<PathBuf>,

    /// Include points marked hidden
    #[arg(long)]
    pub show_hidden: bool,

    /// Success-rate threshold above which well-known points are skipped
    #[arg(long, value_parser = parse_threshold)]
    pub threshold: Option<f64>,

    /// Metadata store location
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Directory media paths are resolved against
    #[arg(long)]
    pub media_root: Option<PathBuf>,
}

impl SourceArgs {
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            show_hidden: self.show_hidden,
            threshold: self.threshold,
            store_path: self.store.clone(),
            media_root: self.media_root.clone(),
            sources: self.paths.clone(),
        }
    }
}

fn parse_threshold(value: &str) -> Result<f64, String> {
    let threshold: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(format!("{threshold} is outside [0, 1]"))
    }
}
