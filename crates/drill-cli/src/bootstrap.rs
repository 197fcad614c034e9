use drill_config::{ConfigOverrides, DrillConfig};

use crate::cli::SourceArgs;

/// Load configuration with the command's flags layered on top, then validate.
pub fn load_config(args: Option<&SourceArgs>) -> anyhow::Result<DrillConfig> {
    let overrides = args.map(SourceArgs::overrides).unwrap_or_default();
    let config = DrillConfig::load_with_overrides(&overrides)?;
    config.validate()?;
    log_config(&config, &overrides);
    Ok(config)
}

fn log_config(config: &DrillConfig, overrides: &ConfigOverrides) {
    tracing::debug!(
        store = %config.store.path.display(),
        sources = config.sources.len(),
        sources_from_cli = !overrides.sources.is_empty(),
        threshold = config.study.threshold,
        show_hidden = config.study.show_hidden,
        "loaded configuration"
    );
}
