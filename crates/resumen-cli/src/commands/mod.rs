//! Subcommands.

pub mod banks;
pub mod batch;
pub mod config;
pub mod process;

use std::path::Path;

use anyhow::Context;
use resumen_core::models::config::AppConfig;
use resumen_core::statement::BankRegistry;
use tracing::debug;

/// Load the configuration from `--config`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<AppConfig> {
    if let Some(path) = config_path {
        return AppConfig::from_file(Path::new(path))
            .with_context(|| format!("Cannot read configuration file {}", path));
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using configuration at {}", default_path.display());
        Ok(AppConfig::from_file(&default_path)?)
    } else {
        Ok(AppConfig::default())
    }
}

/// Compile the configured banks. Invalid bank definitions stop here.
pub fn load_registry(config: &AppConfig) -> anyhow::Result<BankRegistry> {
    Ok(BankRegistry::from_definitions(&config.banks)?)
}
