use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::{info, warn};
use serde_json::Error as SerdeError;

use crate::domain::ValuationConfig;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "NetworthCalculator";
const APP_NAME: &str = "NetworthCalculator";
const CONFIG_FILE: &str = "valuation.json";

/// `<config dir>/valuation.json`, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME).map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Config from the default location; defaults when there is none or it cannot be read.
pub fn load_config() -> ValuationConfig {
    let Some(path) = default_config_path() else {
        return ValuationConfig::default();
    };
    if !path.exists() {
        return ValuationConfig::default();
    }
    match load_config_from(&path) {
        Ok(config) => config,
        Err(error) => {
            warn!("ignoring config at {}: {error}", path.display());
            ValuationConfig::default()
        }
    }
}

/// Read a config file. Missing fields take their defaults.
pub fn load_config_from(path: &Path) -> Result<ValuationConfig, ConfigError> {
    let data = fs::read_to_string(path)?;
    let config = serde_json::from_str(&data)?;
    info!("loaded valuation config from {}", path.display());
    Ok(config)
}

pub fn save_config(config: &ValuationConfig) -> Result<(), ConfigError> {
    let path = default_config_path().ok_or(ConfigError::StorageUnavailable)?;
    save_config_to(config, &path)
}

pub fn save_config_to(config: &ValuationConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}
