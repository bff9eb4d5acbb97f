// DIT Bridge configuration
// JSON config with every field defaulted. Resolution order:
// 1) Explicit path (--config)
// 2) DITBRIDGE_CONFIG environment variable
// 3) Per-user config dir (config.json)
// 4) Built-in defaults

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::constants::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, CONFIG_ENV_VAR, CONFIG_FILENAME};
use crate::error::{BridgeError, Result};
use crate::export::ExportConfig;
use crate::matching::MatchConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub matching: MatchConfig,
    pub export: ExportConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.matching.validate()?;
        if self.export.formats.is_empty() {
            return Err(BridgeError::Config("export.formats must list at least one format".to_string()));
        }
        Ok(())
    }
}

/// Where a config file lives if the user has one
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Pick the config file to read. Explicit and env paths must exist;
/// the default location is optional.
fn resolve_config_path(
    explicit: Option<&Path>,
    env_value: Option<String>,
    default_path: Option<PathBuf>,
) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(BridgeError::FileNotFound(path.display().to_string()));
        }
        return Ok(Some(path.to_path_buf()));
    }

    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        let path = PathBuf::from(value);
        if !path.is_file() {
            return Err(BridgeError::Config(format!(
                "{} points to a missing file: {}",
                CONFIG_ENV_VAR,
                path.display()
            )));
        }
        return Ok(Some(path));
    }

    Ok(default_path.filter(|p| p.is_file()))
}

/// Read and validate one config file
pub fn read_config(path: &Path) -> Result<AppConfig> {
    let json = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&json)
        .map_err(|e| BridgeError::Config(format!("{}: {}", path.display(), e)))?;
    config.validate()?;
    Ok(config)
}

/// Load the effective config and the file it came from (None = built-in defaults)
pub fn load_config(explicit: Option<&Path>) -> Result<(AppConfig, Option<PathBuf>)> {
    let source = resolve_config_path(explicit, env::var(CONFIG_ENV_VAR).ok(), default_config_path())?;

    match source {
        Some(path) => {
            let config = read_config(&path)?;
            log::debug!("Loaded config from {}", path.display());
            Ok((config, Some(path)))
        }
        None => Ok((AppConfig::default(), None)),
    }
}

/// Write a config file, creating its directory
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    config.validate()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}
