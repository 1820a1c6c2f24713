//! Core TOML config loading: read from a path, creating it when missing.

use crate::schema::StudyBuddyConfig;
use crate::validation;
use std::path::Path;
use studybuddy_common::ConfigError;
use tracing::{info, warn};

use super::paths::create_default_config;

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields.
/// After loading, the config is validated; if validation fails, a warning
/// is logged and the parsed config is returned as-is.
pub fn load_from_path(path: &Path) -> Result<StudyBuddyConfig, ConfigError> {
    let config = read_from_path(path)?;
    warn_if_invalid(&config);
    Ok(config)
}

/// Load config from `path`, writing the commented default template there
/// first if the file does not exist yet. Invalid values are only logged.
pub fn load_or_create(path: &Path) -> Result<StudyBuddyConfig, ConfigError> {
    let config = read_or_create(path)?;
    warn_if_invalid(&config);
    Ok(config)
}

/// Like [`load_or_create`], but leaves validation to the caller.
pub(crate) fn read_or_create(path: &Path) -> Result<StudyBuddyConfig, ConfigError> {
    match read_from_path(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(path)?;
            Ok(StudyBuddyConfig::default())
        }
        Err(e) => Err(e),
    }
}

fn read_from_path(path: &Path) -> Result<StudyBuddyConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: StudyBuddyConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    info!("loaded config from {}", path.display());
    Ok(config)
}

fn warn_if_invalid(config: &StudyBuddyConfig) {
    if let Err(e) = validation::validate(config) {
        warn!("config validation warning: {e}");
    }
}
