//! Study Buddy configuration system.
//!
//! Provides TOML-based configuration for the upstream model, sampling
//! parameters, assistant persona and logging. All sections use defaults,
//! so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use studybuddy_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("model: {}", config.model.name);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    GenerationConfig, LogLevel, LoggingConfig, ModelConfig, PersonaConfig, StudyBuddyConfig,
    API_KEY_ENV, CONFIG_SCHEMA_VERSION,
};

use std::path::Path;
use studybuddy_common::ConfigError;

/// Load config from `path`, or from the platform default path when `None`.
///
/// A missing file is created from the commented template and defaults are
/// returned. Unlike [`toml_loader::load_from_path`], out-of-range values are
/// a hard error here.
pub fn load_config(path: Option<&Path>) -> Result<StudyBuddyConfig, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => toml_loader::default_config_path()?,
    };

    let config = toml_loader::read_or_create(&path)?;
    validation::validate(&config)?;
    Ok(config)
}
