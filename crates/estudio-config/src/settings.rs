//! Engine settings file.
//!
//! `settings.toml` in the user config directory holds an
//! [`EngineConfig`]. Missing keys take their defaults, so an empty file is
//! a valid settings file.

use std::path::{Path, PathBuf};

use estudio_core::EngineConfig;

use crate::error::ConfigError;
use crate::paths::user_config_dir;

/// File name of the engine settings file.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Path of the user's engine settings file.
pub fn settings_path() -> PathBuf {
    user_config_dir().join(SETTINGS_FILE)
}

/// Load and validate engine settings from a TOML file.
pub fn load_settings(path: impl AsRef<Path>) -> Result<EngineConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let config: EngineConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Validate and save engine settings, creating parent directories as needed.
pub fn save_settings(config: &EngineConfig, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let path = path.as_ref();
    config.validate()?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
    Ok(())
}

/// Load settings from `path`, falling back to defaults.
///
/// A missing file is silent; an unreadable or invalid one is logged at
/// `warn`.
pub fn load_settings_or_default(path: impl AsRef<Path>) -> EngineConfig {
    let path = path.as_ref();
    if !path.exists() {
        return EngineConfig::default();
    }
    load_settings(path).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), %err, "ignoring engine settings");
        EngineConfig::default()
    })
}
