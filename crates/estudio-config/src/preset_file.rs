//! Reading and writing presets as TOML.

use std::path::Path;

use estudio_core::Preset;

use crate::error::ConfigError;

/// Load a preset from a TOML file.
pub fn load_preset(path: impl AsRef<Path>) -> Result<Preset, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let preset = preset_from_toml(&content)?;
    tracing::debug!(path = %path.display(), name = %preset.name, "preset loaded");
    Ok(preset)
}

/// Save a preset to a TOML file, creating parent directories as needed.
pub fn save_preset(preset: &Preset, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
    }

    let content = preset_to_toml(preset)?;
    std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
    tracing::debug!(path = %path.display(), name = %preset.name, "preset saved");
    Ok(())
}

/// Parse a preset from a TOML string.
pub fn preset_from_toml(toml_str: &str) -> Result<Preset, ConfigError> {
    Ok(toml::from_str(toml_str)?)
}

/// Render a preset as a TOML string.
pub fn preset_to_toml(preset: &Preset) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(preset)?)
}
