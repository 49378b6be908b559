//! Platform-specific paths for presets and configuration.
//!
//! # Directory Structure
//!
//! - **User presets**: `~/.config/estudio/presets/` (Linux), `~/Library/Application Support/estudio/presets/` (macOS), `%APPDATA%\estudio\presets\` (Windows)
//! - **User config**: `~/.config/estudio/` (Linux), `~/Library/Application Support/estudio/` (macOS), `%APPDATA%\estudio\` (Windows)
//! - **System presets**: `/usr/share/estudio/presets/` (Linux), `/Library/Application Support/estudio/presets/` (macOS)
//!
//! # Example
//!
//! ```rust,no_run
//! use estudio_config::paths;
//!
//! let presets_dir = paths::user_presets_dir();
//! println!("User presets: {:?}", presets_dir);
//!
//! // Factory presets win over files of the same name.
//! let preset = paths::resolve_preset("vocal").unwrap();
//! assert_eq!(preset.name, "Vocal");
//! ```

use std::path::{Path, PathBuf};

use estudio_core::Preset;

use crate::error::ConfigError;
use crate::factory_presets::get_factory_preset;
use crate::preset_file::load_preset;

/// Application name used for directory paths.
const APP_NAME: &str = "estudio";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// Returns the user-specific presets directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_presets_dir() -> PathBuf {
    user_config_dir().join(PRESETS_SUBDIR)
}

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the system-wide presets directory.
///
/// This directory is typically read-only.
pub fn system_presets_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        PathBuf::from("/usr/share").join(APP_NAME).join(PRESETS_SUBDIR)
    }
    #[cfg(target_os = "macos")]
    {
        PathBuf::from("/Library/Application Support")
            .join(APP_NAME)
            .join(PRESETS_SUBDIR)
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join(PRESETS_SUBDIR)
    }
}

/// Find a preset file by name.
///
/// Searches in the following order:
/// 1. `name` as a path, if it is an existing file
/// 2. User presets directory
/// 3. System presets directory
///
/// A `.toml` extension is added to bare names.
pub fn find_preset(name: &str) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = preset_filename(name);
    [user_presets_dir(), system_presets_dir()]
        .into_iter()
        .map(|dir| dir.join(&filename))
        .find(|candidate| candidate.is_file())
}

/// Resolve a preset by name: factory presets first, then files via
/// [`find_preset`].
///
/// # Errors
///
/// [`ConfigError::PresetNotFound`] if nothing matches, or the load error of
/// a matching file.
pub fn resolve_preset(name: &str) -> Result<Preset, ConfigError> {
    if let Some(preset) = get_factory_preset(name) {
        tracing::debug!(name, "resolved factory preset");
        return Ok(preset);
    }
    let path = find_preset(name).ok_or_else(|| ConfigError::PresetNotFound(name.to_string()))?;
    load_preset(path)
}

/// File name for a user preset: `name` with `.toml` appended if missing.
pub fn preset_filename(name: &str) -> String {
    if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    }
}

/// Ensure the user presets directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_presets_dir() -> Result<PathBuf, ConfigError> {
    ensure_dir(user_presets_dir())
}

/// Ensure the user config directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    ensure_dir(user_config_dir())
}

fn ensure_dir(dir: PathBuf) -> Result<PathBuf, ConfigError> {
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// List all preset files in the user presets directory.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// List all preset files in the system presets directory.
pub fn list_system_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&system_presets_dir())
}

/// List all preset files, user first, then system.
///
/// Duplicate names are not filtered; the caller handles precedence.
pub fn list_all_presets() -> Vec<PathBuf> {
    let mut presets = list_user_presets();
    presets.extend(list_system_presets());
    presets
}

/// List `.toml` files in `dir`, sorted by path.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    presets.sort();
    presets
}

/// Get the preset name from a file path (the file stem).
///
/// # Example
///
/// ```rust
/// use estudio_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/path/to/late_night.toml"));
/// assert_eq!(name, Some("late_night".to_string()));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dirs_contain_app_name() {
        assert!(user_presets_dir().to_string_lossy().contains("estudio"));
        assert!(user_presets_dir().ends_with("presets"));
        assert!(user_config_dir().to_string_lossy().contains("estudio"));
        assert!(system_presets_dir().to_string_lossy().contains("estudio"));
    }

    #[test]
    fn test_find_preset_by_path() {
        let temp_dir = TempDir::new().unwrap();
        let preset_path = temp_dir.path().join("test.toml");
        fs::write(&preset_path, "name = \"test\"").unwrap();

        assert_eq!(find_preset(preset_path.to_str().unwrap()), Some(preset_path));
    }

    #[test]
    fn test_find_preset_not_found() {
        assert!(find_preset("nonexistent_preset_12345").is_none());
    }

    #[test]
    fn test_resolve_prefers_factory() {
        let preset = resolve_preset("Rock").unwrap();
        assert_eq!(preset.name, "Rock");
    }

    #[test]
    fn test_resolve_loads_file_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mine.toml");
        fs::write(&path, "name = \"Mine\"\npanner = 0.25\n").unwrap();

        let preset = resolve_preset(path.to_str().unwrap()).unwrap();
        assert_eq!(preset.name, "Mine");
        assert_eq!(preset.panner, Some(0.25));
    }

    #[test]
    fn test_resolve_missing() {
        assert!(matches!(
            resolve_preset("nonexistent_preset_12345"),
            Err(ConfigError::PresetNotFound(_))
        ));
    }

    #[test]
    fn test_list_presets_in_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.toml"), "").unwrap();
        fs::write(temp_dir.path().join("a.toml"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let presets = list_presets_in_dir(temp_dir.path());
        let names: Vec<_> = presets
            .iter()
            .filter_map(|p| preset_name_from_path(p))
            .collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_list_presets_nonexistent_dir() {
        assert!(list_presets_in_dir(Path::new("/nonexistent/path/12345")).is_empty());
    }

    #[test]
    fn test_preset_filename() {
        assert_eq!(preset_filename("warm"), "warm.toml");
        assert_eq!(preset_filename("warm.toml"), "warm.toml");
    }
}
