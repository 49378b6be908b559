//! Preset files, factory presets, validation and settings for estudio.
//!
//! The engine in `estudio-core` only knows in-memory [`Preset`] values. This
//! crate gives them a home on disk and a set of built-ins.
//!
//! # Features
//!
//! - **Preset Files**: Load and save presets as TOML
//! - **Factory Presets**: Built-in presets compiled into the library
//! - **Validation**: Range checks on every preset field
//! - **Paths**: Platform-specific preset and config directories
//! - **Settings**: Persisted [`EngineConfig`](estudio_core::EngineConfig)
//!
//! # Example
//!
//! ```rust,no_run
//! use estudio_config::{resolve_preset, save_preset, user_presets_dir, validate_preset};
//! use estudio_core::Preset;
//!
//! // Factory name or user file
//! let vocal = resolve_preset("vocal").unwrap();
//!
//! let mine = Preset::new("Late Night")
//!     .with_preamp(-6.0)
//!     .with_eq([3.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, -2.0, -3.0, -4.0]);
//! validate_preset(&mine).unwrap();
//! save_preset(&mine, user_presets_dir().join("late_night.toml")).unwrap();
//! ```

mod error;
mod preset_file;

/// Platform-specific paths for presets and configuration.
pub mod paths;

/// Preset validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

/// Engine settings file.
pub mod settings;

pub use error::ConfigError;
pub use estudio_core::Preset;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use paths::{
    ensure_user_config_dir, ensure_user_presets_dir, find_preset, list_all_presets,
    list_system_presets, list_user_presets, preset_filename, preset_name_from_path,
    resolve_preset, system_presets_dir, user_config_dir, user_presets_dir,
};
pub use preset_file::{load_preset, preset_from_toml, preset_to_toml, save_preset};
pub use settings::{
    SETTINGS_FILE, load_settings, load_settings_or_default, save_settings, settings_path,
};
pub use validation::{ValidationError, ValidationResult, validate_preset, validate_range};
