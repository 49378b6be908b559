//! Error types for configuration operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to remove a file
    #[error("failed to remove file '{path}': {source}")]
    RemoveFile {
        /// Path of the file that could not be removed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Preset not found
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// Preset values out of range
    #[error("validation failed: {0}")]
    Validation(#[from] crate::validation::ValidationError),

    /// Engine settings rejected
    #[error("invalid engine settings: {0}")]
    Settings(#[from] estudio_core::EngineError),

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a remove file error.
    pub fn remove_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::RemoveFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn io_variants_carry_path_and_source() {
        let err = ConfigError::read_file("/a/b.toml", mock_io_err());
        assert!(err.to_string().contains("failed to read file"));
        assert!(err.to_string().contains("/a/b.toml"));
        assert!(err.source().is_some());

        let err = ConfigError::write_file("/out.toml", mock_io_err());
        assert!(matches!(err, ConfigError::WriteFile { ref path, .. } if path == std::path::Path::new("/out.toml")));

        let err = ConfigError::remove_file("/gone.toml", mock_io_err());
        assert!(err.to_string().starts_with("failed to remove file"));

        let err = ConfigError::create_dir("/dir", mock_io_err());
        assert!(err.to_string().contains("failed to create directory"));
        assert!(err.source().is_some());
    }

    #[test]
    fn preset_not_found_display() {
        let err = ConfigError::PresetNotFound("rock".to_string());
        assert_eq!(err.to_string(), "preset not found: rock");
        assert!(err.source().is_none());
    }

    #[test]
    fn validation_converts() {
        let err: ConfigError = ValidationError::EmptyName.into();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().starts_with("validation failed"));
    }

    #[test]
    fn engine_error_converts() {
        let err: ConfigError = estudio_core::EngineError::InvalidConfig("bad".into()).into();
        assert!(matches!(err, ConfigError::Settings(_)));
    }
}
