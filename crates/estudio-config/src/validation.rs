//! Preset validation.
//!
//! The engine accepts any float for any parameter (only the reverb mix is
//! clamped). Validation is a file-level concern: it catches presets that
//! would deafen, silence or confuse a listener before they are saved or
//! applied.
//!
//! | Field        | Accepted range      |
//! |--------------|---------------------|
//! | `name`       | non-empty           |
//! | `preamp`     | \[-40, 40\] dB      |
//! | `panner`     | \[-1, 1\]           |
//! | `reverb_mix` | \[0, 1\]            |
//! | `eq[i]`      | \[-40, 40\] dB      |
//! | `eq.len()`   | at most 10          |
//!
//! Non-finite values are rejected everywhere.
//!
//! # Example
//!
//! ```rust
//! use estudio_config::{ValidationError, validate_preset};
//! use estudio_core::Preset;
//!
//! assert!(validate_preset(&Preset::new("Ok").with_panner(0.5)).is_ok());
//!
//! let err = validate_preset(&Preset::new("Loud").with_preamp(60.0)).unwrap_err();
//! assert!(matches!(err, ValidationError::OutOfRange { .. }));
//! ```

use estudio_core::{BAND_COUNT, Preset};
use thiserror::Error;

/// Lowest accepted gain in decibels, preamp and EQ alike.
pub const MIN_GAIN_DB: f32 = -40.0;

/// Highest accepted gain in decibels, preamp and EQ alike.
pub const MAX_GAIN_DB: f32 = 40.0;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The preset has an empty or whitespace-only name.
    #[error("preset name is empty")]
    EmptyName,

    /// A value is NaN or infinite.
    #[error("parameter '{param}' is not a finite number")]
    NonFinite {
        /// Name of the parameter.
        param: String,
    },

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// More EQ entries than the engine has bands.
    #[error("eq has {count} entries but only {max} bands exist")]
    TooManyBands {
        /// Number of entries in the preset.
        count: usize,
        /// Number of bands.
        max: usize,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a single named value against `[min, max]`.
pub fn validate_range(param: &str, value: f32, min: f32, max: f32) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite {
            param: param.to_string(),
        });
    }
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            param: param.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Validate every field of a preset.
///
/// All problems are collected; a single problem is returned as itself,
/// several as [`ValidationError::Multiple`].
pub fn validate_preset(preset: &Preset) -> ValidationResult<()> {
    let mut errors = Vec::new();

    if preset.name.trim().is_empty() {
        errors.push(ValidationError::EmptyName);
    }

    let scalars = [
        ("preamp", preset.preamp, MIN_GAIN_DB, MAX_GAIN_DB),
        ("panner", preset.panner, -1.0, 1.0),
        ("reverb_mix", preset.reverb_mix, 0.0, 1.0),
    ];
    for (param, value, min, max) in scalars {
        if let Some(value) = value
            && let Err(e) = validate_range(param, value, min, max)
        {
            errors.push(e);
        }
    }

    if let Some(eq) = &preset.eq {
        if eq.len() > BAND_COUNT {
            errors.push(ValidationError::TooManyBands {
                count: eq.len(),
                max: BAND_COUNT,
            });
        }
        for (index, &db) in eq.iter().enumerate() {
            if let Err(e) = validate_range(&format!("eq[{index}]"), db, MIN_GAIN_DB, MAX_GAIN_DB) {
                errors.push(e);
            }
        }
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
