//! Engine construction settings.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::impulse::{DEFAULT_IMPULSE_DECAY, DEFAULT_IMPULSE_DURATION};

/// Analyser FFT window used when none is configured.
pub const DEFAULT_FFT_SIZE: usize = 2048;

/// Reverb wet ratio before any preset or setter runs.
pub const DEFAULT_REVERB_MIX: f32 = 0.3;

/// Smallest FFT size hosts accept.
pub const MIN_FFT_SIZE: usize = 32;

/// Largest FFT size hosts accept.
pub const MAX_FFT_SIZE: usize = 32768;

/// Settings read once when an [`AudioEngine`](crate::AudioEngine) is built.
///
/// `Default` reproduces the engine's stock behavior: 2048-point analyser,
/// 2-second impulse response with decay exponent 2, 30% wet.
///
/// # TOML Format
///
/// ```toml
/// fft_size = 2048
/// impulse_duration = 2.0
/// impulse_decay = 2.0
/// default_reverb_mix = 0.3
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Analyser FFT window (power of two in \[32, 32768\]).
    pub fft_size: usize,

    /// Synthesized impulse response length in seconds.
    pub impulse_duration: f32,

    /// Impulse response envelope exponent.
    pub impulse_decay: f32,

    /// Wet ratio applied at init unless a setter ran first.
    pub default_reverb_mix: f32,

    /// Fixed seed for impulse noise. `None` seeds from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fft_size: DEFAULT_FFT_SIZE,
            impulse_duration: DEFAULT_IMPULSE_DURATION,
            impulse_decay: DEFAULT_IMPULSE_DECAY,
            default_reverb_mix: DEFAULT_REVERB_MIX,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Sets a fixed impulse seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the analyser FFT size.
    pub fn with_fft_size(mut self, fft_size: usize) -> Self {
        self.fft_size = fft_size;
        self
    }

    /// Sets the impulse response shape.
    pub fn with_impulse(mut self, duration: f32, decay: f32) -> Self {
        self.impulse_duration = duration;
        self.impulse_decay = decay;
        self
    }

    /// Checks every field against what hosts accept.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.fft_size.is_power_of_two()
            || !(MIN_FFT_SIZE..=MAX_FFT_SIZE).contains(&self.fft_size)
        {
            return Err(EngineError::InvalidConfig(format!(
                "fft_size {} must be a power of two in [{MIN_FFT_SIZE}, {MAX_FFT_SIZE}]",
                self.fft_size
            )));
        }
        if !self.impulse_duration.is_finite() || self.impulse_duration <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "impulse_duration {} must be positive",
                self.impulse_duration
            )));
        }
        if !self.impulse_decay.is_finite() || self.impulse_decay < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "impulse_decay {} must be non-negative",
                self.impulse_decay
            )));
        }
        if !self.default_reverb_mix.is_finite() {
            return Err(EngineError::InvalidConfig(
                "default_reverb_mix must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_stock_engine() {
        let config = EngineConfig::default();
        assert_eq!(config.fft_size, 2048);
        assert_eq!(config.impulse_duration, 2.0);
        assert_eq!(config.impulse_decay, 2.0);
        assert_eq!(config.default_reverb_mix, 0.3);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_fft_sizes() {
        for size in [0, 16, 1000, 65536] {
            let config = EngineConfig::default().with_fft_size(size);
            assert!(config.validate().is_err(), "fft_size {size}");
        }
        assert!(EngineConfig::default().with_fft_size(32).validate().is_ok());
        assert!(EngineConfig::default().with_fft_size(32768).validate().is_ok());
    }

    #[test]
    fn rejects_bad_impulse_shape() {
        assert!(EngineConfig::default().with_impulse(0.0, 2.0).validate().is_err());
        assert!(EngineConfig::default().with_impulse(1.0, -1.0).validate().is_err());
        assert!(EngineConfig::default().with_impulse(f32::INFINITY, 2.0).validate().is_err());
        assert!(EngineConfig::default().with_impulse(0.5, 0.0).validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: EngineConfig = toml::from_str("seed = 9\nfft_size = 4096\n").unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.fft_size, 4096);
        assert_eq!(config.impulse_duration, 2.0);
    }
}
