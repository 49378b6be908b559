//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use estudio_config::{ConfigError, Preset, load_settings_or_default, resolve_preset, settings_path};
use estudio_core::{AudioEngine, EngineConfig, MediaElement, OfflineGraph};

/// Parse a comma-separated list of EQ gains in dB, e.g. `"3,-2,0.5"`.
pub fn parse_eq(s: &str) -> Result<Vec<f32>, String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<f32>()
                .map_err(|_| format!("Invalid EQ gain: '{part}' (expected a number in dB)"))
        })
        .collect()
}

/// Load a preset by factory name, user/system preset name, or file path.
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    match resolve_preset(name) {
        Ok(preset) => Ok(preset),
        Err(ConfigError::PresetNotFound(_)) => anyhow::bail!(
            "Preset '{name}' not found. Use 'estudio presets list' to see available presets."
        ),
        Err(err) => Err(err).with_context(|| format!("loading preset '{name}'")),
    }
}

/// User engine settings, or defaults when the settings file is missing or
/// invalid.
pub fn engine_settings() -> EngineConfig {
    load_settings_or_default(settings_path())
}

/// An initialized engine on the offline host with one bound element.
pub fn offline_engine(
    sample_rate: f32,
    config: EngineConfig,
) -> anyhow::Result<AudioEngine<OfflineGraph>> {
    let mut engine = AudioEngine::with_config(OfflineGraph::new(sample_rate), config);
    engine
        .connect_to_element(&MediaElement::new("cli"))
        .context("building engine graph")?;
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_eq_accepts_lists() {
        assert_eq!(parse_eq("3,-2"), Ok(vec![3.0, -2.0]));
        assert_eq!(parse_eq(" 1.5 , 0 ,"), Ok(vec![1.5, 0.0]));
        assert_eq!(parse_eq(""), Ok(vec![]));
    }

    #[test]
    fn parse_eq_rejects_garbage() {
        assert!(parse_eq("3,loud").is_err());
    }

    #[test]
    fn offline_engine_is_bound() {
        let engine = offline_engine(8000.0, EngineConfig::default().with_impulse(0.01, 2.0)).unwrap();
        assert!(engine.source().is_some());
    }
}
