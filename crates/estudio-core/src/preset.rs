//! Named parameter bundles.

use serde::{Deserialize, Serialize};

/// A named bundle of engine parameter values.
///
/// Every parameter is optional. [`AudioEngine::apply_preset`](crate::AudioEngine::apply_preset)
/// applies only the fields that are present, in the fixed order preamp →
/// panner → reverb mix → EQ bands, and leaves everything else untouched.
///
/// # TOML Format
///
/// ```toml
/// name = "Vocal Presence"
/// description = "Lifted mids, a touch of room"
/// preamp = -1.5
/// reverb_mix = 0.2
/// eq = [-2.0, -1.0, 0.0, 0.0, 1.0, 3.0, 4.0, 2.0, 0.0, -1.0]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Display name.
    pub name: String,

    /// Free-form description. Metadata only; never applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Preamp gain in decibels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preamp: Option<f32>,

    /// Stereo pan position, nominally in \[-1.0, 1.0\].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panner: Option<f32>,

    /// Reverb wet ratio in \[0.0, 1.0\]. Also read from `reverbMix`.
    #[serde(default, alias = "reverbMix", skip_serializing_if = "Option::is_none")]
    pub reverb_mix: Option<f32>,

    /// Per-band EQ gains in decibels, lowest band first. May be shorter than
    /// the band count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eq: Option<Vec<f32>>,
}

impl Preset {
    /// Creates a preset that changes nothing.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the preamp gain in dB.
    pub fn with_preamp(mut self, db: f32) -> Self {
        self.preamp = Some(db);
        self
    }

    /// Sets the pan position.
    pub fn with_panner(mut self, pan: f32) -> Self {
        self.panner = Some(pan);
        self
    }

    /// Sets the reverb wet ratio.
    pub fn with_reverb_mix(mut self, mix: f32) -> Self {
        self.reverb_mix = Some(mix);
        self
    }

    /// Sets the EQ band gains in dB.
    pub fn with_eq(mut self, gains: impl Into<Vec<f32>>) -> Self {
        self.eq = Some(gains.into());
        self
    }

    /// Returns true if applying this preset would change nothing.
    pub fn is_empty(&self) -> bool {
        self.preamp.is_none()
            && self.panner.is_none()
            && self.reverb_mix.is_none()
            && self.eq.as_ref().is_none_or(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_preset_is_empty() {
        let preset = Preset::new("Blank");
        assert_eq!(preset.name, "Blank");
        assert!(preset.is_empty());
    }

    #[test]
    fn builder_sets_fields() {
        let preset = Preset::new("Mix")
            .with_description("test")
            .with_preamp(-3.0)
            .with_panner(0.5)
            .with_reverb_mix(0.4)
            .with_eq([1.0, 2.0]);
        assert_eq!(preset.description.as_deref(), Some("test"));
        assert_eq!(preset.preamp, Some(-3.0));
        assert_eq!(preset.panner, Some(0.5));
        assert_eq!(preset.reverb_mix, Some(0.4));
        assert_eq!(preset.eq, Some(vec![1.0, 2.0]));
        assert!(!preset.is_empty());
    }

    #[test]
    fn empty_eq_counts_as_empty() {
        assert!(Preset::new("x").with_eq(Vec::new()).is_empty());
    }

    #[test]
    fn toml_omits_absent_fields() {
        let text = toml::to_string(&Preset::new("x").with_eq([3.0, -2.0])).unwrap();
        assert!(text.contains("name = \"x\""));
        assert!(text.contains("eq = [3.0, -2.0]"));
        assert!(!text.contains("preamp"));
        assert!(!text.contains("reverb_mix"));
    }

    #[test]
    fn toml_missing_fields_deserialize_as_none() {
        let preset: Preset = toml::from_str("name = \"x\"\npanner = -0.25\n").unwrap();
        assert_eq!(preset.panner, Some(-0.25));
        assert!(preset.preamp.is_none());
        assert!(preset.eq.is_none());
    }

    #[test]
    fn camel_case_reverb_mix_is_accepted() {
        let preset: Preset = toml::from_str("name = \"Hall\"\nreverbMix = 0.5\n").unwrap();
        assert_eq!(preset.reverb_mix, Some(0.5));
        let text = toml::to_string(&preset).unwrap();
        assert!(text.contains("reverb_mix = 0.5"));
    }
}
