//! Factory presets bundled with estudio.
//!
//! These are embedded at compile time as TOML and always available without
//! external files. EQ lists are ordered like the engine's bands:
//! 31, 62, 125, 250, 500, 1k, 2k, 4k, 8k and 16k Hz.

use estudio_core::Preset;

use crate::preset_file::preset_from_toml;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "flat",
    "bass_boost",
    "treble_boost",
    "vocal",
    "rock",
    "jazz",
    "electronic",
    "small_room",
    "concert_hall",
    "wide_left",
    "wide_right",
];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("flat", FLAT_PRESET),
    ("bass_boost", BASS_BOOST_PRESET),
    ("treble_boost", TREBLE_BOOST_PRESET),
    ("vocal", VOCAL_PRESET),
    ("rock", ROCK_PRESET),
    ("jazz", JAZZ_PRESET),
    ("electronic", ELECTRONIC_PRESET),
    ("small_room", SMALL_ROOM_PRESET),
    ("concert_hall", CONCERT_HALL_PRESET),
    ("wide_left", WIDE_LEFT_PRESET),
    ("wide_right", WIDE_RIGHT_PRESET),
];

/// Flat - every control at its neutral position.
const FLAT_PRESET: &str = r#"
name = "Flat"
description = "Neutral: unity preamp, centered, dry, all bands at 0 dB"
preamp = 0.0
panner = 0.0
reverb_mix = 0.0
eq = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
"#;

const BASS_BOOST_PRESET: &str = r#"
name = "Bass Boost"
description = "Lifted sub and low bass with headroom trimmed to match"
preamp = -3.0
eq = [6.0, 5.0, 4.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
"#;

const TREBLE_BOOST_PRESET: &str = r#"
name = "Treble Boost"
description = "Brighter top end for dull recordings"
preamp = -2.0
eq = [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 4.0, 5.0, 6.0]
"#;

/// Vocal - presence lift, low cut, light room.
const VOCAL_PRESET: &str = r#"
name = "Vocal"
description = "Presence lift with reduced low end and a light room"
preamp = -1.0
reverb_mix = 0.15
eq = [-4.0, -3.0, -1.0, 0.0, 1.0, 3.0, 4.0, 3.0, 1.0, 0.0]
"#;

const ROCK_PRESET: &str = r#"
name = "Rock"
description = "Scooped mids with punchy lows and crisp highs"
preamp = -2.0
reverb_mix = 0.1
eq = [4.0, 3.0, 1.0, -1.0, -2.0, -1.0, 1.0, 3.0, 4.0, 4.0]
"#;

const JAZZ_PRESET: &str = r#"
name = "Jazz"
description = "Warm low mids, softened top, small club ambience"
reverb_mix = 0.2
eq = [2.0, 2.0, 1.0, 2.0, -1.0, -1.0, 0.0, 1.0, 2.0, 1.0]
"#;

const ELECTRONIC_PRESET: &str = r#"
name = "Electronic"
description = "Deep sub, tucked mids, airy top"
preamp = -3.0
eq = [6.0, 5.0, 2.0, 0.0, -2.0, 0.0, 1.0, 2.0, 4.0, 5.0]
"#;

/// Small room - reverb only, EQ untouched.
const SMALL_ROOM_PRESET: &str = r#"
name = "Small Room"
description = "Short, subtle room reverb"
reverb_mix = 0.2
"#;

const CONCERT_HALL_PRESET: &str = r#"
name = "Concert Hall"
description = "Wet hall sound with a gentle high roll-off"
reverb_mix = 0.55
eq = [1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0, -2.0, -3.0]
"#;

const WIDE_LEFT_PRESET: &str = r#"
name = "Wide Left"
description = "Panned hard left"
panner = -1.0
"#;

const WIDE_RIGHT_PRESET: &str = r#"
name = "Wide Right"
description = "Panned hard right"
panner = 1.0
"#;

/// Get all factory presets.
///
/// Returns a vector of all built-in presets, in [`FACTORY_PRESET_NAMES`] order.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| preset_from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by name.
///
/// Matches case-insensitively against both the internal name (`bass_boost`)
/// and the display name (`Bass Boost`).
///
/// # Example
///
/// ```rust
/// use estudio_config::get_factory_preset;
///
/// let preset = get_factory_preset("vocal").unwrap();
/// assert_eq!(preset.name, "Vocal");
/// assert!(get_factory_preset("Bass Boost").is_some());
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();

    for (preset_name, toml) in FACTORY_PRESETS_TOML {
        if preset_name.to_lowercase() == name_lower {
            return preset_from_toml(toml).ok();
        }
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Get the internal names of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Check whether `name` refers to a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_preset;
    use estudio_core::BAND_COUNT;

    #[test]
    fn test_factory_presets_load() {
        let presets = factory_presets();
        assert_eq!(presets.len(), FACTORY_PRESETS_TOML.len());
        assert_eq!(presets.len(), FACTORY_PRESET_NAMES.len());
    }

    #[test]
    fn test_get_factory_preset() {
        assert_eq!(get_factory_preset("flat").unwrap().name, "Flat");
        assert_eq!(get_factory_preset("CONCERT_HALL").unwrap().name, "Concert Hall");
        assert_eq!(get_factory_preset("wide right").unwrap().panner, Some(1.0));
        assert!(get_factory_preset("nonexistent").is_none());
    }

    #[test]
    fn test_factory_preset_names() {
        assert_eq!(factory_preset_names(), FACTORY_PRESET_NAMES);
        assert!(is_factory_preset("rock"));
        assert!(is_factory_preset("Small Room"));
        assert!(!is_factory_preset("my_custom"));
    }

    #[test]
    fn test_all_factory_presets_valid() {
        for preset in factory_presets() {
            assert!(
                validate_preset(&preset).is_ok(),
                "factory preset '{}' is invalid",
                preset.name
            );
        }
    }

    #[test]
    fn test_flat_preset_is_neutral() {
        let flat = get_factory_preset("flat").unwrap();
        assert_eq!(flat.preamp, Some(0.0));
        assert_eq!(flat.panner, Some(0.0));
        assert_eq!(flat.reverb_mix, Some(0.0));
        assert_eq!(flat.eq, Some(vec![0.0; BAND_COUNT]));
    }

    #[test]
    fn test_room_presets_leave_eq_alone() {
        let room = get_factory_preset("small_room").unwrap();
        assert!(room.eq.is_none());
        assert!(room.preamp.is_none());
        assert_eq!(room.reverb_mix, Some(0.2));
    }
}
