//! Gain conversions and mix clamping.

/// Convert decibels to linear amplitude: `10^(db / 20)`.
///
/// # Example
/// ```rust
/// use estudio_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
/// assert!((db_to_linear(20.0) - 10.0).abs() < 1e-4);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Convert linear amplitude to decibels.
///
/// Inputs at or below `1e-10` are floored there to keep the result finite.
///
/// # Example
/// ```rust
/// use estudio_core::linear_to_db;
///
/// assert!(linear_to_db(1.0).abs() < 1e-6);
/// assert!((linear_to_db(10.0) - 20.0).abs() < 1e-4);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    20.0 * linear.max(1e-10).log10()
}

/// Clamp a wet/dry ratio into \[0.0, 1.0\]. NaN maps to 0.0 (all dry).
#[inline]
pub fn clamp_mix(mix: f32) -> f32 {
    if mix.is_nan() { 0.0 } else { mix.clamp(0.0, 1.0) }
}

/// Linear wet/dry split for a mix ratio: returns `(wet, dry)`.
///
/// The two gains always sum to 1.0. This is a linear crossfade, not an
/// equal-power one, so the summed level dips slightly mid-way for
/// uncorrelated wet and dry signals.
#[inline]
pub fn wet_dry_gains(mix: f32) -> (f32, f32) {
    let mix = clamp_mix(mix);
    (mix, 1.0 - mix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_to_linear_matches_reference_points() {
        assert!((db_to_linear(-6.0206) - 0.5).abs() < 1e-4);
        assert!((db_to_linear(6.0206) - 2.0).abs() < 1e-3);
        assert!((db_to_linear(-20.0) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn linear_to_db_floors_silence() {
        assert!(linear_to_db(0.0).is_finite());
        assert!((linear_to_db(0.0) + 200.0).abs() < 1e-3);
    }

    #[test]
    fn clamp_mix_bounds() {
        assert_eq!(clamp_mix(-0.5), 0.0);
        assert_eq!(clamp_mix(1.5), 1.0);
        assert_eq!(clamp_mix(0.25), 0.25);
        assert_eq!(clamp_mix(f32::NAN), 0.0);
    }

    #[test]
    fn wet_dry_gains_sum_to_one() {
        for i in 0..=10 {
            let mix = i as f32 / 10.0;
            let (wet, dry) = wet_dry_gains(mix);
            assert_eq!(wet, mix);
            assert!((wet + dry - 1.0).abs() < 1e-6);
        }
    }
}
