//! Synthetic reverb impulse responses.
//!
//! The convolver needs an impulse response to produce a tail. Instead of
//! loading a recorded room, the engine generates one: white noise shaped by a
//! power-law decay,
//!
//! ```text
//! h[i] = u(-1, 1) * (1 - i / N) ^ decay
//! ```
//!
//! where `N = floor(sample_rate * duration)`. Larger `decay` exponents make the
//! tail die away faster; `decay = 0` leaves flat noise. Both channels get
//! independent noise so the tail decorrelates left and right.
//!
//! Noise comes from a caller-supplied [`rand::Rng`], so seeding the generator
//! reproduces a buffer exactly.

use rand::Rng;

/// Number of channels in every synthesized impulse response.
pub const IMPULSE_CHANNELS: usize = 2;

/// Default tail length in seconds.
pub const DEFAULT_IMPULSE_DURATION: f32 = 2.0;

/// Default envelope exponent.
pub const DEFAULT_IMPULSE_DECAY: f32 = 2.0;

/// Longest impulse response the engine will synthesize, in frames per
/// channel: one minute at 192 kHz.
pub const MAX_IMPULSE_FRAMES: usize = 192_000 * 60;

/// A multi-channel impulse response buffer, one `Vec<f32>` per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpulseResponse {
    sample_rate: f32,
    channels: Vec<Vec<f32>>,
}

impl ImpulseResponse {
    /// Generates a decaying-noise impulse response.
    ///
    /// Non-positive or non-finite `duration_seconds` yields an empty buffer.
    ///
    /// # Example
    ///
    /// ```rust
    /// use estudio_core::ImpulseResponse;
    /// use rand::SeedableRng;
    ///
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    /// let ir = ImpulseResponse::synthesize(48000.0, 0.5, 2.0, &mut rng);
    /// assert_eq!(ir.channel_count(), 2);
    /// assert_eq!(ir.len(), 24000);
    /// ```
    pub fn synthesize<R: Rng + ?Sized>(
        sample_rate: f32,
        duration_seconds: f32,
        decay: f32,
        rng: &mut R,
    ) -> Self {
        let len = frame_count(sample_rate, duration_seconds);
        let channels = (0..IMPULSE_CHANNELS)
            .map(|_| {
                (0..len)
                    .map(|i| rng.gen_range(-1.0_f32..1.0) * envelope(i, len, decay))
                    .collect()
            })
            .collect();

        Self {
            sample_rate,
            channels,
        }
    }

    /// Wraps existing channel data. All channels must share one length.
    ///
    /// Returns `None` if the channel lengths differ.
    pub fn from_channels(sample_rate: f32, channels: Vec<Vec<f32>>) -> Option<Self> {
        let len = channels.first().map_or(0, Vec::len);
        if channels.iter().any(|ch| ch.len() != len) {
            return None;
        }
        Some(Self {
            sample_rate,
            channels,
        })
    }

    /// Sample rate the buffer was generated for.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Length in frames.
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Returns true if the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length in seconds.
    pub fn duration_seconds(&self) -> f32 {
        if self.sample_rate > 0.0 {
            self.len() as f32 / self.sample_rate
        } else {
            0.0
        }
    }

    /// Samples of one channel.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// All channels.
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Interleaves the channels frame by frame: `[L0, R0, L1, R1, ...]`.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.len() * self.channel_count());
        for frame in 0..self.len() {
            out.extend(self.channels.iter().map(|ch| ch[frame]));
        }
        out
    }
}

/// Frames in a buffer of `duration_seconds` at `sample_rate`, truncated.
pub fn frame_count(sample_rate: f32, duration_seconds: f32) -> usize {
    let frames = f64::from(sample_rate) * f64::from(duration_seconds);
    if frames.is_finite() && frames > 0.0 {
        frames as usize
    } else {
        0
    }
}

/// Frame count for `duration_seconds` at `sample_rate`, or `None` if it
/// exceeds [`MAX_IMPULSE_FRAMES`].
pub fn bounded_frame_count(sample_rate: f32, duration_seconds: f32) -> Option<usize> {
    let frames = frame_count(sample_rate, duration_seconds);
    (frames <= MAX_IMPULSE_FRAMES).then_some(frames)
}

/// Envelope weight `(1 - i/len)^decay` applied to frame `i`.
#[inline]
pub fn envelope(i: usize, len: usize, decay: f32) -> f32 {
    if len == 0 {
        return 0.0;
    }
    let remaining = 1.0 - i as f64 / len as f64;
    remaining.powf(f64::from(decay)) as f32
}
