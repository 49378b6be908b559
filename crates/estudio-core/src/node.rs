//! Node and parameter vocabulary shared by the engine and its hosts.
//!
//! Every processing node the engine asks a host to build is identified by a
//! [`NodeId`] and described by a [`NodeKind`]. Automatable values on those
//! nodes are addressed with [`AudioParam`].

use core::fmt;

/// Opaque identifier for a node living inside a host audio graph.
///
/// Hosts mint IDs with [`NodeId::new`]; the engine only stores and compares
/// them. IDs must stay unique for the lifetime of a host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Wraps a raw host-side identifier.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric identifier.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Processing nodes the engine can request from a host.
///
/// Playback sources and the context destination are not listed here: the
/// host creates those through dedicated calls on
/// [`SignalGraph`](crate::SignalGraph).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Scalar amplitude multiplier.
    Gain,
    /// Equal-power stereo panner driven by a single `pan` value.
    StereoPanner,
    /// Convolution reverb fed by an impulse response buffer.
    Convolver,
    /// FFT analyser exposing frequency-domain magnitudes.
    Analyser,
    /// Dynamics compressor with host-default settings.
    DynamicsCompressor,
    /// Second-order IIR filter.
    BiquadFilter,
}

impl NodeKind {
    /// Short lowercase name used in logs and CLI output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Gain => "gain",
            Self::StereoPanner => "stereo-panner",
            Self::Convolver => "convolver",
            Self::Analyser => "analyser",
            Self::DynamicsCompressor => "compressor",
            Self::BiquadFilter => "biquad",
        }
    }

    /// Parameters a node of this kind exposes.
    pub fn params(self) -> &'static [AudioParam] {
        match self {
            Self::Gain => &[AudioParam::Gain],
            Self::StereoPanner => &[AudioParam::Pan],
            Self::BiquadFilter => &[AudioParam::Frequency, AudioParam::Q, AudioParam::Gain],
            Self::Convolver | Self::Analyser | Self::DynamicsCompressor => &[],
        }
    }

    /// Returns true if `param` can be written on a node of this kind.
    pub fn supports(self, param: AudioParam) -> bool {
        self.params().contains(&param)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An automatable value on a host node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AudioParam {
    /// Linear gain on gain nodes; decibels on peaking/shelving biquads.
    Gain,
    /// Stereo position, nominally in \[-1.0, 1.0\].
    Pan,
    /// Filter center or corner frequency in Hz.
    Frequency,
    /// Filter quality factor.
    Q,
}

impl AudioParam {
    /// Value a freshly created node reports before any write.
    pub fn default_value(self, kind: NodeKind) -> f32 {
        match (self, kind) {
            (Self::Gain, NodeKind::BiquadFilter) => 0.0,
            (Self::Gain, _) => 1.0,
            (Self::Pan, _) => 0.0,
            (Self::Frequency, _) => 350.0,
            (Self::Q, _) => 1.0,
        }
    }
}

impl fmt::Display for AudioParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gain => "gain",
            Self::Pan => "pan",
            Self::Frequency => "frequency",
            Self::Q => "Q",
        })
    }
}

/// Biquad response shapes a host filter node can take.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterType {
    /// 12 dB/oct low-pass.
    #[default]
    Lowpass,
    /// 12 dB/oct high-pass.
    Highpass,
    /// Constant skirt band-pass.
    Bandpass,
    /// Low shelf boost/cut.
    Lowshelf,
    /// High shelf boost/cut.
    Highshelf,
    /// Bell boost/cut around the center frequency.
    Peaking,
    /// Band-reject.
    Notch,
    /// Phase-only all-pass.
    Allpass,
}
