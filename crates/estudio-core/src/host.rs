//! Host audio-graph capability.
//!
//! The engine never processes samples. Filtering, convolution, compression,
//! panning and spectral analysis are supplied by a host audio subsystem, and
//! [`SignalGraph`] is the seam through which the engine reaches it:
//!
//! - **Browser**: a WebAudio `AudioContext` bridged through wasm bindings
//! - **Native**: any node-graph audio runtime exposing the same primitives
//! - **Testing**: [`OfflineGraph`](crate::OfflineGraph), which records calls
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────┐
//! │   AudioEngine (routing, params)  │
//! └──────────────┬───────────────────┘
//!                │ uses SignalGraph trait
//!                ▼
//! ┌──────────────────────────────────┐
//! │        SignalGraph trait         │
//! │ context / nodes / edges / params │
//! └──────────────┬───────────────────┘
//!                │ implemented by
//!        ┌───────┴────────┐
//!        ▼                ▼
//! ┌─────────────┐  ┌─────────────┐
//! │ OfflineGraph│  │ host bridge │
//! │  (bundled)  │  │ (external)  │
//! └─────────────┘  └─────────────┘
//! ```
//!
//! Context activation may be asynchronous on some hosts. Implementations
//! complete it before returning from [`SignalGraph::create_context`] and
//! [`SignalGraph::resume_context`].

use crate::error::HostError;
use crate::impulse::ImpulseResponse;
use crate::node::{AudioParam, FilterType, NodeId, NodeKind};

/// Lifecycle state of a host audio context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContextState {
    /// Created but not producing audio (autoplay policies start here).
    Suspended,
    /// Producing audio.
    Running,
    /// Torn down; unusable until a new context is created.
    Closed,
}

impl ContextState {
    /// Returns true for states in which nodes can still be built and wired.
    pub fn is_usable(self) -> bool {
        matches!(self, Self::Suspended | Self::Running)
    }
}

/// A host audio-processing graph.
///
/// One implementor owns one audio context at a time. All calls come from the
/// engine's single control thread.
///
/// ## Playback elements
///
/// [`Element`](Self::Element) is whatever the host plays from (a media
/// element handle, a decoder, a file path). Hosts typically forbid creating a
/// second source node for the same element; the engine guarantees it asks at
/// most once per bound element, and hosts are expected to reject repeats with
/// [`HostError::SourceAlreadyCreated`].
pub trait SignalGraph {
    /// Playback element a source node is created from.
    type Element: PartialEq + Clone + core::fmt::Debug;

    /// Human-readable name of this host (e.g. "webaudio", "offline").
    fn name(&self) -> &str;

    /// Creates a fresh audio context, replacing a closed one.
    fn create_context(&mut self) -> Result<(), HostError>;

    /// State of the current context, or `None` if none was ever created.
    fn context_state(&self) -> Option<ContextState>;

    /// Moves a suspended context to running.
    fn resume_context(&mut self) -> Result<(), HostError>;

    /// Closes the current context. Its nodes become unusable.
    fn close_context(&mut self) -> Result<(), HostError>;

    /// Sample rate of the context in Hz.
    fn sample_rate(&self) -> f32;

    /// Context clock in seconds; parameter writes are stamped with it.
    fn current_time(&self) -> f64;

    /// The context's final output node.
    fn destination(&self) -> Result<NodeId, HostError>;

    /// Builds a processing node of the given kind.
    fn create_node(&mut self, kind: NodeKind) -> Result<NodeId, HostError>;

    /// Builds a source node that streams audio from `element`.
    fn create_media_element_source(&mut self, element: &Self::Element)
    -> Result<NodeId, HostError>;

    /// Routes the output of `from` into the input of `to`.
    ///
    /// Connecting an already connected pair is a no-op.
    fn connect(&mut self, from: NodeId, to: NodeId) -> Result<(), HostError>;

    /// Removes every outgoing connection of `node`.
    ///
    /// Fails with [`HostError::NotConnected`] if there were none.
    fn disconnect(&mut self, node: NodeId) -> Result<(), HostError>;

    /// Sets `param` on `node` to `value` at context time `at_time`.
    fn set_param(
        &mut self,
        node: NodeId,
        param: AudioParam,
        value: f32,
        at_time: f64,
    ) -> Result<(), HostError>;

    /// Selects the response shape of a biquad node.
    fn set_filter_type(&mut self, node: NodeId, filter: FilterType) -> Result<(), HostError>;

    /// Sets the FFT window of an analyser node.
    fn set_fft_size(&mut self, node: NodeId, fft_size: usize) -> Result<(), HostError>;

    /// Number of frequency bins an analyser reports (half its FFT size).
    fn frequency_bin_count(&self, node: NodeId) -> Result<usize, HostError>;

    /// Copies the analyser's current byte-scaled magnitudes into `out`.
    fn byte_frequency_data(&mut self, node: NodeId, out: &mut [u8]) -> Result<(), HostError>;

    /// Installs `buffer` as the impulse response of a convolver node.
    fn set_convolver_buffer(
        &mut self,
        node: NodeId,
        buffer: ImpulseResponse,
    ) -> Result<(), HostError>;
}
