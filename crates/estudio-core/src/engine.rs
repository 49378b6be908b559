//! The audio engine: a configuration layer over a host signal graph.
//!
//! [`AudioEngine`] builds a fixed node chain inside a [`SignalGraph`] host
//! (ten peaking EQ bands, compressor, preamp, wet/dry reverb split, panner,
//! analyser), wires playback sources into it, and exposes parameter setters
//! and preset application.
//!
//! # Lifecycle
//!
//! ```rust
//! use estudio_core::{AudioEngine, EngineConfig, MediaElement, OfflineGraph, Preset};
//!
//! let host = OfflineGraph::new(48000.0);
//! let mut engine = AudioEngine::with_config(host, EngineConfig::default().with_seed(1));
//!
//! engine.init()?;
//! engine.connect_to_element(&MediaElement::new("player"))?;
//! engine.apply_preset(Some(&Preset::new("Bright").with_eq([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 4.0])));
//! engine.set_reverb_mix(0.5);
//! # Ok::<(), estudio_core::EngineError>(())
//! ```
//!
//! Nodes are created once per engine. Nothing is torn down implicitly;
//! [`AudioEngine::close`] is the only teardown path.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::host::{ContextState, SignalGraph};
use crate::impulse::{ImpulseResponse, MAX_IMPULSE_FRAMES, bounded_frame_count, frame_count};
use crate::math::{clamp_mix, db_to_linear, wet_dry_gains};
use crate::node::{AudioParam, FilterType, NodeId, NodeKind};
use crate::preset::Preset;
use crate::routing::{EngineNodes, RoutingPlan};

/// Number of EQ bands.
pub const BAND_COUNT: usize = 10;

/// EQ band center frequencies in Hz, lowest first.
pub const BAND_FREQUENCIES: [f32; BAND_COUNT] = [
    31.0, 62.0, 125.0, 250.0, 500.0, 1000.0, 2000.0, 4000.0, 8000.0, 16000.0,
];

/// Quality factor of EQ band `index`: `1.0 + index * 0.3`.
///
/// Higher bands get narrower bells so the octave-spaced bands overlap less
/// at the top of the spectrum.
#[inline]
pub fn band_q(index: usize) -> f32 {
    1.0 + index as f32 * 0.3
}

/// Signal-routing and parameter layer over a host audio graph.
pub struct AudioEngine<G: SignalGraph> {
    host: G,
    config: EngineConfig,
    rng: StdRng,
    nodes: Option<EngineNodes>,
    /// Nodes built by an `init` that failed before finishing; the next
    /// `init` in the same context picks them up instead of rebuilding.
    pending_nodes: Option<EngineNodes>,
    source: Option<NodeId>,
    /// False while `source` is recorded but its edges are not all in place.
    source_routed: bool,
    connected_element: Option<G::Element>,
    reverb_mix: f32,
}

impl<G: SignalGraph> AudioEngine<G> {
    /// Creates an uninitialized engine with default settings.
    pub fn new(host: G) -> Self {
        Self::with_config(host, EngineConfig::default())
    }

    /// Creates an uninitialized engine with explicit settings.
    ///
    /// Nothing touches the host until [`init()`](Self::init).
    pub fn with_config(host: G, config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let reverb_mix = clamp_mix(config.default_reverb_mix);
        Self {
            host,
            config,
            rng,
            nodes: None,
            pending_nodes: None,
            source: None,
            source_routed: false,
            connected_element: None,
            reverb_mix,
        }
    }

    // --- Lifecycle ---

    /// Builds the context and node chain. A no-op once initialized.
    ///
    /// Creates (in order) the preamp gain at unity, the stereo panner, the
    /// convolver, the analyser, the compressor, the wet and dry gains, and ten
    /// peaking bands at [`BAND_FREQUENCIES`] with Q from [`band_q`] and 0 dB
    /// gain. Then installs a synthesized impulse response on the convolver
    /// and applies the current wet/dry split.
    ///
    /// On error the engine stays uninitialized and a later call retries.
    /// A failure while building nodes closes a context this call created, so
    /// the retry starts from a fresh one. A failure after the nodes exist
    /// keeps them, and the retry finishes setting them up.
    pub fn init(&mut self) -> Result<(), EngineError> {
        if self.nodes.is_some() {
            return Ok(());
        }
        self.config.validate()?;
        check_impulse_length(self.host.sample_rate(), self.config.impulse_duration)?;

        let created_context = !self.host.context_state().is_some_and(ContextState::is_usable);
        if created_context {
            self.pending_nodes = None;
            self.host.create_context()?;
            tracing::debug!(host = self.host.name(), "audio context created");
        }

        let nodes = match self.pending_nodes.take() {
            Some(nodes) => nodes,
            None => match self.build_nodes() {
                Ok(nodes) => nodes,
                Err(err) => {
                    if created_context {
                        self.close_context_quietly();
                    }
                    return Err(err);
                }
            },
        };

        let impulse = ImpulseResponse::synthesize(
            self.host.sample_rate(),
            self.config.impulse_duration,
            self.config.impulse_decay,
            &mut self.rng,
        );
        if let Err(err) = self.host.set_convolver_buffer(nodes.convolver, impulse) {
            self.pending_nodes = Some(nodes);
            return Err(err.into());
        }

        tracing::debug!(
            nodes = nodes.len(),
            sample_rate = self.host.sample_rate(),
            "engine graph built"
        );
        self.nodes = Some(nodes);
        self.apply_reverb_mix();
        Ok(())
    }

    fn build_nodes(&mut self) -> Result<EngineNodes, EngineError> {
        let now = self.host.current_time();
        let host = &mut self.host;

        let gain = host.create_node(NodeKind::Gain)?;
        host.set_param(gain, AudioParam::Gain, 1.0, now)?;

        let panner = host.create_node(NodeKind::StereoPanner)?;
        let convolver = host.create_node(NodeKind::Convolver)?;
        let analyser = host.create_node(NodeKind::Analyser)?;
        host.set_fft_size(analyser, self.config.fft_size)?;
        let compressor = host.create_node(NodeKind::DynamicsCompressor)?;

        let wet_gain = host.create_node(NodeKind::Gain)?;
        let dry_gain = host.create_node(NodeKind::Gain)?;

        let mut eq_bands = Vec::with_capacity(BAND_COUNT);
        for (index, &freq) in BAND_FREQUENCIES.iter().enumerate() {
            let band = host.create_node(NodeKind::BiquadFilter)?;
            host.set_filter_type(band, FilterType::Peaking)?;
            host.set_param(band, AudioParam::Frequency, freq, now)?;
            host.set_param(band, AudioParam::Q, band_q(index), now)?;
            host.set_param(band, AudioParam::Gain, 0.0, now)?;
            eq_bands.push(band);
        }

        Ok(EngineNodes {
            gain,
            panner,
            convolver,
            analyser,
            compressor,
            wet_gain,
            dry_gain,
            eq_bands,
        })
    }

    /// Initializes if needed, then wakes a suspended context.
    ///
    /// Resume failures are logged and swallowed; there is no retry. Errors
    /// from the implicit [`init()`](Self::init) are returned.
    pub fn resume(&mut self) -> Result<(), EngineError> {
        self.init()?;
        if self.host.context_state() == Some(ContextState::Suspended) {
            match self.host.resume_context() {
                Ok(()) => tracing::debug!("audio context resumed"),
                Err(err) => tracing::warn!(%err, "audio context did not resume"),
            }
        }
        Ok(())
    }

    /// Tears the graph down and closes the host context.
    ///
    /// Disconnects the bound source and every engine node (best effort),
    /// closes the context, and forgets all handles and the bound element. The
    /// reverb mix is kept. A later [`init()`](Self::init) builds a new graph.
    pub fn close(&mut self) {
        if let Some(source) = self.source.take() {
            self.disconnect_quietly(source);
        }
        if let Some(nodes) = self.nodes.take() {
            for node in nodes.iter() {
                self.disconnect_quietly(node);
            }
        }
        self.pending_nodes = None;
        self.source_routed = false;
        self.connected_element = None;
        self.close_context_quietly();
    }

    fn close_context_quietly(&mut self) {
        if self.host.context_state().is_some_and(ContextState::is_usable) {
            match self.host.close_context() {
                Ok(()) => tracing::debug!("audio context closed"),
                Err(err) => tracing::warn!(%err, "audio context did not close"),
            }
        }
    }

    // --- Routing ---

    /// Wires `source` through the engine chain to the destination.
    ///
    /// Existing outgoing connections of `source` are removed first, as are
    /// those of a previously bound, different source. Failures of those
    /// disconnects are ignored. A no-op before [`init()`](Self::init).
    ///
    /// `source` becomes the current source even if wiring fails part way;
    /// calling again with it completes the chain.
    pub fn connect_source_node(&mut self, source: NodeId) -> Result<(), EngineError> {
        let Some(nodes) = self.nodes.clone() else {
            tracing::debug!(%source, "connect before init ignored");
            return Ok(());
        };

        if let Some(previous) = self.source.filter(|&prev| prev != source) {
            self.disconnect_quietly(previous);
        }
        self.disconnect_quietly(source);
        self.source = Some(source);
        self.source_routed = false;

        let plan = RoutingPlan::new(source, &nodes, self.host.destination()?);
        for edge in plan.edges() {
            self.host.connect(edge.from, edge.to)?;
        }
        self.source_routed = true;
        tracing::debug!(%source, edges = plan.edges().len(), "source routed");
        Ok(())
    }

    /// Binds a playback element to the graph.
    ///
    /// Initializes the engine if needed. Binding the element that is already
    /// bound is a no-op, unless its routing failed part way, in which case
    /// the existing source is routed again. Otherwise the host is asked
    /// exactly once to create a source node from `element`, which is then
    /// routed with [`connect_source_node()`](Self::connect_source_node).
    pub fn connect_to_element(&mut self, element: &G::Element) -> Result<(), EngineError> {
        self.init()?;
        if self.connected_element.as_ref() == Some(element) {
            return match self.source {
                Some(source) if !self.source_routed => {
                    tracing::debug!(?element, %source, "completing interrupted routing");
                    self.connect_source_node(source)
                }
                _ => {
                    tracing::debug!(?element, "element already bound");
                    Ok(())
                }
            };
        }

        let source = self.host.create_media_element_source(element)?;
        self.connected_element = Some(element.clone());
        self.connect_source_node(source)
    }

    /// The routing the current source is wired with, if any.
    pub fn routing_plan(&self) -> Option<RoutingPlan> {
        let nodes = self.nodes.as_ref()?;
        let source = self.source.filter(|_| self.source_routed)?;
        let destination = self.host.destination().ok()?;
        Some(RoutingPlan::new(source, nodes, destination))
    }

    fn disconnect_quietly(&mut self, node: NodeId) {
        if let Err(err) = self.host.disconnect(node) {
            tracing::trace!(%node, %err, "disconnect ignored");
        }
    }

    // --- Parameters ---

    /// Sets the preamp from decibels (`10^(db/20)` linear).
    pub fn set_preamp_gain(&mut self, db: f32) {
        let Some(gain) = self.nodes.as_ref().map(|n| n.gain) else {
            return;
        };
        self.write_param(gain, AudioParam::Gain, db_to_linear(db));
    }

    /// Sets EQ band `index` to `db` decibels. Out-of-range indices are ignored.
    pub fn set_band_gain(&mut self, index: usize, db: f32) {
        let Some(band) = self.nodes.as_ref().and_then(|n| n.eq_bands.get(index).copied()) else {
            return;
        };
        self.write_param(band, AudioParam::Gain, db);
    }

    /// Sets the stereo pan position. Not clamped.
    pub fn set_panner(&mut self, value: f32) {
        let Some(panner) = self.nodes.as_ref().map(|n| n.panner) else {
            return;
        };
        self.write_param(panner, AudioParam::Pan, value);
    }

    /// Sets the reverb wet ratio.
    ///
    /// `mix` is clamped to \[0.0, 1.0\] and stored even before init. The wet
    /// gain becomes `mix` and the dry gain `1 - mix`: a linear crossfade.
    pub fn set_reverb_mix(&mut self, mix: f32) {
        self.reverb_mix = clamp_mix(mix);
        self.apply_reverb_mix();
    }

    fn apply_reverb_mix(&mut self) {
        let Some((wet_gain, dry_gain)) = self.nodes.as_ref().map(|n| (n.wet_gain, n.dry_gain))
        else {
            return;
        };
        let (wet, dry) = wet_dry_gains(self.reverb_mix);
        self.write_param(wet_gain, AudioParam::Gain, wet);
        self.write_param(dry_gain, AudioParam::Gain, dry);
    }

    fn write_param(&mut self, node: NodeId, param: AudioParam, value: f32) {
        let now = self.host.current_time();
        if let Err(err) = self.host.set_param(node, param, value, now) {
            tracing::warn!(%node, %param, value, %err, "parameter write rejected");
        }
    }

    /// Applies the fields present in `preset`: preamp, panner, reverb mix,
    /// then each EQ gain by index. `None` is a no-op.
    ///
    /// EQ entries beyond the band count are ignored; bands past the end of a
    /// short list keep their gain.
    pub fn apply_preset(&mut self, preset: Option<&Preset>) {
        let Some(preset) = preset else {
            return;
        };
        tracing::debug!(name = %preset.name, "applying preset");

        if let Some(db) = preset.preamp {
            self.set_preamp_gain(db);
        }
        if let Some(pan) = preset.panner {
            self.set_panner(pan);
        }
        if let Some(mix) = preset.reverb_mix {
            self.set_reverb_mix(mix);
        }
        if let Some(eq) = &preset.eq {
            for (index, &db) in eq.iter().enumerate() {
                self.set_band_gain(index, db);
            }
        }
    }

    /// Regenerates the convolver impulse response. A no-op before init.
    pub fn create_impulse_response(
        &mut self,
        duration_seconds: f32,
        decay: f32,
    ) -> Result<(), EngineError> {
        let Some(convolver) = self.nodes.as_ref().map(|n| n.convolver) else {
            return Ok(());
        };
        check_impulse_length(self.host.sample_rate(), duration_seconds)?;
        let impulse = ImpulseResponse::synthesize(
            self.host.sample_rate(),
            duration_seconds,
            decay,
            &mut self.rng,
        );
        self.host.set_convolver_buffer(convolver, impulse)?;
        Ok(())
    }

    // --- Analysis & inspection ---

    /// The fixed EQ band center frequencies.
    pub fn frequencies(&self) -> &'static [f32; BAND_COUNT] {
        &BAND_FREQUENCIES
    }

    /// Snapshot of the analyser's byte-scaled magnitudes, one per frequency
    /// bin, or `None` before init.
    pub fn analyser_data(&mut self) -> Option<Vec<u8>> {
        let analyser = self.nodes.as_ref()?.analyser;
        let result = self.host.frequency_bin_count(analyser).and_then(|bins| {
            let mut data = vec![0u8; bins];
            self.host.byte_frequency_data(analyser, &mut data)?;
            Ok(data)
        });
        match result {
            Ok(data) => Some(data),
            Err(err) => {
                tracing::warn!(%err, "analyser read failed");
                None
            }
        }
    }

    /// Returns true once the current source's edges are all in place.
    pub fn is_source_routed(&self) -> bool {
        self.source.is_some() && self.source_routed
    }

    /// Returns true once the node chain exists.
    pub fn is_initialized(&self) -> bool {
        self.nodes.is_some()
    }

    /// Current reverb wet ratio.
    pub fn reverb_mix(&self) -> f32 {
        self.reverb_mix
    }

    /// Handles to the engine's nodes, once initialized.
    pub fn nodes(&self) -> Option<&EngineNodes> {
        self.nodes.as_ref()
    }

    /// The source node currently routed into the chain.
    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    /// The playback element currently bound.
    pub fn connected_element(&self) -> Option<&G::Element> {
        self.connected_element.as_ref()
    }

    /// Settings the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The host graph.
    pub fn host(&self) -> &G {
        &self.host
    }

    /// The host graph, mutably.
    pub fn host_mut(&mut self) -> &mut G {
        &mut self.host
    }

    /// Consumes the engine and returns its host.
    pub fn into_host(self) -> G {
        self.host
    }
}

fn check_impulse_length(sample_rate: f32, duration_seconds: f32) -> Result<(), EngineError> {
    match bounded_frame_count(sample_rate, duration_seconds) {
        Some(_) => Ok(()),
        None => Err(EngineError::ImpulseTooLong {
            frames: frame_count(sample_rate, duration_seconds),
            max: MAX_IMPULSE_FRAMES,
        }),
    }
}
