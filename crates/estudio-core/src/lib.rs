//! Estudio Core - signal routing and parameter control over a host audio graph
//!
//! This crate arranges and parameterizes an audio-processing graph that a host
//! audio subsystem supplies. It never filters, convolves or compresses samples
//! itself; it decides which nodes exist, how they are wired, and what values
//! their parameters hold.
//!
//! # Core Abstractions
//!
//! ## Host Capability
//!
//! - [`SignalGraph`] - Trait over the host: contexts, nodes, edges, parameters
//! - [`OfflineGraph`] - Recording host for tests and tooling
//!
//! ## Engine
//!
//! - [`AudioEngine`] - Builds the node chain, routes sources, sets parameters
//! - [`EngineConfig`] - FFT size, impulse shape, default mix, seed
//! - [`Preset`] - Named bundle of optional parameter values
//!
//! ## Topology
//!
//! - [`RoutingPlan`] - The ordered edge list of the engine chain
//! - [`EngineNodes`] - Handles to every node the engine built
//!
//! ## Reverb
//!
//! - [`ImpulseResponse`] - Decaying-noise impulse response synthesis
//!
//! # Signal Chain
//!
//! ```text
//! source → 10 × peaking EQ → compressor → gain ─┬─► dry gain ──────────────┬─► panner → analyser → out
//!                                               └─► convolver → wet gain ──┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use estudio_core::{AudioEngine, MediaElement, OfflineGraph, Preset};
//!
//! let mut engine = AudioEngine::new(OfflineGraph::new(48000.0));
//! engine.resume()?;
//! engine.connect_to_element(&MediaElement::new("player"))?;
//!
//! engine.set_preamp_gain(-3.0);
//! engine.set_reverb_mix(0.25);
//! engine.apply_preset(Some(&Preset::new("Loudness").with_eq([6.0, 4.0])));
//!
//! let spectrum = engine.analyser_data().unwrap();
//! assert_eq!(spectrum.len(), 1024);
//! # Ok::<(), estudio_core::EngineError>(())
//! ```
//!
//! # Design Principles
//!
//! - **Host owns the DSP**: every processing primitive sits behind [`SignalGraph`]
//! - **Build once**: nodes are created at most once per engine
//! - **Degrade, don't fail**: setters are no-ops without a graph and log host errors

pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod impulse;
pub mod math;
pub mod node;
pub mod offline;
pub mod preset;
pub mod routing;

pub use config::{DEFAULT_FFT_SIZE, DEFAULT_REVERB_MIX, EngineConfig};
pub use engine::{AudioEngine, BAND_COUNT, BAND_FREQUENCIES, band_q};
pub use error::{EngineError, HostError, RoutingError};
pub use host::{ContextState, SignalGraph};
pub use impulse::{IMPULSE_CHANNELS, ImpulseResponse, MAX_IMPULSE_FRAMES};
pub use math::{clamp_mix, db_to_linear, linear_to_db, wet_dry_gains};
pub use node::{AudioParam, FilterType, NodeId, NodeKind};
pub use offline::{HostCall, LoggedWrite, MediaElement, OfflineGraph, ParamWrite};
pub use preset::Preset;
pub use routing::{Edge, EngineNodes, RoutingPlan};
