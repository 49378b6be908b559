//! In-memory host that records what the engine asks of it.
//!
//! [`OfflineGraph`] implements [`SignalGraph`] without producing audio. It
//! keeps nodes, edges, parameter writes and convolver buffers in plain
//! collections so tests and tooling can inspect the graph the engine built.
//! It enforces the same structural rules a browser audio context does:
//!
//! - one source node per playback element, for the host's whole lifetime
//! - no connections into a source or out of the destination
//! - `disconnect` on a node without outputs fails
//! - nodes from a closed context are unknown
//!
//! Duplicate `connect` calls are idempotent. Individual calls can be made to
//! fail once with [`OfflineGraph::fail_next`], and every parameter write is
//! kept in order in [`OfflineGraph::write_log`].

use std::collections::{BTreeMap, HashMap};

use crate::error::HostError;
use crate::host::{ContextState, SignalGraph};
use crate::impulse::ImpulseResponse;
use crate::node::{AudioParam, FilterType, NodeId, NodeKind};
use crate::routing::Edge;

/// A playback element handle for the offline host, identified by label.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MediaElement(String);

impl MediaElement {
    /// Creates an element handle.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The element's label.
    pub fn label(&self) -> &str {
        &self.0
    }
}

/// A parameter value and the context time it was written at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamWrite {
    /// Written value.
    pub value: f32,
    /// Context time of the write in seconds.
    pub time: f64,
}

/// One entry of the ordered parameter write log.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoggedWrite {
    /// Node the write addressed.
    pub node: NodeId,
    /// Parameter that was written.
    pub param: AudioParam,
    /// Value and timestamp.
    pub write: ParamWrite,
}

/// Host calls that [`OfflineGraph::fail_next`] can make fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostCall {
    /// [`SignalGraph::create_node`]
    CreateNode,
    /// [`SignalGraph::connect`]
    Connect,
    /// [`SignalGraph::set_fft_size`]
    SetFftSize,
    /// [`SignalGraph::set_convolver_buffer`]
    SetConvolverBuffer,
}

#[derive(Debug)]
enum Role {
    Destination,
    Source(MediaElement),
    Processor(NodeKind),
}

#[derive(Debug)]
struct OfflineNode {
    role: Role,
    params: BTreeMap<AudioParam, ParamWrite>,
    filter_type: FilterType,
    fft_size: usize,
    buffer: Option<ImpulseResponse>,
}

impl OfflineNode {
    fn new(role: Role) -> Self {
        Self {
            role,
            params: BTreeMap::new(),
            filter_type: FilterType::default(),
            fft_size: 2048,
            buffer: None,
        }
    }

    fn kind(&self) -> Option<NodeKind> {
        match self.role {
            Role::Processor(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Recording [`SignalGraph`] host.
///
/// # Example
///
/// ```rust
/// use estudio_core::{AudioEngine, MediaElement, OfflineGraph};
///
/// let mut engine = AudioEngine::new(OfflineGraph::new(44100.0));
/// engine.connect_to_element(&MediaElement::new("deck-a"))?;
///
/// let host = engine.host();
/// assert_eq!(host.sources_created(), 1);
/// assert_eq!(host.edges().len(), 19);
/// # Ok::<(), estudio_core::EngineError>(())
/// ```
#[derive(Debug)]
pub struct OfflineGraph {
    sample_rate: f32,
    start_suspended: bool,
    resume_failure: Option<String>,
    state: Option<ContextState>,
    clock: f64,
    nodes: HashMap<NodeId, OfflineNode>,
    destination: Option<NodeId>,
    edges: Vec<Edge>,
    writes: Vec<LoggedWrite>,
    failures: Vec<(HostCall, String)>,
    bound_elements: Vec<MediaElement>,
    spectrum: Vec<u8>,
    next_id: u32,
    contexts_created: usize,
    sources_created: usize,
    resume_attempts: usize,
}

impl OfflineGraph {
    /// Creates a host whose contexts run at `sample_rate` and start running.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            start_suspended: false,
            resume_failure: None,
            state: None,
            clock: 0.0,
            nodes: HashMap::new(),
            destination: None,
            edges: Vec::new(),
            writes: Vec::new(),
            failures: Vec::new(),
            bound_elements: Vec::new(),
            spectrum: Vec::new(),
            next_id: 0,
            contexts_created: 0,
            sources_created: 0,
            resume_attempts: 0,
        }
    }

    /// New contexts start suspended, as under browser autoplay policies.
    pub fn suspended(mut self) -> Self {
        self.start_suspended = true;
        self
    }

    /// Every resume attempt fails with `reason`.
    pub fn with_resume_failure(mut self, reason: impl Into<String>) -> Self {
        self.resume_failure = Some(reason.into());
        self
    }

    /// Makes the next `call` fail with [`HostError::Rejected`]. Queued
    /// failures for the same call are consumed in order.
    pub fn fail_next(&mut self, call: HostCall, reason: impl Into<String>) {
        self.failures.push((call, reason.into()));
    }

    /// Advances the context clock.
    pub fn advance(&mut self, seconds: f64) {
        self.clock += seconds;
    }

    /// Sets the magnitudes analysers report. Bins past its end read as zero.
    pub fn set_spectrum(&mut self, spectrum: impl Into<Vec<u8>>) {
        self.spectrum = spectrum.into();
    }

    // --- Inspection ---

    /// Kind of a processing node, or `None` for unknown, source and
    /// destination nodes.
    pub fn node_kind(&self, node: NodeId) -> Option<NodeKind> {
        self.nodes.get(&node).and_then(OfflineNode::kind)
    }

    /// Returns true if `node` is a playback source.
    pub fn is_source(&self, node: NodeId) -> bool {
        matches!(self.nodes.get(&node).map(|n| &n.role), Some(Role::Source(_)))
    }

    /// The element a source node streams from.
    pub fn source_element(&self, node: NodeId) -> Option<&MediaElement> {
        match self.nodes.get(&node).map(|n| &n.role) {
            Some(Role::Source(element)) => Some(element),
            _ => None,
        }
    }

    /// Current value of `param` on `node`: the last write, else the default.
    ///
    /// `None` if the node is unknown or lacks the parameter.
    pub fn param(&self, node: NodeId, param: AudioParam) -> Option<f32> {
        let data = self.nodes.get(&node)?;
        let kind = data.kind()?;
        if !kind.supports(param) {
            return None;
        }
        Some(
            data.params
                .get(&param)
                .map_or_else(|| param.default_value(kind), |w| w.value),
        )
    }

    /// Every accepted parameter write since the last
    /// [`clear_write_log`](Self::clear_write_log), oldest first.
    pub fn write_log(&self) -> &[LoggedWrite] {
        &self.writes
    }

    /// Empties the write log. Current parameter values are kept.
    pub fn clear_write_log(&mut self) {
        self.writes.clear();
    }

    /// The last write of `param` on `node`, with its timestamp.
    pub fn last_write(&self, node: NodeId, param: AudioParam) -> Option<ParamWrite> {
        self.nodes.get(&node)?.params.get(&param).copied()
    }

    /// Filter shape of a biquad node.
    pub fn filter_type(&self, node: NodeId) -> Option<FilterType> {
        let data = self.nodes.get(&node)?;
        (data.kind()? == NodeKind::BiquadFilter).then_some(data.filter_type)
    }

    /// FFT size of an analyser node.
    pub fn fft_size(&self, node: NodeId) -> Option<usize> {
        let data = self.nodes.get(&node)?;
        (data.kind()? == NodeKind::Analyser).then_some(data.fft_size)
    }

    /// Impulse response installed on a convolver node.
    pub fn convolver_buffer(&self, node: NodeId) -> Option<&ImpulseResponse> {
        self.nodes.get(&node)?.buffer.as_ref()
    }

    /// All live edges in connection order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns true if `from` feeds `to`.
    pub fn is_connected(&self, from: NodeId, to: NodeId) -> bool {
        self.edges.contains(&Edge::new(from, to))
    }

    /// Nodes fed by `node`.
    pub fn outputs(&self, node: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|e| e.from == node)
            .map(|e| e.to)
            .collect()
    }

    /// Nodes feeding `node`.
    pub fn inputs(&self, node: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|e| e.to == node)
            .map(|e| e.from)
            .collect()
    }

    /// Nodes in the current context, destination and sources included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Contexts created over the host's lifetime.
    pub fn contexts_created(&self) -> usize {
        self.contexts_created
    }

    /// Source nodes created over the host's lifetime.
    pub fn sources_created(&self) -> usize {
        self.sources_created
    }

    /// Resume calls received, successful or not.
    pub fn resume_attempts(&self) -> usize {
        self.resume_attempts
    }

    // --- Internal ---

    fn require_context(&self) -> Result<(), HostError> {
        match self.state {
            Some(state) if state.is_usable() => Ok(()),
            _ => Err(HostError::NoContext),
        }
    }

    fn take_failure(&mut self, call: HostCall) -> Result<(), HostError> {
        match self.failures.iter().position(|(c, _)| *c == call) {
            Some(index) => Err(HostError::Rejected(self.failures.remove(index).1)),
            None => Ok(()),
        }
    }

    fn mint(&mut self, role: Role) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, OfflineNode::new(role));
        id
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut OfflineNode, HostError> {
        self.require_context()?;
        self.nodes.get_mut(&node).ok_or(HostError::UnknownNode(node))
    }

    fn processor_mut(
        &mut self,
        node: NodeId,
        expected: NodeKind,
    ) -> Result<&mut OfflineNode, HostError> {
        let data = self.node_mut(node)?;
        if data.kind() == Some(expected) {
            Ok(data)
        } else {
            Err(HostError::WrongNodeKind { node, expected })
        }
    }

    fn processor(&self, node: NodeId, expected: NodeKind) -> Result<&OfflineNode, HostError> {
        self.require_context()?;
        let data = self.nodes.get(&node).ok_or(HostError::UnknownNode(node))?;
        if data.kind() == Some(expected) {
            Ok(data)
        } else {
            Err(HostError::WrongNodeKind { node, expected })
        }
    }
}

impl SignalGraph for OfflineGraph {
    type Element = MediaElement;

    fn name(&self) -> &str {
        "offline"
    }

    fn create_context(&mut self) -> Result<(), HostError> {
        self.nodes.clear();
        self.edges.clear();
        self.clock = 0.0;
        self.state = Some(if self.start_suspended {
            ContextState::Suspended
        } else {
            ContextState::Running
        });
        self.contexts_created += 1;
        self.destination = Some(self.mint(Role::Destination));
        Ok(())
    }

    fn context_state(&self) -> Option<ContextState> {
        self.state
    }

    fn resume_context(&mut self) -> Result<(), HostError> {
        self.require_context()?;
        self.resume_attempts += 1;
        if let Some(reason) = &self.resume_failure {
            return Err(HostError::Resume(reason.clone()));
        }
        self.state = Some(ContextState::Running);
        Ok(())
    }

    fn close_context(&mut self) -> Result<(), HostError> {
        self.require_context()?;
        self.state = Some(ContextState::Closed);
        self.nodes.clear();
        self.edges.clear();
        self.destination = None;
        Ok(())
    }

    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn current_time(&self) -> f64 {
        self.clock
    }

    fn destination(&self) -> Result<NodeId, HostError> {
        self.require_context()?;
        self.destination.ok_or(HostError::NoContext)
    }

    fn create_node(&mut self, kind: NodeKind) -> Result<NodeId, HostError> {
        self.require_context()?;
        self.take_failure(HostCall::CreateNode)?;
        Ok(self.mint(Role::Processor(kind)))
    }

    fn create_media_element_source(
        &mut self,
        element: &MediaElement,
    ) -> Result<NodeId, HostError> {
        self.require_context()?;
        if self.bound_elements.contains(element) {
            return Err(HostError::SourceAlreadyCreated);
        }
        self.bound_elements.push(element.clone());
        self.sources_created += 1;
        Ok(self.mint(Role::Source(element.clone())))
    }

    fn connect(&mut self, from: NodeId, to: NodeId) -> Result<(), HostError> {
        self.require_context()?;
        self.take_failure(HostCall::Connect)?;
        let from_role = &self.nodes.get(&from).ok_or(HostError::UnknownNode(from))?.role;
        if matches!(from_role, Role::Destination) {
            return Err(HostError::InvalidConnection {
                from,
                to,
                reason: "the destination has no outputs".to_string(),
            });
        }
        let to_role = &self.nodes.get(&to).ok_or(HostError::UnknownNode(to))?.role;
        if matches!(to_role, Role::Source(_)) {
            return Err(HostError::InvalidConnection {
                from,
                to,
                reason: "sources have no inputs".to_string(),
            });
        }

        let edge = Edge::new(from, to);
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }
        Ok(())
    }

    fn disconnect(&mut self, node: NodeId) -> Result<(), HostError> {
        self.node_mut(node)?;
        let before = self.edges.len();
        self.edges.retain(|e| e.from != node);
        if self.edges.len() == before {
            return Err(HostError::NotConnected(node));
        }
        Ok(())
    }

    fn set_param(
        &mut self,
        node: NodeId,
        param: AudioParam,
        value: f32,
        at_time: f64,
    ) -> Result<(), HostError> {
        let data = self.node_mut(node)?;
        if !data.kind().is_some_and(|kind| kind.supports(param)) {
            return Err(HostError::UnsupportedParam { node, param });
        }
        let write = ParamWrite {
            value,
            time: at_time,
        };
        data.params.insert(param, write);
        self.writes.push(LoggedWrite { node, param, write });
        Ok(())
    }

    fn set_filter_type(&mut self, node: NodeId, filter: FilterType) -> Result<(), HostError> {
        self.processor_mut(node, NodeKind::BiquadFilter)?.filter_type = filter;
        Ok(())
    }

    fn set_fft_size(&mut self, node: NodeId, fft_size: usize) -> Result<(), HostError> {
        if !fft_size.is_power_of_two() || !(32..=32768).contains(&fft_size) {
            return Err(HostError::InvalidFftSize(fft_size));
        }
        self.require_context()?;
        self.take_failure(HostCall::SetFftSize)?;
        self.processor_mut(node, NodeKind::Analyser)?.fft_size = fft_size;
        Ok(())
    }

    fn frequency_bin_count(&self, node: NodeId) -> Result<usize, HostError> {
        Ok(self.processor(node, NodeKind::Analyser)?.fft_size / 2)
    }

    fn byte_frequency_data(&mut self, node: NodeId, out: &mut [u8]) -> Result<(), HostError> {
        self.processor(node, NodeKind::Analyser)?;
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.spectrum.get(i).copied().unwrap_or(0);
        }
        Ok(())
    }

    fn set_convolver_buffer(
        &mut self,
        node: NodeId,
        buffer: ImpulseResponse,
    ) -> Result<(), HostError> {
        self.require_context()?;
        self.take_failure(HostCall::SetConvolverBuffer)?;
        self.processor_mut(node, NodeKind::Convolver)?.buffer = Some(buffer);
        Ok(())
    }
}
