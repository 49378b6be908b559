//! Error types for host calls, routing, and engine setup.

use thiserror::Error;

use crate::node::{AudioParam, NodeId, NodeKind};

/// Failures reported by a [`SignalGraph`](crate::SignalGraph) host.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum HostError {
    /// The call needs a live audio context and there is none.
    #[error("no audio context")]
    NoContext,

    /// The host refused to create an audio context.
    #[error("failed to create audio context: {0}")]
    ContextCreation(String),

    /// The host could not move a suspended context to running.
    #[error("failed to resume audio context: {0}")]
    Resume(String),

    /// The node does not exist in the current context.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// The call targets a node of the wrong kind.
    #[error("node {node} is not a {expected}")]
    WrongNodeKind {
        /// Node the call addressed.
        node: NodeId,
        /// Kind the call requires.
        expected: NodeKind,
    },

    /// The node has no such parameter.
    #[error("node {node} has no '{param}' parameter")]
    UnsupportedParam {
        /// Node the write addressed.
        node: NodeId,
        /// Parameter that was written.
        param: AudioParam,
    },

    /// A source node was already created for this playback element.
    #[error("playback element already has a source node")]
    SourceAlreadyCreated,

    /// `disconnect` was called on a node with no outgoing connections.
    #[error("node {0} has no outgoing connections")]
    NotConnected(NodeId),

    /// The connection is structurally impossible (into a source, out of the destination).
    #[error("cannot connect {from} to {to}: {reason}")]
    InvalidConnection {
        /// Upstream node.
        from: NodeId,
        /// Downstream node.
        to: NodeId,
        /// Why the host rejected the edge.
        reason: String,
    },

    /// Analyser FFT sizes must be powers of two in \[32, 32768\].
    #[error("invalid FFT size {0}")]
    InvalidFftSize(usize),

    /// The host refused the call for a reason of its own.
    #[error("host rejected the call: {0}")]
    Rejected(String),
}

/// Structural problems found while validating a [`RoutingPlan`](crate::RoutingPlan).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoutingError {
    /// The plan contains a feedback loop.
    #[error("routing contains a cycle")]
    CycleDetected,

    /// A node in the plan has no path to the destination.
    #[error("node {0} never reaches the destination")]
    Unreachable(NodeId),

    /// The same edge appears twice.
    #[error("edge from {0} to {1} appears twice")]
    DuplicateEdge(NodeId, NodeId),
}

/// Errors returned by [`AudioEngine`](crate::AudioEngine) lifecycle calls.
///
/// Parameter setters never return these; host failures inside a setter are
/// logged and swallowed.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The host failed while building or wiring the graph.
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// The engine configuration is unusable.
    #[error("invalid engine config: {0}")]
    InvalidConfig(String),

    /// The impulse response would exceed [`MAX_IMPULSE_FRAMES`](crate::impulse::MAX_IMPULSE_FRAMES).
    #[error("impulse response of {frames} frames exceeds the limit of {max}")]
    ImpulseTooLong {
        /// Requested frames per channel.
        frames: usize,
        /// Allowed frames per channel.
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn wrong_kind_display_names_expected_kind() {
        let err = HostError::WrongNodeKind {
            node: NodeId::new(3),
            expected: NodeKind::Analyser,
        };
        assert_eq!(err.to_string(), "node NodeId(3) is not a analyser");
    }

    #[test]
    fn unsupported_param_display() {
        let err = HostError::UnsupportedParam {
            node: NodeId::new(1),
            param: AudioParam::Pan,
        };
        assert_eq!(err.to_string(), "node NodeId(1) has no 'pan' parameter");
    }

    #[test]
    fn engine_error_wraps_host_error_as_source() {
        let err = EngineError::from(HostError::NoContext);
        assert_eq!(err.to_string(), "host error: no audio context");
        assert!(err.source().is_some());
    }

    #[test]
    fn invalid_config_has_no_source() {
        let err = EngineError::InvalidConfig("fft".to_string());
        assert!(err.source().is_none());
    }
}
