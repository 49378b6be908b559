//! Signal-routing topology for the engine's node chain.
//!
//! The engine always wires the same graph. A [`RoutingPlan`] spells it out as
//! an ordered edge list before anything touches the host:
//!
//! ```text
//! source → eq[0] → eq[1] → … → eq[9] → compressor → gain
//!
//!                 ┌──────► dry gain ──────────────┐
//!          gain ──┤                               ├──► panner → analyser → destination
//!                 └──► convolver ──► wet gain ────┘
//! ```
//!
//! The split after `gain` and the merge at the panner implement the reverb
//! wet/dry mix: the dry path bypasses the convolver, the wet path runs
//! through it, and both are scaled before the panner sums them.
//!
//! Plans can check themselves ([`RoutingPlan::validate`]) for cycles,
//! duplicate edges, and nodes that never reach the destination.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::engine::BAND_FREQUENCIES;
use crate::error::RoutingError;
use crate::node::NodeId;

/// A directed connection from one node's output to another's input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Upstream node.
    pub from: NodeId,
    /// Downstream node.
    pub to: NodeId,
}

impl Edge {
    /// Creates an edge `from → to`.
    pub const fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }
}

/// Handles to every processing node the engine builds during `init`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineNodes {
    /// Preamp gain (linear).
    pub gain: NodeId,
    /// Stereo panner where wet and dry paths merge.
    pub panner: NodeId,
    /// Reverb convolver on the wet path.
    pub convolver: NodeId,
    /// Spectrum analyser feeding the destination.
    pub analyser: NodeId,
    /// Dynamics compressor after the EQ chain.
    pub compressor: NodeId,
    /// Wet-path level.
    pub wet_gain: NodeId,
    /// Dry-path level.
    pub dry_gain: NodeId,
    /// Peaking filters in ascending band order.
    pub eq_bands: Vec<NodeId>,
}

impl EngineNodes {
    /// Iterates over every node handle: the fixed nodes first, then EQ bands.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        [
            self.gain,
            self.panner,
            self.convolver,
            self.analyser,
            self.compressor,
            self.wet_gain,
            self.dry_gain,
        ]
        .into_iter()
        .chain(self.eq_bands.iter().copied())
    }

    /// Number of node handles.
    pub fn len(&self) -> usize {
        7 + self.eq_bands.len()
    }

    /// Always false; an engine graph has at least its fixed nodes.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Role label for `id`, or `None` if it is not one of these nodes.
    pub fn label(&self, id: NodeId) -> Option<String> {
        let fixed = [
            (self.gain, "gain"),
            (self.panner, "panner"),
            (self.convolver, "convolver"),
            (self.analyser, "analyser"),
            (self.compressor, "compressor"),
            (self.wet_gain, "wet gain"),
            (self.dry_gain, "dry gain"),
        ];
        if let Some((_, name)) = fixed.iter().find(|(node, _)| *node == id) {
            return Some((*name).to_string());
        }
        let band = self.eq_bands.iter().position(|&node| node == id)?;
        let freq = BAND_FREQUENCIES.get(band).copied().unwrap_or_default();
        Some(format!("eq[{band}] {freq} Hz"))
    }
}

/// The ordered edge list connecting a source through the engine to the
/// destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutingPlan {
    source: NodeId,
    destination: NodeId,
    edges: Vec<Edge>,
}

impl RoutingPlan {
    /// Builds the engine topology for `source`.
    pub fn new(source: NodeId, nodes: &EngineNodes, destination: NodeId) -> Self {
        let mut edges = Vec::with_capacity(nodes.eq_bands.len() + 10);

        // Serial EQ chain, then dynamics and preamp.
        let mut prev = source;
        for &band in &nodes.eq_bands {
            edges.push(Edge::new(prev, band));
            prev = band;
        }
        edges.push(Edge::new(prev, nodes.compressor));
        edges.push(Edge::new(nodes.compressor, nodes.gain));

        // Dry and wet paths fan out of the preamp.
        edges.push(Edge::new(nodes.gain, nodes.dry_gain));
        edges.push(Edge::new(nodes.gain, nodes.convolver));
        edges.push(Edge::new(nodes.convolver, nodes.wet_gain));

        // Both paths merge at the panner.
        edges.push(Edge::new(nodes.wet_gain, nodes.panner));
        edges.push(Edge::new(nodes.dry_gain, nodes.panner));

        edges.push(Edge::new(nodes.panner, nodes.analyser));
        edges.push(Edge::new(nodes.analyser, destination));

        Self {
            source,
            destination,
            edges,
        }
    }

    /// The node feeding the chain.
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// The node the chain terminates in.
    pub fn destination(&self) -> NodeId {
        self.destination
    }

    /// Edges in the order the engine connects them.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Nodes feeding `node`.
    pub fn inputs_of(&self, node: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|e| e.to == node)
            .map(|e| e.from)
            .collect()
    }

    /// Nodes fed by `node`.
    pub fn outputs_of(&self, node: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|e| e.from == node)
            .map(|e| e.to)
            .collect()
    }

    /// Every distinct node mentioned by the plan.
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for edge in &self.edges {
            for id in [edge.from, edge.to] {
                if seen.insert(id) {
                    out.push(id);
                }
            }
        }
        out
    }

    /// Kahn topological sort of the plan's nodes.
    pub fn topological_order(&self) -> Result<Vec<NodeId>, RoutingError> {
        let nodes = self.nodes();
        let mut in_degree: HashMap<NodeId, usize> = nodes.iter().map(|&n| (n, 0)).collect();
        for edge in &self.edges {
            *in_degree.entry(edge.to).or_default() += 1;
        }

        let mut queue: VecDeque<NodeId> = nodes
            .iter()
            .copied()
            .filter(|n| in_degree[n] == 0)
            .collect();
        let mut sorted = Vec::with_capacity(nodes.len());

        while let Some(node) = queue.pop_front() {
            sorted.push(node);
            for next in self.outputs_of(node) {
                let degree = in_degree.entry(next).or_default();
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(next);
                }
            }
        }

        if sorted.len() == nodes.len() {
            Ok(sorted)
        } else {
            Err(RoutingError::CycleDetected)
        }
    }

    /// Checks that the plan is a DAG without duplicate edges in which every
    /// node reaches the destination.
    pub fn validate(&self) -> Result<(), RoutingError> {
        let mut seen = HashSet::new();
        for edge in &self.edges {
            if !seen.insert(*edge) {
                return Err(RoutingError::DuplicateEdge(edge.from, edge.to));
            }
        }

        self.topological_order()?;

        // Walk backwards from the destination.
        let mut reaches = HashSet::from([self.destination]);
        let mut queue = VecDeque::from([self.destination]);
        while let Some(node) = queue.pop_front() {
            for prev in self.inputs_of(node) {
                if reaches.insert(prev) {
                    queue.push_back(prev);
                }
            }
        }
        match self.nodes().into_iter().find(|n| !reaches.contains(n)) {
            Some(orphan) => Err(RoutingError::Unreachable(orphan)),
            None => Ok(()),
        }
    }

    /// One line per edge, using role labels from `nodes`.
    pub fn describe(&self, nodes: &EngineNodes) -> Vec<String> {
        let name = |id: NodeId| {
            if id == self.source {
                "source".to_string()
            } else if id == self.destination {
                "destination".to_string()
            } else {
                nodes.label(id).unwrap_or_else(|| id.to_string())
            }
        };
        self.edges
            .iter()
            .map(|e| format!("{} → {}", name(e.from), name(e.to)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (EngineNodes, NodeId, NodeId) {
        let nodes = EngineNodes {
            gain: NodeId::new(1),
            panner: NodeId::new(2),
            convolver: NodeId::new(3),
            analyser: NodeId::new(4),
            compressor: NodeId::new(5),
            wet_gain: NodeId::new(6),
            dry_gain: NodeId::new(7),
            eq_bands: (10..20).map(NodeId::new).collect(),
        };
        (nodes, NodeId::new(100), NodeId::new(0))
    }

    #[test]
    fn plan_has_nineteen_edges() {
        let (nodes, src, dst) = fixture();
        let plan = RoutingPlan::new(src, &nodes, dst);
        assert_eq!(plan.edges().len(), 19);
        assert_eq!(plan.edges()[0], Edge::new(src, nodes.eq_bands[0]));
        assert_eq!(*plan.edges().last().unwrap(), Edge::new(nodes.analyser, dst));
    }

    #[test]
    fn eq_chain_is_serial_and_ascending() {
        let (nodes, src, dst) = fixture();
        let plan = RoutingPlan::new(src, &nodes, dst);
        for pair in nodes.eq_bands.windows(2) {
            assert_eq!(plan.outputs_of(pair[0]), vec![pair[1]]);
        }
        assert_eq!(plan.outputs_of(nodes.eq_bands[9]), vec![nodes.compressor]);
    }

    #[test]
    fn gain_fans_out_and_panner_fans_in() {
        let (nodes, src, dst) = fixture();
        let plan = RoutingPlan::new(src, &nodes, dst);
        assert_eq!(
            plan.outputs_of(nodes.gain),
            vec![nodes.dry_gain, nodes.convolver]
        );
        assert_eq!(
            plan.inputs_of(nodes.panner),
            vec![nodes.wet_gain, nodes.dry_gain]
        );
        assert_eq!(plan.outputs_of(nodes.convolver), vec![nodes.wet_gain]);
        // dry path skips the convolver
        assert_eq!(plan.outputs_of(nodes.dry_gain), vec![nodes.panner]);
    }

    #[test]
    fn engine_plan_validates() {
        let (nodes, src, dst) = fixture();
        let plan = RoutingPlan::new(src, &nodes, dst);
        assert_eq!(plan.validate(), Ok(()));
        let order = plan.topological_order().unwrap();
        assert_eq!(order.first(), Some(&src));
        assert_eq!(order.last(), Some(&dst));
    }

    #[test]
    fn validate_catches_cycle() {
        let (nodes, src, dst) = fixture();
        let mut plan = RoutingPlan::new(src, &nodes, dst);
        plan.edges.push(Edge::new(nodes.panner, nodes.gain));
        assert_eq!(plan.validate(), Err(RoutingError::CycleDetected));
    }

    #[test]
    fn validate_catches_duplicate_and_orphan() {
        let (nodes, src, dst) = fixture();
        let mut plan = RoutingPlan::new(src, &nodes, dst);
        let first = plan.edges[0];
        plan.edges.push(first);
        assert_eq!(
            plan.validate(),
            Err(RoutingError::DuplicateEdge(first.from, first.to))
        );

        let mut plan = RoutingPlan::new(src, &nodes, dst);
        let dangling = NodeId::new(55);
        plan.edges.push(Edge::new(nodes.gain, dangling));
        assert_eq!(plan.validate(), Err(RoutingError::Unreachable(dangling)));
    }

    #[test]
    fn describe_uses_role_labels() {
        let (nodes, src, dst) = fixture();
        let plan = RoutingPlan::new(src, &nodes, dst);
        let lines = plan.describe(&nodes);
        assert_eq!(lines[0], "source → eq[0] 31 Hz");
        assert_eq!(lines.last().unwrap(), "analyser → destination");
        assert!(lines.contains(&"convolver → wet gain".to_string()));
    }

    #[test]
    fn engine_nodes_iter_covers_all_handles() {
        let (nodes, _, _) = fixture();
        assert_eq!(nodes.iter().count(), nodes.len());
        assert_eq!(nodes.len(), 17);
        assert_eq!(nodes.label(NodeId::new(999)), None);
    }
}
