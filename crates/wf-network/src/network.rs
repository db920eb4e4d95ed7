//! Core tree data structures.

use wf_core::{DeviceType, EndpointCategory, JunctionRole, NodeId, NodeType, SensorId, SensorPath};

use crate::indexing::SensorIndex;

/// What a node is: a consuming leaf or an aggregating junction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Endpoint(EndpointCategory),
    Junction(JunctionRole),
}

impl NodeKind {
    pub fn node_type(self) -> NodeType {
        match self {
            NodeKind::Endpoint(_) => NodeType::Endpoint,
            NodeKind::Junction(_) => NodeType::Junction,
        }
    }

    pub fn device_type(self) -> DeviceType {
        match self {
            NodeKind::Endpoint(c) => c.into(),
            NodeKind::Junction(r) => r.into(),
        }
    }
}

/// A node of the distribution tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub sensor_id: SensorId,
    pub kind: NodeKind,
    pub path: SensorPath,
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn is_junction(&self) -> bool {
        matches!(self.kind, NodeKind::Junction(_))
    }
}

/// Counts describing a built network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkSummary {
    pub master: Option<SensorId>,
    pub local_junctions: usize,
    pub endpoints: usize,
    /// Endpoint count per category, in `EndpointCategory::ALL` order.
    pub per_category: Vec<(EndpointCategory, usize)>,
}

/// The network: a validated, immutable tree rooted at the master junction.
///
/// The network stores:
/// - All nodes in a vector indexed by their arena id.
/// - Compact child lists: node i's children are in
///   `children[child_offsets[i]..child_offsets[i+1]]`, in insertion order.
/// - A post-order traversal (children before parents), which is both the
///   aggregation order and the record emission order.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) nodes: Vec<Node>,
    pub(crate) child_offsets: Vec<usize>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) root: NodeId,
    pub(crate) post_order: Vec<NodeId>,
    pub(crate) index: SensorIndex,
}

impl Network {
    /// Return all nodes in arena order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Get a node by id (returns None if id out of bounds).
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.slot())
    }

    /// The master junction.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Direct children of a node, in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        let idx = id.slot();
        if idx >= self.nodes.len() {
            return &[];
        }
        let start = self.child_offsets[idx];
        let end = self.child_offsets[idx + 1];
        &self.children[start..end]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Path of a node. Panics on an id not issued for this network.
    pub fn path_of(&self, id: NodeId) -> &SensorPath {
        &self.nodes[id.slot()].path
    }

    /// All nodes, children before parents.
    pub fn post_order(&self) -> &[NodeId] {
        &self.post_order
    }

    /// Junctions, children before parents: every local precedes the master.
    pub fn junctions_post_order(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.post_order
            .iter()
            .copied()
            .filter(|id| self.nodes[id.slot()].is_junction())
    }

    /// Endpoints in arena order.
    pub fn endpoints(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|n| !n.is_junction())
    }

    /// Local junctions in arena order.
    pub fn local_junctions(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Junction(JunctionRole::Local))
    }

    /// Look up a node by its sensor id.
    pub fn node_by_sensor(&self, sensor: SensorId) -> Option<&Node> {
        self.index.get(sensor).and_then(|id| self.node(id))
    }

    pub fn summary(&self) -> NetworkSummary {
        let mut per_category: Vec<(EndpointCategory, usize)> =
            EndpointCategory::ALL.iter().map(|&c| (c, 0)).collect();
        let mut endpoints = 0;
        for node in self.endpoints() {
            if let NodeKind::Endpoint(c) = node.kind {
                endpoints += 1;
                if let Some(slot) = per_category.iter_mut().find(|(cat, _)| *cat == c) {
                    slot.1 += 1;
                }
            }
        }
        NetworkSummary {
            master: self.node(self.root).map(|n| n.sensor_id),
            local_junctions: self.local_junctions().count(),
            endpoints,
            per_category,
        }
    }
}
