//! Incremental network builder.

use wf_core::{EndpointCategory, JunctionRole, NodeId, SensorId, SensorPath, WfResult};

use crate::error::NetworkError;
use crate::indexing::SensorIndex;
use crate::network::{Network, Node, NodeKind};
use crate::validate;

/// Hands out sensor ids in strictly increasing order.
///
/// The allocator is a plain value owned by whoever builds a network, so two
/// builds never share a counter.
#[derive(Debug, Clone)]
pub struct SensorIdAllocator {
    next: u32,
}

impl SensorIdAllocator {
    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// Next id to be handed out.
    pub fn peek(&self) -> SensorId {
        SensorId(self.next)
    }

    pub fn allocate(&mut self) -> SensorId {
        let id = SensorId(self.next);
        // overflow shows up as a duplicate sensor id at validation time
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Builder for constructing a network incrementally.
///
/// The master junction exists from the start; use `add_local` and
/// `add_endpoint` to grow the tree, then call `build()` to validate and freeze
/// it into an immutable `Network`.
#[derive(Debug)]
pub struct NetworkBuilder {
    nodes: Vec<Node>,
    ids: SensorIdAllocator,
    /// Set once a node could not be given an arena id; `build()` fails.
    exhausted: bool,
}

/// Arena id for the node stored at slot `len`, if one exists.
fn slot_id(len: usize) -> Option<NodeId> {
    u32::try_from(len).ok().and_then(NodeId::try_from_index)
}

impl NetworkBuilder {
    /// Start a tree whose master junction carries `master`; further ids are
    /// allocated from `master + 1`.
    pub fn new(master: SensorId) -> Self {
        let root = Node {
            id: NodeId::from_index(0),
            sensor_id: master,
            kind: NodeKind::Junction(JunctionRole::Master),
            path: SensorPath::root(master),
            parent: None,
        };
        Self {
            nodes: vec![root],
            ids: SensorIdAllocator::starting_at(master.get().wrapping_add(1)),
            exhausted: false,
        }
    }

    /// Arena id of the master junction.
    pub fn master(&self) -> NodeId {
        NodeId::from_index(0)
    }

    /// Add a local junction under the master and return its id.
    pub fn add_local(&mut self) -> NodeId {
        let master = self.master();
        self.push(master, NodeKind::Junction(JunctionRole::Local))
    }

    /// Add an endpoint of `category` under `local` and return its id.
    pub fn add_endpoint(&mut self, local: NodeId, category: EndpointCategory) -> NodeId {
        self.push(local, NodeKind::Endpoint(category))
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let Some(id) = slot_id(self.nodes.len()) else {
            // nothing is stored; the returned id is never valid again
            self.exhausted = true;
            return self.master();
        };
        let sensor_id = self.ids.allocate();
        let path = match self.nodes.get(parent.slot()) {
            Some(p) => p.path.child(sensor_id),
            // dangling parent, rejected by validation
            None => SensorPath::root(sensor_id),
        };
        self.nodes.push(Node {
            id,
            sensor_id,
            kind,
            path,
            parent: Some(parent),
        });
        id
    }

    /// Build and validate the network, returning an immutable `Network`.
    pub fn build(self) -> WfResult<Network> {
        if self.exhausted {
            return Err(NetworkError::CapacityExceeded {
                nodes: self.nodes.len(),
            }
            .into());
        }
        validate::validate_structure(&self.nodes)?;

        let (child_offsets, children) = Self::build_adjacency(&self.nodes);
        let root = NodeId::from_index(0);
        let post_order = Self::build_post_order(root, &child_offsets, &children);
        let index = SensorIndex::from_nodes(&self.nodes)?;

        tracing::debug!(
            nodes = self.nodes.len(),
            next_sensor = %self.ids.peek(),
            "network built"
        );

        Ok(Network {
            nodes: self.nodes,
            child_offsets,
            children,
            root,
            post_order,
            index,
        })
    }

    /// Build compact child lists, preserving insertion order per parent.
    fn build_adjacency(nodes: &[Node]) -> (Vec<usize>, Vec<NodeId>) {
        let mut counts = vec![0_usize; nodes.len()];
        for node in nodes {
            if let Some(p) = node.parent {
                counts[p.slot()] += 1;
            }
        }

        let mut offsets = Vec::with_capacity(nodes.len() + 1);
        offsets.push(0);
        for c in &counts {
            offsets.push(offsets[offsets.len() - 1] + c);
        }

        let mut cursor = offsets[..nodes.len()].to_vec();
        let mut flat = vec![NodeId::from_index(0); offsets[nodes.len()]];
        for node in nodes {
            if let Some(p) = node.parent {
                flat[cursor[p.slot()]] = node.id;
                cursor[p.slot()] += 1;
            }
        }

        (offsets, flat)
    }

    fn build_post_order(root: NodeId, offsets: &[usize], children: &[NodeId]) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(offsets.len().saturating_sub(1));
        let mut stack = vec![(root, false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            stack.push((id, true));
            let kids = &children[offsets[id.slot()]..offsets[id.slot() + 1]];
            for &child in kids.iter().rev() {
                stack.push((child, false));
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_is_monotonic() {
        let mut ids = SensorIdAllocator::starting_at(1001);
        assert_eq!(ids.allocate(), SensorId(1001));
        assert_eq!(ids.allocate(), SensorId(1002));
        assert_eq!(ids.peek(), SensorId(1003));
    }

    #[test]
    fn arena_slots_stop_below_u32_max() {
        assert_eq!(slot_id(0), Some(NodeId::from_index(0)));
        assert_eq!(slot_id(u32::MAX as usize - 1).map(NodeId::index), Some(u32::MAX - 1));
        assert_eq!(slot_id(u32::MAX as usize), None);
        if let Ok(beyond) = usize::try_from(u64::from(u32::MAX) + 1) {
            assert_eq!(slot_id(beyond), None);
        }
    }

    #[test]
    fn exhausted_builder_fails_to_build() {
        let mut builder = NetworkBuilder::new(SensorId(1));
        builder.add_local();
        builder.exhausted = true;
        let err = builder.build().unwrap_err();
        assert!(err.to_string().contains("arena capacity"), "{err}");
    }

    #[test]
    fn builder_basic() {
        let mut builder = NetworkBuilder::new(SensorId(1000));
        let l1 = builder.add_local();
        let l2 = builder.add_local();
        let e1 = builder.add_endpoint(l1, EndpointCategory::Home);

        assert_eq!(l1.index(), 1);
        assert_eq!(l2.index(), 2);
        assert_eq!(e1.index(), 3);
        assert_eq!(builder.nodes.len(), 4);
        assert_eq!(builder.nodes[3].sensor_id, SensorId(1003));
        assert_eq!(builder.nodes[3].path.to_string(), "1000->1001->1003");
    }

    #[test]
    fn builder_build_simple() {
        let mut builder = NetworkBuilder::new(SensorId(10));
        let l1 = builder.add_local();
        let l2 = builder.add_local();
        let e1 = builder.add_endpoint(l1, EndpointCategory::Home);
        let e2 = builder.add_endpoint(l2, EndpointCategory::Factory);
        let e3 = builder.add_endpoint(l1, EndpointCategory::FireHydrant);

        let network = builder.build().unwrap();
        assert_eq!(network.nodes().len(), 6);
        assert_eq!(network.children(network.root()), &[l1, l2]);
        assert_eq!(network.children(l1), &[e1, e3]);
        assert_eq!(network.children(l2), &[e2]);
        assert!(network.children(e1).is_empty());
        assert_eq!(network.parent(e2), Some(l2));

        // children first, in insertion order, master last
        assert_eq!(network.post_order(), &[e1, e3, l1, e2, l2, network.root()]);
        let junctions: Vec<_> = network.junctions_post_order().collect();
        assert_eq!(junctions, vec![l1, l2, network.root()]);
    }

    #[test]
    fn endpoint_under_endpoint_is_rejected() {
        let mut builder = NetworkBuilder::new(SensorId(1));
        let l1 = builder.add_local();
        let e1 = builder.add_endpoint(l1, EndpointCategory::Home);
        builder.add_endpoint(e1, EndpointCategory::Home);
        assert!(builder.build().is_err());
    }

    #[test]
    fn endpoint_under_master_is_rejected() {
        let mut builder = NetworkBuilder::new(SensorId(1));
        let master = builder.master();
        builder.add_endpoint(master, EndpointCategory::Home);
        assert!(builder.build().is_err());
    }

    #[test]
    fn dangling_parent_is_rejected() {
        let mut builder = NetworkBuilder::new(SensorId(1));
        builder.add_endpoint(NodeId::from_index(42), EndpointCategory::Home);
        let err = builder.build().unwrap_err();
        assert!(err.to_string().contains("non-existent parent"));
    }
}
