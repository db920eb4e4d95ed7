//! Tree validation logic.

use wf_core::{JunctionRole, WfResult};

use crate::error::NetworkError;
use crate::network::{Node, NodeKind};

/// Validate the tree: ids are arena slots, the only root is the master, every
/// parent precedes its children, roles nest Master > Local > Endpoint, and
/// every path extends its parent's path by the node's own sensor id.
pub(crate) fn validate_structure(nodes: &[Node]) -> WfResult<()> {
    for (i, node) in nodes.iter().enumerate() {
        if node.id.slot() != i {
            return Err(NetworkError::NonContiguousId {
                node: node.id,
                slot: i,
            }
            .into());
        }

        let Some(parent_id) = node.parent else {
            if i != 0 {
                return Err(NetworkError::MultipleRoots { node: node.id }.into());
            }
            if node.kind != NodeKind::Junction(JunctionRole::Master) {
                return Err(NetworkError::RoleMismatch {
                    node: node.id,
                    reason: "root must be a master junction",
                }
                .into());
            }
            if node.path.segments() != [node.sensor_id] {
                return Err(NetworkError::PathMismatch {
                    sensor: node.sensor_id,
                }
                .into());
            }
            continue;
        };

        if i == 0 {
            return Err(NetworkError::RoleMismatch {
                node: node.id,
                reason: "first node must be the parentless master",
            }
            .into());
        }

        if parent_id.slot() >= nodes.len() {
            return Err(NetworkError::InvalidParentRef {
                node: node.id,
                parent: parent_id,
            }
            .into());
        }
        if parent_id.slot() >= i {
            return Err(NetworkError::ForwardParentRef {
                node: node.id,
                parent: parent_id,
            }
            .into());
        }

        let parent = &nodes[parent_id.slot()];
        let reason = match (parent.kind, node.kind) {
            (_, NodeKind::Junction(JunctionRole::Master)) => {
                Some("master junction cannot have a parent")
            }
            (NodeKind::Junction(JunctionRole::Master), NodeKind::Junction(JunctionRole::Local)) => {
                None
            }
            (NodeKind::Junction(JunctionRole::Local), NodeKind::Endpoint(_)) => None,
            (NodeKind::Endpoint(_), _) => Some("endpoints cannot have children"),
            (_, NodeKind::Endpoint(_)) => Some("endpoints attach to local junctions only"),
            (_, NodeKind::Junction(JunctionRole::Local)) => {
                Some("local junctions attach to the master only")
            }
        };
        if let Some(reason) = reason {
            return Err(NetworkError::RoleMismatch {
                node: node.id,
                reason,
            }
            .into());
        }

        if node.path != parent.path.child(node.sensor_id) {
            return Err(NetworkError::PathMismatch {
                sensor: node.sensor_id,
            }
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_core::{EndpointCategory, NodeId, SensorId, SensorPath, WfError};

    fn master(sensor: u32) -> Node {
        Node {
            id: NodeId::from_index(0),
            sensor_id: SensorId(sensor),
            kind: NodeKind::Junction(JunctionRole::Master),
            path: SensorPath::root(SensorId(sensor)),
            parent: None,
        }
    }

    #[test]
    fn validate_empty_tree() {
        assert!(validate_structure(&[]).is_ok());
    }

    #[test]
    fn validate_lone_master() {
        assert!(validate_structure(&[master(1000)]).is_ok());
    }

    #[test]
    fn validate_root_must_be_master() {
        let mut root = master(1000);
        root.kind = NodeKind::Junction(JunctionRole::Local);
        let result = validate_structure(&[root]);
        assert!(matches!(result.unwrap_err(), WfError::Invariant { .. }));
    }

    #[test]
    fn validate_path_mismatch() {
        let root = master(1000);
        let local = Node {
            id: NodeId::from_index(1),
            sensor_id: SensorId(1001),
            kind: NodeKind::Junction(JunctionRole::Local),
            // skips the master
            path: SensorPath::root(SensorId(1001)),
            parent: Some(NodeId::from_index(0)),
        };
        let err = validate_structure(&[root, local]).unwrap_err();
        assert!(err.to_string().contains("path"));
    }

    #[test]
    fn validate_forward_parent() {
        let root = master(1);
        let endpoint = Node {
            id: NodeId::from_index(1),
            sensor_id: SensorId(3),
            kind: NodeKind::Endpoint(EndpointCategory::Home),
            path: SensorPath::root(SensorId(1))
                .child(SensorId(2))
                .child(SensorId(3)),
            parent: Some(NodeId::from_index(2)),
        };
        let local = Node {
            id: NodeId::from_index(2),
            sensor_id: SensorId(2),
            kind: NodeKind::Junction(JunctionRole::Local),
            path: SensorPath::root(SensorId(1)).child(SensorId(2)),
            parent: Some(NodeId::from_index(0)),
        };
        let err = validate_structure(&[root, endpoint, local]).unwrap_err();
        assert!(err.to_string().contains("inserted after"));
    }
}
