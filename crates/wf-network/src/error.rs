//! Network-specific error types.

use wf_core::{NodeId, SensorId, WfError};

/// Tree construction and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// A node refers to a parent that doesn't exist.
    InvalidParentRef { node: NodeId, parent: NodeId },

    /// A parent was inserted after its child, which would allow cycles.
    ForwardParentRef { node: NodeId, parent: NodeId },

    /// Node ids are not contiguous arena slots.
    NonContiguousId { node: NodeId, slot: usize },

    /// More than one node has no parent.
    MultipleRoots { node: NodeId },

    /// The root node is not a master junction, or a master appears below the root.
    RoleMismatch { node: NodeId, reason: &'static str },

    /// A path does not equal its parent's path extended by the node's own id.
    PathMismatch { sensor: SensorId },

    /// Two nodes share a sensor id.
    DuplicateSensor { sensor: SensorId },

    /// More nodes were added than arena ids exist.
    CapacityExceeded { nodes: usize },
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::InvalidParentRef { node, parent } => {
                write!(f, "Node {} refers to non-existent parent {}", node, parent)
            }
            NetworkError::ForwardParentRef { node, parent } => {
                write!(f, "Node {} has parent {} inserted after it", node, parent)
            }
            NetworkError::NonContiguousId { node, slot } => {
                write!(f, "Node {} stored in arena slot {}", node, slot)
            }
            NetworkError::MultipleRoots { node } => {
                write!(f, "Node {} has no parent but is not the root", node)
            }
            NetworkError::RoleMismatch { node, reason } => {
                write!(f, "Node {}: {}", node, reason)
            }
            NetworkError::PathMismatch { sensor } => {
                write!(f, "Sensor {} path does not extend its parent's path", sensor)
            }
            NetworkError::DuplicateSensor { sensor } => {
                write!(f, "Sensor id {} is assigned to more than one node", sensor)
            }
            NetworkError::CapacityExceeded { nodes } => {
                write!(f, "Network exceeds arena capacity after {} nodes", nodes)
            }
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<NetworkError> for WfError {
    fn from(err: NetworkError) -> Self {
        WfError::Invariant {
            what: err.to_string(),
        }
    }
}
