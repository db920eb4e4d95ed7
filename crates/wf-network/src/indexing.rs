//! Sensor id lookup.
//!
//! Maps the externally visible sensor ids back to arena ids.

use std::collections::HashMap;

use wf_core::{NodeId, SensorId, WfResult};

use crate::error::NetworkError;
use crate::network::Node;

#[derive(Debug, Clone, Default)]
pub struct SensorIndex {
    by_sensor: HashMap<SensorId, NodeId>,
}

impl SensorIndex {
    /// Build the index, rejecting sensor ids used by more than one node.
    pub fn from_nodes(nodes: &[Node]) -> WfResult<Self> {
        let mut by_sensor = HashMap::with_capacity(nodes.len());
        for node in nodes {
            if by_sensor.insert(node.sensor_id, node.id).is_some() {
                return Err(NetworkError::DuplicateSensor {
                    sensor: node.sensor_id,
                }
                .into());
            }
        }
        Ok(Self { by_sensor })
    }

    pub fn get(&self, sensor: SensorId) -> Option<NodeId> {
        self.by_sensor.get(&sensor).copied()
    }

    pub fn len(&self) -> usize {
        self.by_sensor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_sensor.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NodeKind;
    use wf_core::{EndpointCategory, JunctionRole, SensorPath};

    fn node(slot: u32, sensor: u32, kind: NodeKind) -> Node {
        Node {
            id: NodeId::from_index(slot),
            sensor_id: SensorId(sensor),
            kind,
            path: SensorPath::root(SensorId(sensor)),
            parent: None,
        }
    }

    #[test]
    fn index_lookup() {
        let nodes = vec![
            node(0, 1000, NodeKind::Junction(JunctionRole::Master)),
            node(1, 1001, NodeKind::Endpoint(EndpointCategory::Home)),
        ];
        let index = SensorIndex::from_nodes(&nodes).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(SensorId(1001)), Some(NodeId::from_index(1)));
        assert_eq!(index.get(SensorId(1002)), None);
    }

    #[test]
    fn duplicate_sensor_rejected() {
        let nodes = vec![
            node(0, 5, NodeKind::Junction(JunctionRole::Master)),
            node(1, 5, NodeKind::Endpoint(EndpointCategory::Home)),
        ];
        assert!(SensorIndex::from_nodes(&nodes).is_err());
    }
}
