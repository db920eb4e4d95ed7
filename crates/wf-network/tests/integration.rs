//! Integration tests for random and declarative network construction.

use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use wf_core::{EndpointCategory, JunctionRole, SensorId};
use wf_network::{LOCAL_JUNCTION_COUNT, NodeKind, fan_out_range, random_network};

#[test]
fn random_network_shape() {
    let mut rng = StdRng::seed_from_u64(2023);
    let network = random_network(SensorId(1000), &mut rng).unwrap();

    let root = network.node(network.root()).unwrap();
    assert_eq!(root.sensor_id, SensorId(1000));
    assert_eq!(root.kind, NodeKind::Junction(JunctionRole::Master));
    assert_eq!(network.children(network.root()).len(), LOCAL_JUNCTION_COUNT);

    // locals take the ids right after the master
    let locals: Vec<u32> = network.local_junctions().map(|n| n.sensor_id.get()).collect();
    assert_eq!(locals, (1001..=1010).collect::<Vec<_>>());

    for local in network.local_junctions() {
        for category in EndpointCategory::ALL {
            let n = network
                .children(local.id)
                .iter()
                .filter(|&&c| network.node(c).unwrap().kind == NodeKind::Endpoint(category))
                .count() as u32;
            assert!(fan_out_range(category).contains(&n));
        }
    }
}

#[test]
fn sensor_ids_unique_and_monotonic() {
    let mut rng = StdRng::seed_from_u64(7);
    let network = random_network(SensorId(500), &mut rng).unwrap();

    let ids: Vec<u32> = network.nodes().iter().map(|n| n.sensor_id.get()).collect();
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(ids[0], 500);
    assert_eq!(ids[1], 501);
}

#[test]
fn paths_extend_parent_paths() {
    let mut rng = StdRng::seed_from_u64(11);
    let network = random_network(SensorId(1000), &mut rng).unwrap();

    for node in network.nodes() {
        assert_eq!(node.path.leaf(), node.sensor_id);
        match node.parent {
            Some(parent) => {
                let parent = network.node(parent).unwrap();
                assert_eq!(node.path, parent.path.child(node.sensor_id));
            }
            None => assert_eq!(node.path.depth(), 1),
        }
    }
}

#[test]
fn sensor_lookup_and_summary() {
    let mut rng = StdRng::seed_from_u64(5);
    let network = random_network(SensorId(1000), &mut rng).unwrap();

    let local = network.node_by_sensor(SensorId(1003)).unwrap();
    assert_eq!(local.kind, NodeKind::Junction(JunctionRole::Local));
    assert!(network.node_by_sensor(SensorId(999)).is_none());

    let summary = network.summary();
    assert_eq!(summary.master, Some(SensorId(1000)));
    assert_eq!(summary.local_junctions, LOCAL_JUNCTION_COUNT);
    assert_eq!(summary.endpoints, network.nodes().len() - 1 - LOCAL_JUNCTION_COUNT);
    let per_category: usize = summary.per_category.iter().map(|(_, n)| n).sum();
    assert_eq!(per_category, summary.endpoints);
}

#[test]
fn same_seed_same_topology() {
    let a = random_network(SensorId(1000), &mut StdRng::seed_from_u64(99)).unwrap();
    let b = random_network(SensorId(1000), &mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(a.nodes(), b.nodes());
}
