//! Topology layouts: how many local junctions and which endpoints hang off each.
//!
//! A layout is a declarative description; `TopologyLayout::build` turns it into
//! a validated `Network`. Random layouts use fixed fan-out ranges.

use std::ops::RangeInclusive;

use rand::Rng;
use wf_core::{EndpointCategory, SensorId, WfResult};

use crate::builder::NetworkBuilder;
use crate::network::Network;

/// Local junctions under the master in a random layout.
pub const LOCAL_JUNCTION_COUNT: usize = 10;

/// Endpoints of `category` attached to each local junction in a random layout.
pub fn fan_out_range(category: EndpointCategory) -> RangeInclusive<u32> {
    match category {
        EndpointCategory::Home => 3..=5,
        EndpointCategory::Factory => 1..=2,
        EndpointCategory::AgriculturalChannel => 0..=5,
        EndpointCategory::FireHydrant => 1..=10,
    }
}

/// Endpoints attached to one local junction, as (category, count) groups in
/// attachment order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalLayout {
    pub endpoints: Vec<(EndpointCategory, u32)>,
}

impl LocalLayout {
    pub fn endpoint_count(&self) -> u32 {
        self.endpoints.iter().map(|(_, n)| n).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologyLayout {
    pub locals: Vec<LocalLayout>,
}

impl TopologyLayout {
    /// Draw a layout with `LOCAL_JUNCTION_COUNT` locals and per-category
    /// counts from `fan_out_range`.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let locals = (0..LOCAL_JUNCTION_COUNT)
            .map(|_| LocalLayout {
                endpoints: EndpointCategory::ALL
                    .iter()
                    .map(|&c| (c, rng.random_range(fan_out_range(c))))
                    .collect(),
            })
            .collect();
        Self { locals }
    }

    /// Build the network. Local junctions take ids `master+1..=master+N`;
    /// endpoints follow, local by local, in group order.
    pub fn build(&self, master: SensorId) -> WfResult<Network> {
        let mut builder = NetworkBuilder::new(master);
        let locals: Vec<_> = self.locals.iter().map(|_| builder.add_local()).collect();
        for (local, layout) in locals.iter().zip(&self.locals) {
            for &(category, count) in &layout.endpoints {
                for _ in 0..count {
                    builder.add_endpoint(*local, category);
                }
            }
        }
        builder.build()
    }
}

/// Build a random network rooted at `master`.
pub fn random_network<R: Rng>(master: SensorId, rng: &mut R) -> WfResult<Network> {
    let layout = TopologyLayout::random(rng);
    let network = layout.build(master)?;
    tracing::info!(
        master = %master,
        locals = layout.locals.len(),
        nodes = network.nodes().len(),
        "random topology built"
    );
    Ok(network)
}
