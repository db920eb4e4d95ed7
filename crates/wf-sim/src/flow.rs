//! Per-step flow state and junction aggregation.

use rand::Rng;
use wf_core::{NodeId, Real};
use wf_network::Network;

use crate::leak::LeakModel;

/// Current-step values for every node, indexed by arena slot.
///
/// For an endpoint `flow` is its usage; for a junction it is its outflow.
/// `inflow` is only meaningful for junctions and always equals the outflow.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowState {
    pub(crate) flow: Vec<Real>,
    pub(crate) inflow: Vec<Real>,
}

impl FlowState {
    pub fn new(network: &Network) -> Self {
        let n = network.nodes().len();
        Self {
            flow: vec![0.0; n],
            inflow: vec![0.0; n],
        }
    }

    pub fn flow(&self, id: NodeId) -> Real {
        self.flow[id.slot()]
    }

    pub fn inflow(&self, id: NodeId) -> Real {
        self.inflow[id.slot()]
    }

    pub fn set_usage(&mut self, id: NodeId, usage: Real) {
        self.flow[id.slot()] = usage;
    }
}

/// Outcome of aggregating one junction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JunctionFlow {
    /// Sum of the children's current-step flow.
    pub base: Real,
    /// Injected leakage, `base * fraction`.
    pub leak: Real,
    /// Reported outflow, `base + leak`.
    pub outflow: Real,
}

/// Aggregate `junction` from its children's current values and inject leakage.
///
/// Children must already hold this step's values: endpoints their draw,
/// child junctions their own aggregate. A junction without children reports 0.
pub fn calculate_flow<R: Rng>(
    network: &Network,
    state: &mut FlowState,
    junction: NodeId,
    leak: &LeakModel,
    rng: &mut R,
) -> JunctionFlow {
    let base: Real = network
        .children(junction)
        .iter()
        .map(|c| state.flow[c.slot()])
        .sum();

    let leak_amount = match leak.draw_fraction(rng) {
        Some(fraction) => {
            if base == 0.0 && fraction > 0.0 {
                tracing::debug!(junction = %junction, "leak drawn on zero base flow");
            }
            base * fraction
        }
        None => 0.0,
    };
    let outflow = base + leak_amount;

    state.flow[junction.slot()] = outflow;
    state.inflow[junction.slot()] = outflow;

    JunctionFlow {
        base,
        leak: leak_amount,
        outflow,
    }
}
