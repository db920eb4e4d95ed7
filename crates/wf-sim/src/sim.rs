//! Simulation runner and record emission.

use chrono::{Duration, NaiveDateTime};
use rand::Rng;
use wf_core::{NodeId, Real, SensorId};
use wf_network::{Network, NodeKind, random_network};
use wf_results::FlowRecord;

use crate::error::{SimError, SimResult};
use crate::flow::{FlowState, calculate_flow};
use crate::leak::LeakModel;
use crate::usage::UsageProfile;

/// Options for simulating an existing network.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Number of steps; each step is one hour.
    pub time_units: usize,
    /// Timestamp of the first step.
    pub start_time: NaiveDateTime,
    pub leak: LeakModel,
}

/// Parameters of a full run: random topology plus simulation.
#[derive(Clone, Debug)]
pub struct RunParams {
    pub time_units: usize,
    pub start_time: NaiveDateTime,
    pub master_sensor_id: SensorId,
    pub leak_probability: Real,
    pub max_leak_fraction: Real,
}

impl RunParams {
    pub fn sim_options(&self) -> SimResult<SimOptions> {
        Ok(SimOptions {
            time_units: self.time_units,
            start_time: self.start_time,
            leak: LeakModel::random(self.leak_probability, self.max_leak_fraction)?,
        })
    }
}

/// Drives a network through hourly steps.
///
/// Each step runs, in order: every endpoint draws its usage, every junction
/// aggregates children-first (all locals before the master), then one record
/// per node is emitted in post-order.
pub struct SimulationEngine<'a> {
    network: &'a Network,
    state: FlowState,
    profiles: Vec<(NodeId, UsageProfile)>,
    junctions: Vec<NodeId>,
    paths: Vec<String>,
}

impl<'a> SimulationEngine<'a> {
    pub fn new(network: &'a Network) -> Self {
        let profiles = network
            .endpoints()
            .filter_map(|n| match n.kind {
                NodeKind::Endpoint(c) => Some((n.id, UsageProfile::for_category(c))),
                NodeKind::Junction(_) => None,
            })
            .collect();
        let junctions = network.junctions_post_order().collect();
        let paths = network.nodes().iter().map(|n| n.path.to_string()).collect();

        Self {
            network,
            state: FlowState::new(network),
            profiles,
            junctions,
            paths,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Advance one step and append its records to `out`. Returns the number
    /// of junctions that leaked.
    pub fn step<R: Rng>(
        &mut self,
        timestamp: NaiveDateTime,
        leak: &LeakModel,
        rng: &mut R,
        out: &mut Vec<FlowRecord>,
    ) -> usize {
        for (id, profile) in &self.profiles {
            let usage = profile.simulate_usage(rng);
            self.state.set_usage(*id, usage);
        }

        let mut leaks = 0;
        for &junction in &self.junctions {
            let flow = calculate_flow(self.network, &mut self.state, junction, leak, rng);
            if flow.leak > 0.0 {
                leaks += 1;
            }
        }

        for &id in self.network.post_order() {
            let node = &self.network.nodes()[id.slot()];
            out.push(FlowRecord {
                timestamp,
                sensor_id: node.sensor_id,
                path_to_master: self.paths[id.slot()].clone(),
                node_type: node.kind.node_type(),
                device_type: node.kind.device_type(),
                water_usage: self.state.flow(id),
            });
        }

        leaks
    }

    pub fn run<R: Rng>(&mut self, opts: &SimOptions, rng: &mut R) -> SimResult<Vec<FlowRecord>> {
        let per_step = self.network.nodes().len();
        let mut records = Vec::with_capacity(per_step.saturating_mul(opts.time_units));

        tracing::info!(
            steps = opts.time_units,
            nodes = per_step,
            leak = ?opts.leak,
            "simulation started"
        );

        let mut leaks_total = 0;
        for step in 0..opts.time_units {
            let timestamp = i64::try_from(step)
                .ok()
                .and_then(|h| opts.start_time.checked_add_signed(Duration::hours(h)))
                .ok_or(SimError::TimestampOverflow { step })?;

            let leaks = self.step(timestamp, &opts.leak, rng, &mut records);
            leaks_total += leaks;

            tracing::debug!(
                step,
                master_outflow = self.state.flow(self.network.root()),
                leaks,
                "step complete"
            );
        }

        tracing::info!(
            records = records.len(),
            leaks = leaks_total,
            "simulation finished"
        );
        Ok(records)
    }
}

/// Simulate an existing network.
pub fn run_sim<R: Rng>(
    network: &Network,
    opts: &SimOptions,
    rng: &mut R,
) -> SimResult<Vec<FlowRecord>> {
    SimulationEngine::new(network).run(opts, rng)
}

/// Build a random network rooted at `params.master_sensor_id` and simulate it.
///
/// Topology and usage draw from the same `rng`, so a seeded generator
/// reproduces both.
pub fn simulate_network<R: Rng>(
    params: &RunParams,
    rng: &mut R,
) -> SimResult<(Network, Vec<FlowRecord>)> {
    let opts = params.sim_options()?;
    let network = random_network(params.master_sensor_id, rng)?;
    let records = run_sim(&network, &opts, rng)?;
    Ok((network, records))
}
