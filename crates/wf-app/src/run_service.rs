//! Simulation execution service.

use rand::SeedableRng;
use rand::rngs::StdRng;
use wf_network::NetworkSummary;
use wf_project::{Project, SimulationDef};
use wf_results::{
    EndpointUsage, FlowRecord, TimeWindow, compute_run_id, endpoint_usage, parse_timestamp,
    usage_digest,
};
use wf_sim::{LeakModel, SimOptions, run_sim};

use crate::error::{AppError, AppResult};
use crate::topology;

/// Version folded into run ids; a new engine release yields new ids.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Request to execute a run.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    /// Overrides the project's seed. With neither set a fresh seed is drawn.
    pub seed: Option<u64>,
    /// Produce the leak-free baseline regardless of the project's leak settings.
    pub leak_free: bool,
    /// Restrict the usage summary to `[from, to]`.
    pub usage_window: Option<TimeWindow>,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub seed: u64,
    pub network: NetworkSummary,
    pub records: Vec<FlowRecord>,
    pub usage: Vec<EndpointUsage>,
    pub usage_digest: String,
}

/// Parse an inclusive usage window from two record timestamps.
pub fn usage_window(from: &str, to: &str) -> AppResult<TimeWindow> {
    Ok(TimeWindow::new(parse_timestamp(from)?, parse_timestamp(to)?)?)
}

fn effective_simulation(project: &Project, request: &RunRequest) -> SimulationDef {
    let mut def = project.simulation.clone();
    if request.leak_free {
        def.leak_probability = 0.0;
        def.max_leak_fraction = 0.0;
    }
    def
}

/// Build the project's network and simulate it.
///
/// Topology and usage draw from one `StdRng` seeded with the run's seed, so
/// an identical request reproduces the records byte for byte.
pub fn run_simulation(project: &Project, request: &RunRequest) -> AppResult<RunResponse> {
    let def = effective_simulation(project, request);
    let seed = request
        .seed
        .or(def.seed)
        .unwrap_or_else(rand::random::<u64>);

    let start_time = def.parse_start_time().map_err(|e| {
        AppError::InvalidInput(format!("start_time '{}': {e}", def.start_time))
    })?;
    let leak = if request.leak_free {
        LeakModel::Disabled
    } else {
        LeakModel::random(def.leak_probability, def.max_leak_fraction)?
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let network = topology::build_network(&def, &mut rng)?;
    let opts = SimOptions {
        time_units: def.time_units,
        start_time,
        leak,
    };
    let records = run_sim(&network, &opts, &mut rng)?;

    let usage = endpoint_usage(&records, request.usage_window);
    let digest = usage_digest(&usage);
    let run_id = compute_run_id(&def, seed, ENGINE_VERSION);
    tracing::info!(run_id = %run_id, seed, records = records.len(), "run complete");

    Ok(RunResponse {
        run_id,
        seed,
        network: network.summary(),
        records,
        usage,
        usage_digest: digest,
    })
}
