//! Content-based hashing for run ids and usage summaries.

use sha2::{Digest, Sha256};
use wf_project::schema::SimulationDef;

use crate::summary::EndpointUsage;

pub fn compute_run_id(simulation: &SimulationDef, seed: u64, engine_version: &str) -> String {
    let mut hasher = Sha256::new();

    let simulation_json = serde_json::to_string(simulation).unwrap_or_default();
    hasher.update(simulation_json.as_bytes());

    hasher.update(seed.to_le_bytes());
    hasher.update(engine_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

/// SHA-256 over `sensor_id,total` lines, one per endpoint, in the given order.
pub fn usage_digest(usage: &[EndpointUsage]) -> String {
    let mut hasher = Sha256::new();
    for entry in usage {
        hasher.update(format!("{},{}\n", entry.sensor_id, entry.total).as_bytes());
    }
    format!("{:x}", hasher.finalize())
}
