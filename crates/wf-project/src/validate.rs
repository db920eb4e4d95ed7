//! Project validation logic.

use wf_core::{EndpointCategory, ensure_fraction};

use crate::schema::{DetectionDef, LATEST_VERSION, Project, SimulationDef, TopologyDef};

/// Upper bound on endpoints per local junction in a random topology.
const RANDOM_MAX_ENDPOINTS_PER_LOCAL: u64 = 5 + 2 + 5 + 10;
const RANDOM_LOCALS: u64 = 10;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: impl ToString) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    validate_simulation(&project.simulation)?;
    validate_detection(&project.detection)?;
    Ok(())
}

fn validate_simulation(sim: &SimulationDef) -> Result<(), ValidationError> {
    sim.parse_start_time()
        .map_err(|e| invalid("simulation.start_time", &sim.start_time, e))?;

    ensure_fraction(sim.leak_probability, "leak_probability")
        .map_err(|e| invalid("simulation.leak_probability", sim.leak_probability, e))?;
    ensure_fraction(sim.max_leak_fraction, "max_leak_fraction")
        .map_err(|e| invalid("simulation.max_leak_fraction", sim.max_leak_fraction, e))?;

    // Every node takes one id after the master; the range must not wrap.
    let node_budget = match &sim.topology {
        TopologyDef::Random => RANDOM_LOCALS * (1 + RANDOM_MAX_ENDPOINTS_PER_LOCAL),
        TopologyDef::Explicit { locals } => {
            if locals.is_empty() {
                return Err(invalid(
                    "simulation.topology.locals",
                    "[]",
                    "at least one local junction is required",
                ));
            }
            let mut budget = locals.len() as u64;
            for (i, local) in locals.iter().enumerate() {
                for group in &local.endpoints {
                    group.category.parse::<EndpointCategory>().map_err(|e| {
                        invalid(
                            &format!("simulation.topology.locals[{i}].category"),
                            &group.category,
                            e,
                        )
                    })?;
                    budget += u64::from(group.count);
                }
            }
            budget
        }
    };
    if u64::from(sim.master_sensor_id) + node_budget > u64::from(u32::MAX) {
        return Err(invalid(
            "simulation.master_sensor_id",
            sim.master_sensor_id,
            "sensor id range would overflow",
        ));
    }

    Ok(())
}

fn validate_detection(det: &DetectionDef) -> Result<(), ValidationError> {
    ensure_fraction(det.tolerance_fraction, "tolerance_fraction")
        .map_err(|e| invalid("detection.tolerance_fraction", det.tolerance_fraction, e))?;
    Ok(())
}
