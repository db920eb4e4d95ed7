//! Project schema definitions.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    pub simulation: SimulationDef,
    #[serde(default)]
    pub detection: DetectionDef,
}

/// Simulation entry parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationDef {
    /// Number of hourly steps.
    pub time_units: usize,
    /// First step timestamp, `YYYY-MM-DD HH:MM:SS`.
    pub start_time: String,
    pub master_sensor_id: u32,
    #[serde(default)]
    pub leak_probability: f64,
    #[serde(default)]
    pub max_leak_fraction: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub topology: TopologyDef,
}

impl SimulationDef {
    pub fn parse_start_time(&self) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(self.start_time.trim(), wf_core::TIMESTAMP_FORMAT)
    }
}

/// Network shape.
///
/// ```yaml
/// topology:
///   type: Explicit
///   locals:
///     - endpoints:
///         - { category: Home, count: 3 }
///         - { category: Fire_Hydrant, count: 1 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "type")]
pub enum TopologyDef {
    /// Ten local junctions with randomized endpoint counts.
    #[default]
    Random,
    Explicit { locals: Vec<LocalDef> },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LocalDef {
    #[serde(default)]
    pub endpoints: Vec<EndpointGroupDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointGroupDef {
    /// One of `Home`, `Factory`, `Agricultural_Channel`, `Fire_Hydrant`.
    pub category: String,
    #[serde(default = "default_group_count")]
    pub count: u32,
}

fn default_group_count() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectionDef {
    /// Relative tolerance for the branch balance check.
    #[serde(default = "default_tolerance_fraction")]
    pub tolerance_fraction: f64,
}

impl Default for DetectionDef {
    fn default() -> Self {
        Self {
            tolerance_fraction: default_tolerance_fraction(),
        }
    }
}

fn default_tolerance_fraction() -> f64 {
    0.05
}
