//! Result data types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
pub use wf_core::TIMESTAMP_FORMAT;
use wf_core::{DeviceType, NodeType, SensorId, SensorPath, WfResult};

use crate::{ResultsError, ResultsResult};

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(value: &str) -> ResultsResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|_| {
        ResultsError::InvalidTimestamp {
            value: value.to_string(),
        }
    })
}

/// One sample of one node at one time step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    #[serde(with = "timestamp_serde")]
    pub timestamp: NaiveDateTime,
    pub sensor_id: SensorId,
    /// Rendered ancestor chain, e.g. `1000->1003->1042`.
    pub path_to_master: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub device_type: DeviceType,
    pub water_usage: f64,
}

impl FlowRecord {
    /// Parse `path_to_master` into segments.
    pub fn path(&self) -> WfResult<SensorPath> {
        self.path_to_master.parse()
    }

    pub fn is_junction(&self) -> bool {
        self.node_type == NodeType::Junction
    }
}

mod timestamp_serde {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}
