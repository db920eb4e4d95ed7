//! Timestamp partitioning and per-record path validation.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use wf_core::{Real, SensorId, SensorPath, ensure_finite};
use wf_results::{FlowRecord, format_timestamp};

use crate::error::{DetectError, DetectResult};

/// A record whose path has been parsed and checked against its own fields.
#[derive(Debug, Clone)]
pub struct CheckedRecord<'a> {
    pub record: &'a FlowRecord,
    pub path: SensorPath,
}

impl CheckedRecord<'_> {
    pub fn sensor_id(&self) -> SensorId {
        self.record.sensor_id
    }

    pub fn flow(&self) -> Real {
        self.record.water_usage
    }

    pub fn is_junction(&self) -> bool {
        self.record.is_junction()
    }
}

/// All records sharing one timestamp, in input order.
#[derive(Debug, Clone)]
pub struct Partition<'a> {
    pub timestamp: NaiveDateTime,
    pub records: Vec<CheckedRecord<'a>>,
}

/// Parse a record's path and reject records that cannot be placed in a tree.
pub fn check_record(record: &FlowRecord) -> DetectResult<CheckedRecord<'_>> {
    let malformed = |reason: String| DetectError::MalformedRecord {
        sensor_id: record.sensor_id,
        timestamp: format_timestamp(&record.timestamp),
        reason,
    };

    let path = record.path().map_err(|e| malformed(e.to_string()))?;
    if path.leaf() != record.sensor_id {
        return Err(malformed(format!(
            "path '{}' does not end in the record's own sensor id",
            record.path_to_master
        )));
    }
    if record.device_type.node_type() != record.node_type {
        return Err(malformed(format!(
            "type {} disagrees with device type {}",
            record.node_type, record.device_type
        )));
    }
    let flow = ensure_finite(record.water_usage, "water_usage")
        .map_err(|e| malformed(e.to_string()))?;
    if flow < 0.0 {
        return Err(malformed(format!("negative water_usage {flow}")));
    }

    Ok(CheckedRecord { record, path })
}

/// Group records by timestamp, ascending. Arrival order across timestamps is
/// irrelevant; within a timestamp the input order is kept.
pub fn partition_by_timestamp(records: &[FlowRecord]) -> DetectResult<Vec<Partition<'_>>> {
    let mut groups: BTreeMap<NaiveDateTime, Vec<CheckedRecord<'_>>> = BTreeMap::new();
    for record in records {
        let checked = check_record(record)?;
        groups.entry(record.timestamp).or_default().push(checked);
    }

    Ok(groups
        .into_iter()
        .map(|(timestamp, records)| Partition { timestamp, records })
        .collect())
}
