//! Per-endpoint usage totals.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use wf_core::{NodeType, SensorId};

use crate::types::FlowRecord;
use crate::{ResultsError, ResultsResult};

/// Inclusive time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(from: NaiveDateTime, to: NaiveDateTime) -> ResultsResult<Self> {
        if from > to {
            return Err(ResultsError::InvalidWindow {
                from: crate::format_timestamp(&from),
                to: crate::format_timestamp(&to),
            });
        }
        Ok(Self { from, to })
    }

    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        *ts >= self.from && *ts <= self.to
    }

    /// Records whose timestamp falls inside the window, in input order.
    pub fn filter<'a>(&self, records: &'a [FlowRecord]) -> Vec<&'a FlowRecord> {
        records.iter().filter(|r| self.contains(&r.timestamp)).collect()
    }
}

/// Total usage of one endpoint sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointUsage {
    pub sensor_id: SensorId,
    pub total: f64,
}

/// Sum endpoint usage per sensor, optionally restricted to `window`.
///
/// Junction records are ignored. The result is sorted by sensor id.
pub fn endpoint_usage(records: &[FlowRecord], window: Option<TimeWindow>) -> Vec<EndpointUsage> {
    let mut totals: BTreeMap<SensorId, f64> = BTreeMap::new();
    for record in records {
        if record.node_type != NodeType::Endpoint {
            continue;
        }
        if window.is_some_and(|w| !w.contains(&record.timestamp)) {
            continue;
        }
        *totals.entry(record.sensor_id).or_insert(0.0) += record.water_usage;
    }
    totals
        .into_iter()
        .map(|(sensor_id, total)| EndpointUsage { sensor_id, total })
        .collect()
}
