//! Balance checks run per timestamp partition.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use wf_core::{Real, SensorId, percentage_of};
use wf_results::FlowRecord;

use crate::error::{DetectError, DetectResult};
use crate::partition::{CheckedRecord, Partition, partition_by_timestamp};
use crate::report::{LeakFinding, LeakReport};

/// Relative tolerance used when a project does not set one.
pub const DEFAULT_TOLERANCE: Real = 0.05;

/// A conservation check over the records of a single timestamp.
pub trait FlowCheck: Sync {
    fn name(&self) -> &'static str;

    /// Findings for one partition, in a deterministic order.
    fn check_partition(&self, partition: &Partition<'_>) -> Vec<LeakFinding>;
}

/// Run `check` over every timestamp partition of `records`.
///
/// Partitions are evaluated in parallel; findings come back in ascending
/// timestamp order and the total is summed over that order.
pub fn analyze<C: FlowCheck + ?Sized>(check: &C, records: &[FlowRecord]) -> DetectResult<LeakReport> {
    let partitions = partition_by_timestamp(records)?;

    let per_partition: Vec<Vec<LeakFinding>> = partitions
        .par_iter()
        .map(|p| {
            let findings = check.check_partition(p);
            tracing::debug!(
                timestamp = %p.timestamp,
                records = p.records.len(),
                findings = findings.len(),
                "partition checked"
            );
            findings
        })
        .collect();

    let report = LeakReport::from_findings(per_partition.into_iter().flatten().collect());
    tracing::info!(
        check = check.name(),
        records = records.len(),
        partitions = partitions.len(),
        findings = report.len(),
        total_leakage = report.total_leakage,
        "leak analysis finished"
    );
    Ok(report)
}

fn finding(junction: &CheckedRecord<'_>, accounted: Real) -> LeakFinding {
    let flow = junction.flow();
    let discrepancy = flow - accounted;
    if flow == 0.0 {
        tracing::warn!(
            junction = %junction.sensor_id(),
            timestamp = %junction.record.timestamp,
            discrepancy,
            "zero-flow junction flagged; percentage reported as 0"
        );
    }
    LeakFinding {
        timestamp: junction.record.timestamp,
        junction_id: junction.sensor_id(),
        path: junction.record.path_to_master.clone(),
        junction_flow: flow,
        discrepancy,
        percentage: percentage_of(discrepancy, flow),
    }
}

/// Flags a junction that reports more than the endpoints below it consume.
///
/// An endpoint is below a junction when the junction's id is one of the
/// endpoint's ancestor path segments. Segments are compared as ids, so `10`
/// never matches inside `100`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeakageDetector;

impl LeakageDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, records: &[FlowRecord]) -> DetectResult<LeakReport> {
        analyze(self, records)
    }
}

impl FlowCheck for LeakageDetector {
    fn name(&self) -> &'static str {
        "strict"
    }

    fn check_partition(&self, partition: &Partition<'_>) -> Vec<LeakFinding> {
        let records = &partition.records;
        records
            .iter()
            .filter(|r| r.is_junction())
            .filter_map(|junction| {
                let id = junction.sensor_id();
                let accounted: Real = records
                    .iter()
                    .filter(|r| !r.is_junction() && r.path.descends_from(id))
                    .map(CheckedRecord::flow)
                    .sum();
                (junction.flow() - accounted > 0.0).then(|| finding(junction, accounted))
            })
            .collect()
    }
}

/// Walks down from each root and flags junctions whose flow differs from the
/// sum of their direct children by more than `tolerance * flow`.
///
/// A root is any record whose parent has no record at the same timestamp, so
/// a partition missing its master is still checked from the locals down.
#[derive(Debug, Clone, Copy)]
pub struct ToleranceDetector {
    tolerance: Real,
}

impl Default for ToleranceDetector {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ToleranceDetector {
    pub fn new(tolerance: Real) -> DetectResult<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(DetectError::InvalidTolerance { value: tolerance });
        }
        Ok(Self { tolerance })
    }

    pub fn tolerance(&self) -> Real {
        self.tolerance
    }

    pub fn detect(&self, records: &[FlowRecord]) -> DetectResult<LeakReport> {
        analyze(self, records)
    }
}

impl FlowCheck for ToleranceDetector {
    fn name(&self) -> &'static str {
        "tolerance"
    }

    fn check_partition(&self, partition: &Partition<'_>) -> Vec<LeakFinding> {
        let records = &partition.records;

        let present: HashSet<SensorId> = records.iter().map(CheckedRecord::sensor_id).collect();
        let mut children: HashMap<SensorId, Vec<usize>> = HashMap::new();
        for (i, r) in records.iter().enumerate() {
            if let Some(parent) = r.path.parent() {
                children.entry(parent).or_default().push(i);
            }
        }

        let is_root = |i: &usize| {
            records[*i]
                .path
                .parent()
                .is_none_or(|parent| !present.contains(&parent))
        };

        let mut findings = Vec::new();
        let mut stack: Vec<usize> = Vec::new();
        for root in (0..records.len()).filter(is_root) {
            stack.push(root);
            while let Some(i) = stack.pop() {
                let node = &records[i];
                if !node.is_junction() {
                    continue;
                }
                // Only strictly deeper records count as children; a
                // self-referencing path cannot loop the walk.
                let depth = node.path.depth();
                let kids: Vec<usize> = children
                    .get(&node.sensor_id())
                    .map(|v| {
                        v.iter()
                            .copied()
                            .filter(|&c| records[c].path.depth() == depth + 1)
                            .collect()
                    })
                    .unwrap_or_default();
                if kids.is_empty() {
                    continue;
                }

                let accounted: Real = kids.iter().map(|&c| records[c].flow()).sum();
                let discrepancy = node.flow() - accounted;
                if discrepancy.abs() > self.tolerance * node.flow() {
                    findings.push(finding(node, accounted));
                }

                stack.extend(kids.iter().rev().copied());
            }
        }
        findings
    }
}
