//! Findings and their aggregate summary.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use wf_core::{Real, SensorId, percentage_of};

/// One junction at one timestamp whose flow does not reconcile.
#[derive(Debug, Clone, PartialEq)]
pub struct LeakFinding {
    pub timestamp: NaiveDateTime,
    pub junction_id: SensorId,
    pub path: String,
    /// Flow the junction reported.
    pub junction_flow: Real,
    /// Reported flow minus what its children account for.
    pub discrepancy: Real,
    /// `discrepancy` as a percentage of `junction_flow`; 0 for a zero-flow junction.
    pub percentage: Real,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeakReport {
    /// Ascending by timestamp.
    pub findings: Vec<LeakFinding>,
    pub total_leakage: Real,
}

/// Roll-up over all findings of a report.
#[derive(Debug, Clone, PartialEq)]
pub struct LeakSummary {
    pub first_junction: SensorId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub total_discrepancy: Real,
    /// Sum of the flagged junctions' reported flow.
    pub total_flow: Real,
    pub percentage: Real,
    /// Distinct flagged junctions, ascending.
    pub junctions: Vec<SensorId>,
}

impl LeakReport {
    pub fn from_findings(findings: Vec<LeakFinding>) -> Self {
        let total_leakage = findings.iter().map(|f| f.discrepancy).sum();
        Self {
            findings,
            total_leakage,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// `None` when nothing was flagged.
    pub fn summary(&self) -> Option<LeakSummary> {
        let first = self.findings.first()?;

        let mut start = first.timestamp;
        let mut end = first.timestamp;
        let mut total_flow = 0.0;
        let mut junctions = BTreeSet::new();
        for f in &self.findings {
            start = start.min(f.timestamp);
            end = end.max(f.timestamp);
            total_flow += f.junction_flow;
            junctions.insert(f.junction_id);
        }

        Some(LeakSummary {
            first_junction: first.junction_id,
            start,
            end,
            total_discrepancy: self.total_leakage,
            total_flow,
            percentage: percentage_of(self.total_leakage, total_flow),
            junctions: junctions.into_iter().collect(),
        })
    }
}
