//! Leak analysis over simulated or loaded records.

use wf_detect::{LeakReport, LeakageDetector, ToleranceDetector};
use wf_project::Project;
use wf_results::FlowRecord;

use crate::error::AppResult;

/// Which conservation check to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectionMode {
    /// Junction flow against all endpoints below it; any excess is flagged.
    Strict,
    /// Junction flow against its direct children, gated by a relative tolerance.
    Tolerance(f64),
}

/// Pick the detection mode from the project, with optional frontend overrides.
pub fn detection_mode(project: &Project, tolerance: Option<f64>, strict: bool) -> DetectionMode {
    if strict {
        DetectionMode::Strict
    } else {
        DetectionMode::Tolerance(tolerance.unwrap_or(project.detection.tolerance_fraction))
    }
}

pub fn analyze_records(records: &[FlowRecord], mode: DetectionMode) -> AppResult<LeakReport> {
    let report = match mode {
        DetectionMode::Strict => LeakageDetector::new().detect(records)?,
        DetectionMode::Tolerance(tolerance) => ToleranceDetector::new(tolerance)?.detect(records)?,
    };
    Ok(report)
}
