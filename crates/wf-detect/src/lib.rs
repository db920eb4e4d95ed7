//! Flow-conservation checks over flat record sequences.
//!
//! Hierarchy is recovered from each record's path-to-master; records are
//! partitioned by timestamp and every partition is checked independently.
//!
//! Two checks are provided:
//! - [`LeakageDetector`]: a junction is flagged when it reports more than the
//!   endpoints below it account for.
//! - [`ToleranceDetector`]: walks down from each root and flags junctions whose
//!   flow differs from their direct children's by more than a relative
//!   tolerance.

pub mod check;
pub mod error;
pub mod partition;
pub mod report;

pub use check::{DEFAULT_TOLERANCE, FlowCheck, LeakageDetector, ToleranceDetector, analyze};
pub use error::{DetectError, DetectResult};
pub use partition::{CheckedRecord, Partition, check_record, partition_by_timestamp};
pub use report::{LeakFinding, LeakReport, LeakSummary};
