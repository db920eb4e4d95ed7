//! wf-core: stable foundation for waterflow.
//!
//! Contains:
//! - ids (arena ids for network nodes, external sensor ids)
//! - path (path-to-master encoding with strict segment parsing)
//! - device (endpoint categories, junction roles, record device types)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod device;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod path;

// Re-exports: nice ergonomics for downstream crates
pub use device::*;
pub use error::{WfError, WfResult};
pub use ids::*;
pub use numeric::*;
pub use path::{PATH_DELIMITER, SensorPath};

/// Wire format of record timestamps (`chrono` strftime syntax).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
