//! Shared application service layer for waterflow.
//!
//! Frontends go through this crate to load and validate projects, build the
//! configured network, run simulations and analyze the resulting records.

pub mod analysis_service;
pub mod error;
pub mod project_service;
pub mod run_service;
pub mod topology;

// Re-export key types for convenience
pub use analysis_service::{DetectionMode, analyze_records, detection_mode};
pub use error::{AppError, AppResult};
pub use project_service::{load_project, save_project, validate_project};
pub use run_service::{ENGINE_VERSION, RunRequest, RunResponse, run_simulation, usage_window};
pub use topology::{build_network, resolve_layout};
