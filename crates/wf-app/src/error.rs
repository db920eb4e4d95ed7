//! Error types for the wf-app service layer.

use std::path::PathBuf;

/// Unified error for CLI frontends; backend errors are flattened to strings.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Unsupported project file extension: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Detection error: {0}")]
    Detection(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for wf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<wf_project::ProjectError> for AppError {
    fn from(err: wf_project::ProjectError) -> Self {
        match err {
            wf_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<wf_project::ValidationError> for AppError {
    fn from(err: wf_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<wf_core::WfError> for AppError {
    fn from(err: wf_core::WfError) -> Self {
        match err {
            wf_core::WfError::Configuration { message } => AppError::Configuration(message),
            other => AppError::InvalidInput(other.to_string()),
        }
    }
}

impl From<wf_sim::SimError> for AppError {
    fn from(err: wf_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<wf_detect::DetectError> for AppError {
    fn from(err: wf_detect::DetectError) -> Self {
        AppError::Detection(err.to_string())
    }
}

impl From<wf_results::ResultsError> for AppError {
    fn from(err: wf_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}
