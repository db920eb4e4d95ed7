//! Error types for simulation operations.

use thiserror::Error;
use wf_core::WfError;

/// Errors encountered while building or running a simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Timestamp overflow at step {step}")]
    TimestampOverflow { step: usize },

    #[error(transparent)]
    Core(#[from] WfError),
}

pub type SimResult<T> = Result<T, SimError>;
