//! wf-results: flow records and reproducibility summaries.

pub mod hash;
pub mod summary;
pub mod types;

pub use hash::{compute_run_id, usage_digest};
pub use summary::{EndpointUsage, TimeWindow, endpoint_usage};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("Invalid timestamp '{value}' (expected YYYY-MM-DD HH:MM:SS)")]
    InvalidTimestamp { value: String },

    #[error("Invalid time window: {from} is after {to}")]
    InvalidWindow { from: String, to: String },
}
