use wf_core::{Real, SensorId};

pub type DetectResult<T> = Result<T, DetectError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DetectError {
    #[error("Malformed record for sensor {sensor_id} at {timestamp}: {reason}")]
    MalformedRecord {
        sensor_id: SensorId,
        timestamp: String,
        reason: String,
    },

    #[error("Invalid tolerance {value}: must be finite and non-negative")]
    InvalidTolerance { value: Real },
}
