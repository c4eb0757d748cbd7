//! Error types for the landmark boundary
//!
//! Missing or occluded landmarks are never errors: absence is carried by
//! `Option` slots in `LandmarkSet` and `JointAngles`. Only malformed input
//! and bad configuration surface here.

use thiserror::Error;

use crate::landmarks::Keypoint;

/// Result alias used across the crate
pub type PoseResult<T> = Result<T, PoseError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoseError {
    /// NaN or infinite value in a landmark; the frame must not reach the smoother
    #[error("non-finite coordinate on landmark {keypoint}")]
    NonFiniteCoordinate { keypoint: Keypoint },

    #[error("keypoint {keypoint} appears more than once in one frame")]
    DuplicateKeypoint { keypoint: Keypoint },

    #[error("unknown keypoint name: {0}")]
    UnknownKeypoint(String),

    #[error("invalid flat frame length: {actual} (expected {expected})")]
    InvalidFrameLength { expected: usize, actual: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PoseError {
    fn from(err: serde_json::Error) -> Self {
        PoseError::Serialization(err.to_string())
    }
}
