//! Export record - flattened frame for an external store
//!
//! Only builds and serializes the record; writing it anywhere is the
//! caller's concern.

use serde::{Deserialize, Serialize};

use super::PoseFrame;
use crate::error::PoseResult;
use crate::kinematics::JointAngles;
use crate::landmarks::Landmark;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub session_id: String,
    pub timestamp: f64,
    pub landmarks: Vec<Landmark>,
    pub angles: JointAngles,
    pub frame_number: u64,
    pub confidence: f32,
}

impl ExportRecord {
    pub fn from_frame(session_id: impl Into<String>, frame: &PoseFrame) -> Self {
        Self {
            session_id: session_id.into(),
            timestamp: frame.timestamp_ms(),
            landmarks: frame.landmarks().to_vec(),
            angles: *frame.angles(),
            frame_number: frame.frame_number(),
            confidence: frame.confidence(),
        }
    }

    pub fn to_json(&self) -> PoseResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
