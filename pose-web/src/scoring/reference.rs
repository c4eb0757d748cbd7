//! Reference postures
//!
//! Target angle sets are authored outside this crate (exercise library,
//! coach recordings) and arrive as JSON. They are read-only inputs to
//! the comparator.

use serde::{Deserialize, Serialize};

use crate::error::PoseResult;
use crate::kinematics::{Joint, JointAngles};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencePose {
    pub name: String,
    pub angles: JointAngles,
}

impl ReferencePose {
    pub fn new(name: impl Into<String>, angles: JointAngles) -> Self {
        Self {
            name: name.into(),
            angles,
        }
    }

    /// Parse `{"name": "...", "angles": {"leftKnee": 90, ...}}`
    pub fn from_json(json: &str) -> PoseResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a list of references
    pub fn library_from_json(json: &str) -> PoseResult<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn target(&self, joint: Joint) -> Option<f32> {
        self.angles.get(joint)
    }
}
