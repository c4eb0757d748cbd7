//! PoseFrame - the packaged per-frame result
//!
//! Built fresh by the pipeline for every processed frame and handed to
//! the caller, who owns it from then on. Read-only after construction.

use serde::{Deserialize, Serialize};

use crate::kinematics::{JointAngles, RegionVisibility};
use crate::landmarks::LandmarkSet;
use crate::scoring::{evaluate, PoseComparison, ReferencePose};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseFrame {
    landmarks: LandmarkSet,
    angles: JointAngles,
    confidence: f32,
    person_detected: bool,
    #[serde(default)]
    regions: RegionVisibility,
    frame_number: u64,
    #[serde(rename = "timestamp")]
    timestamp_ms: f64,
}

impl PoseFrame {
    pub(crate) fn new(
        landmarks: LandmarkSet,
        angles: JointAngles,
        confidence: f32,
        person_detected: bool,
        regions: RegionVisibility,
        frame_number: u64,
        timestamp_ms: f64,
    ) -> Self {
        Self {
            landmarks,
            angles,
            confidence,
            person_detected,
            regions,
            frame_number,
            timestamp_ms,
        }
    }

    /// Smoothed landmarks (raw when smoothing is disabled)
    pub fn landmarks(&self) -> &LandmarkSet {
        &self.landmarks
    }

    pub fn angles(&self) -> &JointAngles {
        &self.angles
    }

    /// Mean confidence of visible landmarks
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Enough of the critical body points are in frame to give feedback
    pub fn person_detected(&self) -> bool {
        self.person_detected
    }

    /// Per-region verdicts so the UI can say which part is out of frame
    pub fn regions(&self) -> &RegionVisibility {
        &self.regions
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn timestamp_ms(&self) -> f64 {
        self.timestamp_ms
    }

    /// Compare this frame's angles against a reference posture
    pub fn compare_to(&self, reference: &ReferencePose, tolerance: f32) -> PoseComparison {
        evaluate(&self.angles, &reference.angles, tolerance)
    }
}
