//! Pipeline configuration
//!
//! Passed explicitly per session; no hidden globals beyond the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::{PoseError, PoseResult};
use crate::kinematics::MIN_JOINT_CONFIDENCE;
use crate::scoring::DEFAULT_TOLERANCE_DEGREES;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    /// Confidence floor for angles and visibility gates (0.0-1.0)
    pub min_confidence: f32,
    /// Run the EMA smoother before angle calculation
    pub enable_smoothing: bool,
    /// Weight of the raw frame in the EMA (0.0-1.0, 1.0 = no smoothing)
    pub smoothing_factor: f32,
    /// Comparator tolerance in degrees
    pub tolerance_degrees: f32,
    /// Frames per second to process; faster input is throttled
    pub target_fps: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_confidence: MIN_JOINT_CONFIDENCE,
            enable_smoothing: true,
            smoothing_factor: 0.5,
            tolerance_degrees: DEFAULT_TOLERANCE_DEGREES,
            target_fps: 30,
        }
    }
}

impl PipelineConfig {
    /// Parse camelCase JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> PoseResult<Self> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PoseResult<()> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(PoseError::InvalidConfig(format!(
                "minConfidence {} must be between 0.0 and 1.0",
                self.min_confidence
            )));
        }

        if !(0.0..=1.0).contains(&self.smoothing_factor) {
            return Err(PoseError::InvalidConfig(format!(
                "smoothingFactor {} must be between 0.0 and 1.0",
                self.smoothing_factor
            )));
        }

        if !self.tolerance_degrees.is_finite() || self.tolerance_degrees < 0.0 {
            return Err(PoseError::InvalidConfig(format!(
                "toleranceDegrees {} must be a non-negative number",
                self.tolerance_degrees
            )));
        }

        if self.target_fps == 0 || self.target_fps > 120 {
            return Err(PoseError::InvalidConfig(format!(
                "targetFps {} must be between 1 and 120",
                self.target_fps
            )));
        }

        Ok(())
    }
}
