//! A single detected keypoint (normalized coordinates)

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use super::Keypoint;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Landmark {
    #[serde(rename = "name")]
    pub keypoint: Keypoint,
    pub x: f32, // 0-1 normalized
    pub y: f32, // 0-1 normalized
    /// Relative depth, when the model provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
    pub confidence: f32,
    /// Occlusion flag from the model, independent of `confidence`
    pub is_visible: bool,
}

impl Landmark {
    /// Visible 2D landmark
    pub fn new(keypoint: Keypoint, x: f32, y: f32, confidence: f32) -> Self {
        Self {
            keypoint,
            x,
            y,
            z: None,
            confidence,
            is_visible: true,
        }
    }

    pub fn with_depth(mut self, z: f32) -> Self {
        self.z = Some(z);
        self
    }

    pub fn with_visibility(mut self, is_visible: bool) -> Self {
        self.is_visible = is_visible;
        self
    }

    /// Position in the image plane
    pub fn position(&self) -> Point2<f32> {
        Point2::new(self.x, self.y)
    }

    /// Visible and strictly above the confidence floor
    pub fn is_reliable(&self, min_confidence: f32) -> bool {
        self.is_visible && self.confidence > min_confidence
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.confidence.is_finite()
            && self.z.map_or(true, f32::is_finite)
    }
}
