//! Keypoint vocabulary (COCO 17-point body model)
//!
//! Closed enumeration used as the index into every per-keypoint array
//! in the crate, so lookups are array reads instead of name matching.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PoseError;

/// One tracked body point. Discriminant doubles as the arena index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Keypoint {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl Keypoint {
    pub const COUNT: usize = 17;

    /// All keypoints in index order
    pub const ALL: [Keypoint; Keypoint::COUNT] = [
        Keypoint::Nose,
        Keypoint::LeftEye,
        Keypoint::RightEye,
        Keypoint::LeftEar,
        Keypoint::RightEar,
        Keypoint::LeftShoulder,
        Keypoint::RightShoulder,
        Keypoint::LeftElbow,
        Keypoint::RightElbow,
        Keypoint::LeftWrist,
        Keypoint::RightWrist,
        Keypoint::LeftHip,
        Keypoint::RightHip,
        Keypoint::LeftKnee,
        Keypoint::RightKnee,
        Keypoint::LeftAnkle,
        Keypoint::RightAnkle,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Wire name, matching the pose model's output vocabulary
    pub fn name(self) -> &'static str {
        match self {
            Keypoint::Nose => "nose",
            Keypoint::LeftEye => "leftEye",
            Keypoint::RightEye => "rightEye",
            Keypoint::LeftEar => "leftEar",
            Keypoint::RightEar => "rightEar",
            Keypoint::LeftShoulder => "leftShoulder",
            Keypoint::RightShoulder => "rightShoulder",
            Keypoint::LeftElbow => "leftElbow",
            Keypoint::RightElbow => "rightElbow",
            Keypoint::LeftWrist => "leftWrist",
            Keypoint::RightWrist => "rightWrist",
            Keypoint::LeftHip => "leftHip",
            Keypoint::RightHip => "rightHip",
            Keypoint::LeftKnee => "leftKnee",
            Keypoint::RightKnee => "rightKnee",
            Keypoint::LeftAnkle => "leftAnkle",
            Keypoint::RightAnkle => "rightAnkle",
        }
    }
}

impl fmt::Display for Keypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Keypoint {
    type Err = PoseError;

    /// Accepts camelCase (`leftShoulder`) and snake_case (`left_shoulder`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Keypoint::ALL
            .iter()
            .copied()
            .find(|kp| kp.name().to_ascii_lowercase() == folded)
            .ok_or_else(|| PoseError::UnknownKeypoint(s.to_string()))
    }
}
