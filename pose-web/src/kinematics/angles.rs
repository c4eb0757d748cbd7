//! Joint angle calculation
//!
//! Angles come from three points: proximal, vertex, distal (e.g.
//! shoulder→elbow→wrist). Torso, head and the terminal joints (wrist,
//! ankle) have no third anatomical point in the 17-keypoint model, so
//! they measure against synthetic gravity-relative references instead.

use std::collections::BTreeMap;

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use super::geometry::{angle_between, midpoint};
use crate::landmarks::{Keypoint, LandmarkSet};

/// Default confidence floor for trusting a landmark
pub const MIN_JOINT_CONFIDENCE: f32 = 0.5;

/// Offset for synthetic reference points; any positive value gives the same angle
const REFERENCE_OFFSET: f32 = 0.1;

// ============================================================================
// JOINTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Joint {
    LeftElbow = 0,
    RightElbow = 1,
    LeftShoulder = 2,
    RightShoulder = 3,
    LeftWrist = 4,
    RightWrist = 5,
    LeftHip = 6,
    RightHip = 7,
    LeftKnee = 8,
    RightKnee = 9,
    LeftAnkle = 10,
    RightAnkle = 11,
    Neck = 12,
    Spine = 13,
}

/// How a joint's angle is constructed
enum JointGeometry {
    /// angle at the vertex between two anatomical neighbours
    Triplet(Keypoint, Keypoint, Keypoint),
    /// angle at `vertex` between `proximal` and a point straight below the vertex
    Plumb { proximal: Keypoint, vertex: Keypoint },
    /// torso lean: hip midpoint, shoulder midpoint, point above shoulder midpoint
    Spine,
    /// head over torso: nose, shoulder midpoint, hip midpoint
    Neck,
}

impl Joint {
    pub const COUNT: usize = 14;

    pub const ALL: [Joint; Joint::COUNT] = [
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftWrist,
        Joint::RightWrist,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftAnkle,
        Joint::RightAnkle,
        Joint::Neck,
        Joint::Spine,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name for feedback text
    pub fn label(self) -> &'static str {
        match self {
            Joint::LeftElbow => "left elbow",
            Joint::RightElbow => "right elbow",
            Joint::LeftShoulder => "left shoulder",
            Joint::RightShoulder => "right shoulder",
            Joint::LeftWrist => "left wrist",
            Joint::RightWrist => "right wrist",
            Joint::LeftHip => "left hip",
            Joint::RightHip => "right hip",
            Joint::LeftKnee => "left knee",
            Joint::RightKnee => "right knee",
            Joint::LeftAnkle => "left ankle",
            Joint::RightAnkle => "right ankle",
            Joint::Neck => "neck",
            Joint::Spine => "spine",
        }
    }

    fn geometry(self) -> JointGeometry {
        use Keypoint as K;
        match self {
            Joint::LeftElbow => JointGeometry::Triplet(K::LeftShoulder, K::LeftElbow, K::LeftWrist),
            Joint::RightElbow => JointGeometry::Triplet(K::RightShoulder, K::RightElbow, K::RightWrist),
            Joint::LeftShoulder => JointGeometry::Triplet(K::LeftElbow, K::LeftShoulder, K::LeftHip),
            Joint::RightShoulder => JointGeometry::Triplet(K::RightElbow, K::RightShoulder, K::RightHip),
            Joint::LeftHip => JointGeometry::Triplet(K::LeftShoulder, K::LeftHip, K::LeftKnee),
            Joint::RightHip => JointGeometry::Triplet(K::RightShoulder, K::RightHip, K::RightKnee),
            Joint::LeftKnee => JointGeometry::Triplet(K::LeftHip, K::LeftKnee, K::LeftAnkle),
            Joint::RightKnee => JointGeometry::Triplet(K::RightHip, K::RightKnee, K::RightAnkle),
            Joint::LeftWrist => JointGeometry::Plumb { proximal: K::LeftElbow, vertex: K::LeftWrist },
            Joint::RightWrist => JointGeometry::Plumb { proximal: K::RightElbow, vertex: K::RightWrist },
            Joint::LeftAnkle => JointGeometry::Plumb { proximal: K::LeftKnee, vertex: K::LeftAnkle },
            Joint::RightAnkle => JointGeometry::Plumb { proximal: K::RightKnee, vertex: K::RightAnkle },
            Joint::Neck => JointGeometry::Neck,
            Joint::Spine => JointGeometry::Spine,
        }
    }
}

// ============================================================================
// ANGLE MAP
// ============================================================================

/// Partial map from joint to degrees; `None` means not measurable this frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(into = "BTreeMap<Joint, f32>", from = "BTreeMap<Joint, f32>")]
pub struct JointAngles {
    angles: [Option<f32>; Joint::COUNT],
}

impl JointAngles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, joint: Joint) -> Option<f32> {
        self.angles[joint.index()]
    }

    pub fn set(&mut self, joint: Joint, degrees: f32) {
        self.angles[joint.index()] = Some(degrees);
    }

    pub fn with(mut self, joint: Joint, degrees: f32) -> Self {
        self.set(joint, degrees);
        self
    }

    pub fn contains(&self, joint: Joint) -> bool {
        self.angles[joint.index()].is_some()
    }

    /// Present joints in `Joint` declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Joint, f32)> + '_ {
        Joint::ALL
            .iter()
            .filter_map(move |joint| self.get(*joint).map(|deg| (*joint, deg)))
    }

    pub fn len(&self) -> usize {
        self.angles.iter().filter(|a| a.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.iter().all(Option::is_none)
    }
}

impl FromIterator<(Joint, f32)> for JointAngles {
    fn from_iter<I: IntoIterator<Item = (Joint, f32)>>(iter: I) -> Self {
        let mut angles = JointAngles::new();
        for (joint, degrees) in iter {
            angles.set(joint, degrees);
        }
        angles
    }
}

impl From<JointAngles> for BTreeMap<Joint, f32> {
    fn from(angles: JointAngles) -> Self {
        angles.iter().collect()
    }
}

impl From<BTreeMap<Joint, f32>> for JointAngles {
    fn from(map: BTreeMap<Joint, f32>) -> Self {
        map.into_iter().collect()
    }
}

// ============================================================================
// CALCULATION
// ============================================================================

/// Compute every measurable joint angle from a (smoothed) landmark set
///
/// A joint is omitted unless all of its landmarks are present, visible
/// and strictly above `min_confidence`.
pub fn calculate_joint_angles(landmarks: &LandmarkSet, min_confidence: f32) -> JointAngles {
    let point = |kp: Keypoint| landmarks.reliable(kp, min_confidence).map(|lm| lm.position());

    let torso = || -> Option<(Point2<f32>, Point2<f32>)> {
        let shoulders = midpoint(&point(Keypoint::LeftShoulder)?, &point(Keypoint::RightShoulder)?);
        let hips = midpoint(&point(Keypoint::LeftHip)?, &point(Keypoint::RightHip)?);
        Some((shoulders, hips))
    };

    // Image y grows downward
    let up = Vector2::new(0.0, -REFERENCE_OFFSET);

    Joint::ALL
        .iter()
        .filter_map(|joint| {
            let degrees = match joint.geometry() {
                JointGeometry::Triplet(a, b, c) => angle_between(&point(a)?, &point(b)?, &point(c)?),
                JointGeometry::Plumb { proximal, vertex } => {
                    let v = point(vertex)?;
                    angle_between(&point(proximal)?, &v, &(v - up))
                }
                JointGeometry::Spine => {
                    let (shoulders, hips) = torso()?;
                    angle_between(&hips, &shoulders, &(shoulders + up))
                }
                JointGeometry::Neck => {
                    let nose = point(Keypoint::Nose)?;
                    let (shoulders, hips) = torso()?;
                    angle_between(&nose, &shoulders, &hips)
                }
            };
            Some((*joint, degrees))
        })
        .collect()
}
