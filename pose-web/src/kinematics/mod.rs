//! Kinematics module - geometry, smoothing, joint angles and quality gates
//!
//! Re-exports only. All logic in submodules.

mod geometry;
mod smoother;
mod angles;
mod quality;

pub use geometry::{angle_between, distance, midpoint};
pub use smoother::LandmarkSmoother;
pub use angles::{calculate_joint_angles, Joint, JointAngles, MIN_JOINT_CONFIDENCE};
pub use quality::{
    is_body_part_visible, is_person_fully_visible, pose_confidence, BodyRegion, RegionVisibility, CRITICAL_KEYPOINTS,
};
