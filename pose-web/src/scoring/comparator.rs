//! Pose comparison - similarity score and correction feedback
//!
//! Scores a detected angle map against a reference posture. Every joint
//! in the reference counts; a joint the detector could not measure is a
//! full miss rather than being ignored.

use serde::{Deserialize, Serialize};

use crate::kinematics::JointAngles;

pub const DEFAULT_TOLERANCE_DEGREES: f32 = 15.0;

/// Score and instructions for one comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseComparison {
    /// 0-100
    pub score: u32,
    pub feedback: Vec<String>,
}

fn sanitize_tolerance(tolerance: f32) -> f32 {
    // NaN also lands on 0 here
    tolerance.max(0.0)
}

/// Credit for one joint given its absolute angle difference
///
/// Full credit inside the tolerance, then linear down to zero at twice
/// the tolerance.
pub fn joint_credit(diff: f32, tolerance: f32) -> f32 {
    let tolerance = sanitize_tolerance(tolerance);
    if diff <= tolerance {
        1.0
    } else {
        (1.0 - (diff - tolerance) / tolerance).max(0.0)
    }
}

/// Similarity of `detected` to `reference`, 0-100
///
/// An empty reference scores 0: no data is never a perfect match.
pub fn compare(detected: &JointAngles, reference: &JointAngles, tolerance: f32) -> u32 {
    let mut total = 0.0_f32;
    let mut count = 0_usize;

    for (joint, target) in reference.iter() {
        count += 1;
        if let Some(actual) = detected.get(joint) {
            total += joint_credit((actual - target).abs(), tolerance);
        }
    }

    if count == 0 {
        return 0;
    }
    (100.0 * total / count as f32).round() as u32
}

/// One instruction per measured joint outside the tolerance
///
/// Follows the reference's joint order; no ranking by severity.
/// Joints missing from `detected` are skipped.
pub fn feedback(detected: &JointAngles, reference: &JointAngles, tolerance: f32) -> Vec<String> {
    let tolerance = sanitize_tolerance(tolerance);

    reference
        .iter()
        .filter_map(|(joint, target)| {
            let actual = detected.get(joint)?;
            let diff = actual - target;
            if diff.abs() <= tolerance {
                return None;
            }
            let verb = if diff < 0.0 { "Increase" } else { "Decrease" };
            Some(format!(
                "{} {} angle by {}°",
                verb,
                joint.label(),
                diff.abs().round() as u32
            ))
        })
        .collect()
}

/// Score and feedback in one pass, as handed to the UI
pub fn evaluate(detected: &JointAngles, reference: &JointAngles, tolerance: f32) -> PoseComparison {
    PoseComparison {
        score: compare(detected, reference, tolerance),
        feedback: feedback(detected, reference, tolerance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::Joint;

    const TOL: f32 = DEFAULT_TOLERANCE_DEGREES;

    #[test]
    fn test_identical_scores_100() {
        let angles = JointAngles::new()
            .with(Joint::LeftKnee, 87.0)
            .with(Joint::Spine, 172.5)
            .with(Joint::RightElbow, 33.0);
        assert_eq!(compare(&angles, &angles, TOL), 100);
        assert!(feedback(&angles, &angles, TOL).is_empty());
    }

    #[test]
    fn test_empty_reference_scores_zero() {
        let detected = JointAngles::new().with(Joint::LeftKnee, 90.0);
        assert_eq!(compare(&detected, &JointAngles::new(), TOL), 0);
    }

    #[test]
    fn test_empty_detected_scores_zero() {
        let reference = JointAngles::new().with(Joint::LeftKnee, 90.0);
        assert_eq!(compare(&JointAngles::new(), &reference, TOL), 0);
        assert!(feedback(&JointAngles::new(), &reference, TOL).is_empty());
    }

    #[test]
    fn test_credit_curve() {
        assert_eq!(joint_credit(0.0, TOL), 1.0);
        assert_eq!(joint_credit(TOL / 2.0, TOL), 1.0);
        assert_eq!(joint_credit(TOL, TOL), 1.0);
        assert!((joint_credit(1.5 * TOL, TOL) - 0.5).abs() < 1e-6);
        assert_eq!(joint_credit(2.0 * TOL, TOL), 0.0);
        assert_eq!(joint_credit(90.0, TOL), 0.0);
    }

    #[test]
    fn test_zero_tolerance_is_exact_match_only() {
        assert_eq!(joint_credit(0.0, 0.0), 1.0);
        assert_eq!(joint_credit(0.1, 0.0), 0.0);
    }

    #[test]
    fn test_partial_credit_score() {
        let reference = JointAngles::new().with(Joint::LeftElbow, 90.0);
        let detected = JointAngles::new().with(Joint::LeftElbow, 112.5);
        assert_eq!(compare(&detected, &reference, TOL), 50);
    }

    #[test]
    fn test_within_tolerance_scenario() {
        let detected = JointAngles::new().with(Joint::LeftKnee, 90.0).with(Joint::RightKnee, 170.0);
        let reference = JointAngles::new().with(Joint::LeftKnee, 90.0).with(Joint::RightKnee, 180.0);
        assert_eq!(compare(&detected, &reference, TOL), 100);
    }

    #[test]
    fn test_full_miss_scenario() {
        let detected = JointAngles::new().with(Joint::LeftKnee, 60.0);
        let reference = JointAngles::new().with(Joint::LeftKnee, 90.0).with(Joint::RightKnee, 180.0);
        assert_eq!(compare(&detected, &reference, TOL), 0);
    }

    #[test]
    fn test_feedback_direction_and_order() {
        let detected = JointAngles::new()
            .with(Joint::LeftElbow, 150.0)
            .with(Joint::LeftKnee, 60.4)
            .with(Joint::Spine, 175.0);
        let reference = JointAngles::new()
            .with(Joint::LeftElbow, 90.0)
            .with(Joint::LeftKnee, 90.0)
            .with(Joint::RightKnee, 90.0)
            .with(Joint::Spine, 180.0);

        assert_eq!(
            feedback(&detected, &reference, TOL),
            vec![
                "Decrease left elbow angle by 60°".to_string(),
                "Increase left knee angle by 30°".to_string(),
            ]
        );
    }

    #[test]
    fn test_evaluate_bundles_both() {
        let detected = JointAngles::new().with(Joint::Neck, 140.0);
        let reference = JointAngles::new().with(Joint::Neck, 170.0);
        let result = evaluate(&detected, &reference, TOL);
        assert_eq!(result.score, 0);
        assert_eq!(result.feedback, vec!["Increase neck angle by 30°".to_string()]);
    }
}
