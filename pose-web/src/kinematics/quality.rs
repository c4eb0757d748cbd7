//! Quality gates - whole-pose confidence and visibility verdicts
//!
//! Coarse checks the UI uses to suppress feedback when the subject is
//! not usably in frame. Not a precision measure.

use serde::{Deserialize, Serialize};

use crate::landmarks::{Keypoint, LandmarkSet};

/// Share of the critical subset that must qualify for "fully visible"
const FULL_BODY_RATIO: f32 = 0.7;

/// Share of a region's points that must qualify for the region to count
const REGION_RATIO: f32 = 0.5;

/// Points that must mostly be in frame before a pose is worth scoring
pub const CRITICAL_KEYPOINTS: [Keypoint; 7] = [
    Keypoint::Nose,
    Keypoint::LeftShoulder,
    Keypoint::RightShoulder,
    Keypoint::LeftHip,
    Keypoint::RightHip,
    Keypoint::LeftKnee,
    Keypoint::RightKnee,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyRegion {
    Head,
    Torso,
    Arms,
    Legs,
}

impl BodyRegion {
    pub const ALL: [BodyRegion; 4] = [BodyRegion::Head, BodyRegion::Torso, BodyRegion::Arms, BodyRegion::Legs];

    pub fn keypoints(self) -> &'static [Keypoint] {
        use Keypoint as K;
        match self {
            BodyRegion::Head => &[K::Nose, K::LeftEye, K::RightEye, K::LeftEar, K::RightEar],
            BodyRegion::Torso => &[K::LeftShoulder, K::RightShoulder, K::LeftHip, K::RightHip],
            BodyRegion::Arms => &[
                K::LeftShoulder,
                K::RightShoulder,
                K::LeftElbow,
                K::RightElbow,
                K::LeftWrist,
                K::RightWrist,
            ],
            BodyRegion::Legs => &[
                K::LeftHip,
                K::RightHip,
                K::LeftKnee,
                K::RightKnee,
                K::LeftAnkle,
                K::RightAnkle,
            ],
        }
    }
}

/// Mean confidence of visible landmarks; occluded ones are excluded, not down-weighted
pub fn pose_confidence(landmarks: &LandmarkSet) -> f32 {
    let (sum, count) = landmarks
        .iter()
        .filter(|lm| lm.is_visible)
        .fold((0.0_f32, 0_usize), |(sum, count), lm| (sum + lm.confidence, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}

/// `true` when at least `ratio` of `subset` is present, visible and above the floor
fn subset_visible(landmarks: &LandmarkSet, subset: &[Keypoint], min_confidence: f32, ratio: f32) -> bool {
    let qualified = subset
        .iter()
        .filter(|kp| landmarks.reliable(**kp, min_confidence).is_some())
        .count();
    qualified as f32 >= ratio * subset.len() as f32
}

/// At least 70% of the critical subset (5 of 7) qualifies
pub fn is_person_fully_visible(landmarks: &LandmarkSet, min_confidence: f32) -> bool {
    subset_visible(landmarks, &CRITICAL_KEYPOINTS, min_confidence, FULL_BODY_RATIO)
}

/// At least half of the region's points qualify
pub fn is_body_part_visible(landmarks: &LandmarkSet, region: BodyRegion, min_confidence: f32) -> bool {
    subset_visible(landmarks, region.keypoints(), min_confidence, REGION_RATIO)
}

/// Visibility verdict for every region of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionVisibility {
    pub head: bool,
    pub torso: bool,
    pub arms: bool,
    pub legs: bool,
}

impl RegionVisibility {
    pub fn assess(landmarks: &LandmarkSet, min_confidence: f32) -> Self {
        let visible = |region| is_body_part_visible(landmarks, region, min_confidence);
        Self {
            head: visible(BodyRegion::Head),
            torso: visible(BodyRegion::Torso),
            arms: visible(BodyRegion::Arms),
            legs: visible(BodyRegion::Legs),
        }
    }

    pub fn get(&self, region: BodyRegion) -> bool {
        match region {
            BodyRegion::Head => self.head,
            BodyRegion::Torso => self.torso,
            BodyRegion::Arms => self.arms,
            BodyRegion::Legs => self.legs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::Landmark;

    fn with_confident(keypoints: &[Keypoint]) -> LandmarkSet {
        LandmarkSet::from_landmarks(keypoints.iter().map(|kp| Landmark::new(*kp, 0.5, 0.5, 0.9))).unwrap()
    }

    #[test]
    fn test_confidence_of_empty_set() {
        assert_eq!(pose_confidence(&LandmarkSet::new()), 0.0);
    }

    #[test]
    fn test_confidence_ignores_occluded() {
        let set = LandmarkSet::from_landmarks([
            Landmark::new(Keypoint::Nose, 0.5, 0.1, 0.8),
            Landmark::new(Keypoint::LeftHip, 0.5, 0.5, 0.6),
            Landmark::new(Keypoint::RightHip, 0.5, 0.5, 1.0).with_visibility(false),
        ])
        .unwrap();
        assert!((pose_confidence(&set) - 0.7).abs() < 1e-6);

        let hidden = LandmarkSet::from_landmarks([Landmark::new(Keypoint::Nose, 0.5, 0.1, 0.8).with_visibility(false)])
            .unwrap();
        assert_eq!(pose_confidence(&hidden), 0.0);
    }

    #[test]
    fn test_five_of_seven_is_fully_visible() {
        let set = with_confident(&CRITICAL_KEYPOINTS[..5]);
        assert!(is_person_fully_visible(&set, 0.5));
    }

    #[test]
    fn test_four_of_seven_is_not() {
        let set = with_confident(&CRITICAL_KEYPOINTS[..4]);
        assert!(!is_person_fully_visible(&set, 0.5));
    }

    #[test]
    fn test_low_confidence_does_not_count() {
        let mut set = with_confident(&CRITICAL_KEYPOINTS[..4]);
        set.insert(Landmark::new(Keypoint::LeftKnee, 0.5, 0.7, 0.5));
        assert!(!is_person_fully_visible(&set, 0.5));
    }

    #[test]
    fn test_region_half_rule() {
        let set = with_confident(&[Keypoint::LeftHip, Keypoint::LeftKnee, Keypoint::LeftAnkle]);
        assert!(is_body_part_visible(&set, BodyRegion::Legs, 0.5));
        assert!(!is_body_part_visible(&set, BodyRegion::Torso, 0.5));

        let head = with_confident(&[Keypoint::Nose, Keypoint::LeftEye]);
        assert!(!is_body_part_visible(&head, BodyRegion::Head, 0.5));
    }

    #[test]
    fn test_region_visibility_matches_per_region_checks() {
        let set = with_confident(&[
            Keypoint::Nose,
            Keypoint::LeftShoulder,
            Keypoint::RightShoulder,
            Keypoint::LeftHip,
            Keypoint::RightHip,
        ]);
        let regions = RegionVisibility::assess(&set, 0.5);
        assert_eq!(
            regions,
            RegionVisibility {
                head: false,
                torso: true,
                arms: false,
                legs: false,
            }
        );
        for region in BodyRegion::ALL {
            assert_eq!(regions.get(region), is_body_part_visible(&set, region, 0.5));
        }

        let json = serde_json::to_string(&regions).unwrap();
        assert_eq!(json, r#"{"head":false,"torso":true,"arms":false,"legs":false}"#);
    }
}
