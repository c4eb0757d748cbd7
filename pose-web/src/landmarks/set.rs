//! Per-frame landmark storage
//!
//! Fixed-size arena indexed by `Keypoint`: one slot per keypoint, so a
//! frame can never hold two entries for the same point.

use serde::{Deserialize, Serialize};

use super::{Keypoint, Landmark};
use crate::error::{PoseError, PoseResult};

/// Floats per keypoint in the flat layout: x, y, z, confidence, visibility
pub const FLAT_STRIDE: usize = 5;

/// Total floats in one flat frame
pub const FLAT_FRAME_LEN: usize = Keypoint::COUNT * FLAT_STRIDE;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(into = "Vec<Landmark>", try_from = "Vec<Landmark>")]
pub struct LandmarkSet {
    slots: [Option<Landmark>; Keypoint::COUNT],
}

impl LandmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list; a keypoint named twice is rejected
    pub fn from_landmarks<I>(landmarks: I) -> PoseResult<Self>
    where
        I: IntoIterator<Item = Landmark>,
    {
        let mut set = Self::new();
        for landmark in landmarks {
            let slot = &mut set.slots[landmark.keypoint.index()];
            if slot.is_some() {
                return Err(PoseError::DuplicateKeypoint {
                    keypoint: landmark.keypoint,
                });
            }
            *slot = Some(landmark);
        }
        Ok(set)
    }

    /// Decode a flat `Float32Array` frame (17 × [x, y, z, confidence, visibility])
    ///
    /// - visibility `1` = visible, `0` = occluded, negative = not detected
    /// - NaN z = no depth
    pub fn from_flat(data: &[f32]) -> PoseResult<Self> {
        if data.len() != FLAT_FRAME_LEN {
            return Err(PoseError::InvalidFrameLength {
                expected: FLAT_FRAME_LEN,
                actual: data.len(),
            });
        }

        let mut set = Self::new();
        for (keypoint, chunk) in Keypoint::ALL.iter().zip(data.chunks_exact(FLAT_STRIDE)) {
            let visibility = chunk[4];
            if visibility < 0.0 {
                continue;
            }
            let z = if chunk[2].is_nan() { None } else { Some(chunk[2]) };
            set.insert(Landmark {
                keypoint: *keypoint,
                x: chunk[0],
                y: chunk[1],
                z,
                confidence: chunk[3],
                is_visible: visibility >= 0.5,
            });
        }
        Ok(set)
    }

    /// Store a landmark, replacing any previous entry for its keypoint
    pub fn insert(&mut self, landmark: Landmark) {
        self.slots[landmark.keypoint.index()] = Some(landmark);
    }

    pub fn get(&self, keypoint: Keypoint) -> Option<&Landmark> {
        self.slots[keypoint.index()].as_ref()
    }

    /// Landmark only if visible and above the confidence floor
    pub fn reliable(&self, keypoint: Keypoint, min_confidence: f32) -> Option<&Landmark> {
        self.get(keypoint).filter(|lm| lm.is_reliable(min_confidence))
    }

    /// Present landmarks in keypoint order
    pub fn iter(&self) -> impl Iterator<Item = &Landmark> + '_ {
        self.slots.iter().filter_map(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Reject NaN/∞ before anything stateful sees the frame
    pub fn validate(&self) -> PoseResult<()> {
        match self.iter().find(|lm| !lm.is_finite()) {
            Some(bad) => Err(PoseError::NonFiniteCoordinate {
                keypoint: bad.keypoint,
            }),
            None => Ok(()),
        }
    }

    pub fn to_vec(&self) -> Vec<Landmark> {
        self.iter().copied().collect()
    }
}

impl From<LandmarkSet> for Vec<Landmark> {
    fn from(set: LandmarkSet) -> Self {
        set.to_vec()
    }
}

impl TryFrom<Vec<Landmark>> for LandmarkSet {
    type Error = PoseError;

    fn try_from(landmarks: Vec<Landmark>) -> Result<Self, Self::Error> {
        LandmarkSet::from_landmarks(landmarks)
    }
}
