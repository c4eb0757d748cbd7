//! Landmark Smoother - per-keypoint exponential moving average
//!
//! Suppresses frame-to-frame jitter on geometry only. Confidence and
//! visibility always pass through from the raw frame.

use crate::landmarks::{Keypoint, Landmark, LandmarkSet};

/// Session-scoped EMA filter over every keypoint
///
/// Owns the last emitted (smoothed) landmark per keypoint. One instance
/// per detection session; call `reset()` when the session restarts.
pub struct LandmarkSmoother {
    /// Weight of the raw frame: 1.0 = no smoothing, 0.0 = frozen
    alpha: f32,

    // State
    previous: [Option<Landmark>; Keypoint::COUNT],
}

impl LandmarkSmoother {
    /// `alpha` is clamped to [0, 1]
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha: Self::clamp_alpha(alpha),
            previous: [None; Keypoint::COUNT],
        }
    }

    fn clamp_alpha(alpha: f32) -> f32 {
        if alpha.is_nan() {
            1.0
        } else {
            alpha.clamp(0.0, 1.0)
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    fn blend(&self, raw: f32, prev: f32) -> f32 {
        self.alpha * raw + (1.0 - self.alpha) * prev
    }

    /// Filter one frame
    ///
    /// First sighting of a keypoint passes through untouched. Keypoints
    /// missing from `raw` are neither emitted nor updated.
    pub fn smooth(&mut self, raw: &LandmarkSet) -> LandmarkSet {
        let mut out = LandmarkSet::new();

        for lm in raw.iter() {
            let slot = lm.keypoint.index();
            let smoothed = match self.previous[slot] {
                None => *lm,
                Some(prev) => Landmark {
                    x: self.blend(lm.x, prev.x),
                    y: self.blend(lm.y, prev.y),
                    z: match (lm.z, prev.z) {
                        (Some(z), Some(pz)) => Some(self.blend(z, pz)),
                        (z, _) => z,
                    },
                    ..*lm
                },
            };

            self.previous[slot] = Some(smoothed);
            out.insert(smoothed);
        }

        out
    }

    /// Forget all history; next frame is a first sighting for every keypoint
    pub fn reset(&mut self) {
        self.previous = [None; Keypoint::COUNT];
    }

    pub fn has_history(&self, keypoint: Keypoint) -> bool {
        self.previous[keypoint.index()].is_some()
    }
}

impl Default for LandmarkSmoother {
    fn default() -> Self {
        Self::new(0.5)
    }
}
