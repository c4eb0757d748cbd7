//! Landmarks module - keypoint vocabulary and per-frame storage
//!
//! Re-exports only. All logic in submodules.

mod keypoint;
mod landmark;
mod set;

pub use keypoint::Keypoint;
pub use landmark::Landmark;
pub use set::{LandmarkSet, FLAT_FRAME_LEN, FLAT_STRIDE};
