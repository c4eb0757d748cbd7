//! Scoring module - comparison against reference postures
//!
//! Re-exports only. All logic in submodules.

mod comparator;
mod reference;

pub use comparator::{compare, evaluate, feedback, joint_credit, PoseComparison, DEFAULT_TOLERANCE_DEGREES};
pub use reference::ReferencePose;
