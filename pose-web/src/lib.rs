//! Pose Web - landmark processing pipeline for pose coaching
//!
//! Turns per-frame body keypoints from an external pose model into
//! smoothed landmarks, joint angles, visibility verdicts and a score
//! against a reference posture. Entry point for the WASM module; the
//! same API is usable from Rust directly.
//!
//! - `landmarks`: keypoint vocabulary and per-frame storage
//! - `kinematics`: geometry, smoothing, joint angles, quality gates
//! - `scoring`: comparison against reference postures
//! - `pipeline`: per-frame orchestration, config, export
//! - `bridge`: wasm_bindgen session handle

pub mod error;
pub mod landmarks;
pub mod kinematics;
pub mod scoring;
pub mod pipeline;
mod bridge;

use wasm_bindgen::prelude::*;

pub use bridge::PoseSession;
pub use error::{PoseError, PoseResult};
pub use kinematics::{Joint, JointAngles};
pub use landmarks::{Keypoint, Landmark, LandmarkSet};
pub use pipeline::{ExportRecord, FramePipeline, PipelineConfig, PoseFrame};
pub use scoring::{PoseComparison, ReferencePose};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Route `log` output to the browser console
///
/// Level: "trace", "debug", "info", "warn" or "error" (default "info")
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "warn" => log::Level::Warn,
        "error" => log::Level::Error,
        _ => log::Level::Info,
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("pose-web {} logging at {}", env!("CARGO_PKG_VERSION"), level);
}

#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
