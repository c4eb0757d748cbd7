//! Pipeline module - per-frame orchestration and its result types
//!
//! Re-exports only. All logic in submodules.

mod config;
mod throttle;
mod frame;
mod export;
mod processor;

pub use config::PipelineConfig;
pub use throttle::FrameThrottle;
pub use frame::PoseFrame;
pub use export::ExportRecord;
pub use processor::FramePipeline;
