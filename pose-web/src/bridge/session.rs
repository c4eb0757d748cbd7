//! PoseSession - JS-owned handle to one detection session
//!
//! Each session owns its own pipeline (and therefore its own smoothing
//! history); nothing lives in thread-local globals, so two sessions on
//! the same page never share state.

use serde::Serialize;
use uuid::Uuid;
use wasm_bindgen::prelude::*;

use crate::error::{PoseError, PoseResult};
use crate::kinematics::JointAngles;
use crate::landmarks::{Landmark, LandmarkSet};
use crate::pipeline::{ExportRecord, FramePipeline, PipelineConfig, PoseFrame};
use crate::scoring::evaluate;

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> PoseResult<T> {
    serde_wasm_bindgen::from_value(value).map_err(|e| PoseError::Serialization(e.to_string()))
}

/// Plain JS objects (not `Map`s) so the UI can read fields directly
fn to_js<T: Serialize>(value: &T) -> PoseResult<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| PoseError::Serialization(e.to_string()))
}

fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[wasm_bindgen]
pub struct PoseSession {
    id: Uuid,
    pipeline: FramePipeline,
}

// ============================================================================
// RUST API (natively testable)
// ============================================================================

impl PoseSession {
    pub fn with_config(config: PipelineConfig) -> PoseResult<Self> {
        let id = Uuid::new_v4();
        log::info!("pose session {} created", id);
        Ok(Self {
            id,
            pipeline: FramePipeline::new(config)?,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Run one frame through the pipeline unless the throttle skips it
    pub fn ingest(&mut self, raw: &LandmarkSet, timestamp_ms: f64) -> PoseResult<Option<PoseFrame>> {
        self.pipeline.ingest(raw, timestamp_ms)
    }

    pub fn export(&self, frame: &PoseFrame) -> ExportRecord {
        ExportRecord::from_frame(self.id.to_string(), frame)
    }

    fn frame_to_js(frame: Option<PoseFrame>) -> PoseResult<JsValue> {
        match frame {
            Some(frame) => to_js(&frame),
            None => Ok(JsValue::UNDEFINED),
        }
    }
}

// ============================================================================
// WASM-BINDGEN ENTRY POINTS
// ============================================================================

#[wasm_bindgen]
impl PoseSession {
    /// `config` may be `undefined` for defaults, or a partial camelCase object
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<PoseSession, JsError> {
        let config = if config.is_undefined() || config.is_null() {
            PipelineConfig::default()
        } else {
            from_js(config)?
        };
        Ok(Self::with_config(config)?)
    }

    #[wasm_bindgen(getter, js_name = sessionId)]
    pub fn session_id(&self) -> String {
        self.id.to_string()
    }

    /// Process `[{name, x, y, z?, confidence, isVisible}, ...]`
    ///
    /// Returns the PoseFrame object, or `undefined` when throttled.
    #[wasm_bindgen(js_name = processFrame)]
    pub fn process_frame(&mut self, landmarks: JsValue, timestamp_ms: Option<f64>) -> Result<JsValue, JsError> {
        let list: Vec<Landmark> = from_js(landmarks)?;
        let raw = LandmarkSet::from_landmarks(list)?;
        let frame = self.ingest(&raw, timestamp_ms.unwrap_or_else(now_ms))?;
        Ok(Self::frame_to_js(frame)?)
    }

    /// Process a flat Float32Array of 17 × [x, y, z, confidence, visibility]
    #[wasm_bindgen(js_name = processFlat)]
    pub fn process_flat(&mut self, data: &[f32], timestamp_ms: Option<f64>) -> Result<JsValue, JsError> {
        let raw = LandmarkSet::from_flat(data)?;
        let frame = self.ingest(&raw, timestamp_ms.unwrap_or_else(now_ms))?;
        Ok(Self::frame_to_js(frame)?)
    }

    /// Score an angle map against a reference angle map: `{score, feedback}`
    ///
    /// `tolerance` falls back to the session's configured tolerance.
    pub fn compare(&self, angles: JsValue, reference: JsValue, tolerance: Option<f32>) -> Result<JsValue, JsError> {
        let detected: JointAngles = from_js(angles)?;
        let reference: JointAngles = from_js(reference)?;
        let tolerance = tolerance.unwrap_or(self.pipeline.config().tolerance_degrees);
        Ok(to_js(&evaluate(&detected, &reference, tolerance))?)
    }

    /// Flatten a PoseFrame returned by `processFrame` into an export JSON string
    #[wasm_bindgen(js_name = exportFrame)]
    pub fn export_frame(&self, frame: JsValue) -> Result<String, JsError> {
        let frame: PoseFrame = from_js(frame)?;
        Ok(self.export(&frame).to_json()?)
    }

    /// Call when the subject leaves the frame or the exercise restarts
    pub fn reset(&mut self) {
        self.pipeline.reset();
    }

    #[wasm_bindgen(js_name = frameCount)]
    pub fn frame_count(&self) -> f64 {
        self.pipeline.frame_count() as f64
    }
}
