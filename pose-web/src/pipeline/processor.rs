//! Frame pipeline - validate, smooth, measure, package
//!
//! One instance per detection session. Owns the smoother state, so frames
//! for a session must go through the same instance in arrival order.

use super::{FrameThrottle, PipelineConfig, PoseFrame};
use crate::error::PoseResult;
use crate::kinematics::{
    calculate_joint_angles, is_person_fully_visible, pose_confidence, LandmarkSmoother, RegionVisibility,
};
use crate::landmarks::LandmarkSet;

pub struct FramePipeline {
    config: PipelineConfig,
    smoother: LandmarkSmoother,
    throttle: FrameThrottle,
    /// Number of frames produced so far; next frame's number
    frame_counter: u64,
}

impl FramePipeline {
    /// Fails only on an invalid configuration
    pub fn new(config: PipelineConfig) -> PoseResult<Self> {
        config.validate()?;
        log::info!(
            "pose pipeline started (smoothing: {}, factor: {}, target fps: {})",
            config.enable_smoothing,
            config.smoothing_factor,
            config.target_fps
        );
        Ok(Self {
            smoother: LandmarkSmoother::new(config.smoothing_factor),
            throttle: FrameThrottle::new(config.target_fps),
            frame_counter: 0,
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Frames processed since the pipeline was created
    pub fn frame_count(&self) -> u64 {
        self.frame_counter
    }

    /// Frame-rate gate for callers that receive frames faster than `target_fps`
    pub fn accepts(&mut self, timestamp_ms: f64) -> bool {
        self.throttle.accept(timestamp_ms)
    }

    /// Throttled `process`: `None` when the frame falls inside the current slot
    ///
    /// A malformed frame is rejected before it can claim a throttle slot.
    pub fn ingest(&mut self, raw: &LandmarkSet, timestamp_ms: f64) -> PoseResult<Option<PoseFrame>> {
        self.check(raw)?;
        if !self.throttle.accept(timestamp_ms) {
            return Ok(None);
        }
        self.process(raw, timestamp_ms).map(Some)
    }

    fn check(&self, raw: &LandmarkSet) -> PoseResult<()> {
        raw.validate().map_err(|err| {
            log::warn!("frame {} rejected: {}", self.frame_counter, err);
            err
        })
    }

    /// Process one raw frame into a `PoseFrame`
    ///
    /// Frames with NaN/∞ values are rejected before they reach the
    /// smoother; its state stays as it was.
    pub fn process(&mut self, raw: &LandmarkSet, timestamp_ms: f64) -> PoseResult<PoseFrame> {
        self.check(raw)?;

        let landmarks = if self.config.enable_smoothing {
            self.smoother.smooth(raw)
        } else {
            *raw
        };

        let min_confidence = self.config.min_confidence;
        let angles = calculate_joint_angles(&landmarks, min_confidence);
        let confidence = pose_confidence(&landmarks);
        let person_detected = is_person_fully_visible(&landmarks, min_confidence);
        let regions = RegionVisibility::assess(&landmarks, min_confidence);

        let frame = PoseFrame::new(
            landmarks,
            angles,
            confidence,
            person_detected,
            regions,
            self.frame_counter,
            timestamp_ms,
        );
        self.frame_counter += 1;

        log::debug!(
            "frame {}: {} landmarks, {} angles, confidence {:.2}, person {}",
            frame.frame_number(),
            frame.landmarks().len(),
            frame.angles().len(),
            confidence,
            person_detected
        );

        Ok(frame)
    }

    /// Start a new detection session on this pipeline
    ///
    /// Clears smoothing history and the throttle. The frame counter keeps
    /// counting so frame numbers stay monotonic.
    pub fn reset(&mut self) {
        self.smoother.reset();
        self.throttle.reset();
        log::info!("pose pipeline reset at frame {}", self.frame_counter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PoseError;
    use crate::kinematics::Joint;
    use crate::landmarks::{Keypoint, Landmark};
    use crate::pipeline::ExportRecord;
    use crate::scoring::ReferencePose;

    fn body(offset: f32) -> LandmarkSet {
        use Keypoint as K;
        LandmarkSet::from_landmarks(
            [
                (K::Nose, 0.50, 0.10),
                (K::LeftShoulder, 0.60, 0.25),
                (K::RightShoulder, 0.40, 0.25),
                (K::LeftElbow, 0.60, 0.40),
                (K::LeftWrist, 0.60, 0.55),
                (K::LeftHip, 0.58, 0.55),
                (K::RightHip, 0.42, 0.55),
                (K::LeftKnee, 0.58, 0.75),
                (K::RightKnee, 0.42, 0.75),
                (K::LeftAnkle, 0.58, 0.95),
            ]
            .into_iter()
            .map(|(kp, x, y)| Landmark::new(kp, x + offset, y, 0.9)),
        )
        .unwrap()
    }

    fn config(enable_smoothing: bool, smoothing_factor: f32) -> PipelineConfig {
        PipelineConfig {
            enable_smoothing,
            smoothing_factor,
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = FramePipeline::new(config(true, 2.0));
        assert!(matches!(result, Err(PoseError::InvalidConfig(_))));
    }

    #[test]
    fn test_frame_contents() {
        let mut pipeline = FramePipeline::new(PipelineConfig::default()).unwrap();
        let frame = pipeline.process(&body(0.0), 1000.0).unwrap();

        assert_eq!(frame.frame_number(), 0);
        assert_eq!(frame.timestamp_ms(), 1000.0);
        assert_eq!(frame.landmarks(), &body(0.0));
        assert!(frame.person_detected());
        assert!((frame.confidence() - 0.9).abs() < 1e-6);
        assert!(frame.angles().contains(Joint::LeftKnee));
        assert!(frame.angles().contains(Joint::Spine));
        assert!(!frame.angles().contains(Joint::RightKnee));

        let regions = frame.regions();
        assert!(!regions.head);
        assert!(regions.torso && regions.arms && regions.legs);
    }

    #[test]
    fn test_frame_numbers_increase() {
        let mut pipeline = FramePipeline::new(PipelineConfig::default()).unwrap();
        for expected in 0..3 {
            let frame = pipeline.process(&body(0.0), expected as f64 * 33.0).unwrap();
            assert_eq!(frame.frame_number(), expected);
        }
        pipeline.reset();
        assert_eq!(pipeline.process(&body(0.0), 0.0).unwrap().frame_number(), 3);
        assert_eq!(pipeline.frame_count(), 4);
    }

    #[test]
    fn test_smoothing_applied_when_enabled() {
        let mut pipeline = FramePipeline::new(config(true, 0.5)).unwrap();
        pipeline.process(&body(0.0), 0.0).unwrap();
        let frame = pipeline.process(&body(0.2), 33.0).unwrap();
        let nose = frame.landmarks().get(Keypoint::Nose).unwrap();
        assert!((nose.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_smoothing_bypassed_when_disabled() {
        let mut pipeline = FramePipeline::new(config(false, 0.5)).unwrap();
        pipeline.process(&body(0.0), 0.0).unwrap();
        let frame = pipeline.process(&body(0.2), 33.0).unwrap();
        assert_eq!(frame.landmarks(), &body(0.2));
    }

    #[test]
    fn test_nan_frame_rejected_without_poisoning_state() {
        let mut pipeline = FramePipeline::new(config(true, 0.5)).unwrap();
        pipeline.process(&body(0.0), 0.0).unwrap();

        let mut bad = body(0.0);
        bad.insert(Landmark::new(Keypoint::Nose, f32::NAN, 0.1, 0.9));
        let err = pipeline.process(&bad, 33.0).unwrap_err();
        assert_eq!(err, PoseError::NonFiniteCoordinate { keypoint: Keypoint::Nose });
        assert_eq!(pipeline.frame_count(), 1);

        let frame = pipeline.process(&body(0.2), 66.0).unwrap();
        let nose = frame.landmarks().get(Keypoint::Nose).unwrap();
        assert!((nose.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_reset_restores_pass_through() {
        let mut pipeline = FramePipeline::new(config(true, 0.1)).unwrap();
        pipeline.process(&body(0.0), 0.0).unwrap();
        pipeline.reset();
        let frame = pipeline.process(&body(0.3), 33.0).unwrap();
        assert_eq!(frame.landmarks(), &body(0.3));
    }

    #[test]
    fn test_independent_sessions() {
        let mut a = FramePipeline::new(config(true, 0.5)).unwrap();
        let mut b = FramePipeline::new(config(true, 0.5)).unwrap();
        a.process(&body(0.0), 0.0).unwrap();
        // b has no history from a
        assert_eq!(b.process(&body(0.3), 0.0).unwrap().landmarks(), &body(0.3));
    }

    #[test]
    fn test_empty_frame() {
        let mut pipeline = FramePipeline::new(PipelineConfig::default()).unwrap();
        let frame = pipeline.process(&LandmarkSet::new(), 0.0).unwrap();
        assert!(frame.angles().is_empty());
        assert_eq!(frame.confidence(), 0.0);
        assert!(!frame.person_detected());
        assert_eq!(*frame.regions(), RegionVisibility::default());
    }

    #[test]
    fn test_throttle_uses_target_fps() {
        let mut pipeline = FramePipeline::new(PipelineConfig {
            target_fps: 20,
            ..PipelineConfig::default()
        })
        .unwrap();
        assert!(pipeline.accepts(0.0));
        assert!(!pipeline.accepts(40.0));
        assert!(pipeline.accepts(50.0));
    }

    #[test]
    fn test_rejected_frame_does_not_claim_slot() {
        let mut pipeline = FramePipeline::new(PipelineConfig::default()).unwrap();
        let mut bad = body(0.0);
        bad.insert(Landmark::new(Keypoint::LeftKnee, 0.58, f32::NAN, 0.9));

        assert!(pipeline.ingest(&bad, 0.0).is_err());
        let frame = pipeline.ingest(&body(0.0), 10.0).unwrap();
        assert_eq!(frame.map(|f| f.frame_number()), Some(0));
        assert!(pipeline.ingest(&body(0.0), 20.0).unwrap().is_none());
    }

    #[test]
    fn test_compare_and_export() {
        let mut pipeline = FramePipeline::new(PipelineConfig::default()).unwrap();
        let frame = pipeline.process(&body(0.0), 1234.0).unwrap();

        let reference = ReferencePose::new(
            "stand",
            frame.angles().iter().filter(|(joint, _)| *joint == Joint::LeftKnee).collect(),
        );
        let result = frame.compare_to(&reference, 15.0);
        assert_eq!(result.score, 100);
        assert!(result.feedback.is_empty());

        let record = ExportRecord::from_frame("session-1", &frame);
        assert_eq!(record.session_id, "session-1");
        assert_eq!(record.frame_number, 0);
        assert_eq!(record.timestamp, 1234.0);
        assert_eq!(record.landmarks.len(), 10);

        let json = record.to_json().unwrap();
        assert!(json.contains("\"sessionId\":\"session-1\""));
        assert!(json.contains("\"frameNumber\":0"));
        assert!(json.contains("\"leftKnee\""));
    }
}
