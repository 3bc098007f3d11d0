//! Per-session motion analysis state, advanced once per frame.

use serde::Serialize;
use tracing::{info, trace};

use crate::analysis::{Calibration, DepthVerdict, HeightSmoother, JointAngles, judge_depth};
use crate::config::{EngineConfig, TrackerConfig, VelocityConfig};
use crate::error::{ConfigError, TrackerError};
use crate::pose::Skeleton;
use crate::tracker::{Frame, ObjectTracker, PixelPoint, VelocityEstimator, VelocitySample};

/// Measurements produced for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameAnalysis {
    /// 1-based index of this frame since the engine was created or reset.
    pub frame_index: u64,
    /// `None` when no hip or no knee was observed.
    pub verdict: Option<DepthVerdict>,
    /// `None` on frames without a pose.
    pub angles: Option<JointAngles>,
    /// Center of the tracked patch in pixels, `None` while not tracking.
    pub tracked_position: Option<PixelPoint>,
    /// `None` while not tracking.
    pub velocity: Option<VelocitySample>,
    pub cm_per_pixel: f32,
    /// Consecutive frames, including this one, without a pose.
    pub frames_without_pose: u32,
    pub completed_reps: u32,
    /// Peak upward velocity of the most recently completed concentric phase.
    pub last_rep_peak: Option<f32>,
}

/// Owns every piece of per-session state: calibration, height histories,
/// tracker and velocity bookkeeping.
///
/// All operations are synchronous and take `&mut self`; callers advancing the
/// engine from several threads must serialize access themselves.
pub struct MotionEngine {
    config: EngineConfig,
    calibration: Calibration,
    smoother: HeightSmoother,
    tracker: ObjectTracker,
    velocity: VelocityEstimator,
    frame_count: u64,
    frames_without_pose: u32,
}

impl Default for MotionEngine {
    fn default() -> Self {
        Self::from_valid(EngineConfig::default())
    }
}

impl MotionEngine {
    /// Create an engine after validating `config`.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: EngineConfig) -> Self {
        Self {
            calibration: Calibration::new(config.tibia_length_cm, config.default_cm_per_pixel),
            smoother: HeightSmoother::new(config.smoothing_window),
            tracker: ObjectTracker::new(config.tracker.clone()),
            velocity: VelocityEstimator::new(config.velocity.rep_reset_threshold),
            frame_count: 0,
            frames_without_pose: 0,
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current image scale, the configured default until a full pair of
    /// lower legs has been seen.
    pub fn cm_per_pixel(&self) -> f32 {
        self.calibration.cm_per_pixel()
    }

    /// Frames processed since creation or the last reset.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Whether a tracker target is set.
    pub fn is_tracking(&self) -> bool {
        self.tracker.is_tracking()
    }

    /// Process one frame.
    ///
    /// `skeleton` is `None` (or empty) when the pose estimator found nobody;
    /// calibration and height histories are then left untouched. `timestamp`
    /// is in seconds on any monotonic clock.
    pub fn advance(
        &mut self,
        skeleton: Option<&Skeleton>,
        frame: &Frame<'_>,
        timestamp: f64,
    ) -> FrameAnalysis {
        self.frame_count += 1;
        let (width, height) = (frame.width(), frame.height());

        let (verdict, angles) = match skeleton.filter(|s| !s.is_empty()) {
            Some(skeleton) => {
                self.frames_without_pose = 0;
                let cm_per_pixel = self.calibration.update(skeleton, width, height);
                let verdict = self.judge(skeleton, cm_per_pixel, height);
                (verdict, Some(JointAngles::measure(skeleton, width, height)))
            }
            None => {
                self.frames_without_pose = self.frames_without_pose.saturating_add(1);
                (None, None)
            }
        };

        let cm_per_pixel = self.calibration.cm_per_pixel();
        let tracked_position = self.tracker.update(frame);
        let velocity =
            tracked_position.map(|p| self.velocity.update(p.y, timestamp, cm_per_pixel));

        trace!(
            frame = self.frame_count,
            ?verdict,
            ?tracked_position,
            cm_per_pixel,
            "frame analyzed"
        );

        FrameAnalysis {
            frame_index: self.frame_count,
            verdict,
            angles,
            tracked_position,
            velocity,
            cm_per_pixel,
            frames_without_pose: self.frames_without_pose,
            completed_reps: self.velocity.completed_reps(),
            last_rep_peak: self.velocity.last_rep_peak(),
        }
    }

    fn judge(
        &mut self,
        skeleton: &Skeleton,
        cm_per_pixel: f32,
        height: usize,
    ) -> Option<DepthVerdict> {
        let hip = skeleton.hip_height()?;
        let knee = skeleton.knee_height()?;
        let heights = self.smoother.push(hip, knee);
        Some(judge_depth(
            heights,
            self.config.tolerance,
            cm_per_pixel,
            height,
            self.config.depth_reference_cm,
        ))
    }

    /// Start tracking the object centered on pixel `(x, y)` of `frame`.
    ///
    /// On failure the previous tracker state, if any, is kept. On success the
    /// velocity estimator re-seeds from the next tracked position.
    pub fn set_tracker_target(
        &mut self,
        frame: &Frame<'_>,
        x: i64,
        y: i64,
    ) -> Result<PixelPoint, TrackerError> {
        let center = self.tracker.initialize(frame, x, y)?;
        self.velocity.resume();
        Ok(center)
    }

    /// Stop tracking and forget all velocity bookkeeping.
    pub fn clear_tracker(&mut self) {
        self.tracker.clear();
        self.velocity.reset();
    }

    /// Return to the freshly created state, keeping the configuration.
    pub fn reset(&mut self) {
        self.calibration.reset();
        self.smoother.clear();
        self.tracker.clear();
        self.velocity.reset();
        self.frame_count = 0;
        self.frames_without_pose = 0;
        info!("motion engine reset");
    }

    /// Change the depth tolerance, used from the next frame on.
    pub fn set_tolerance(&mut self, tolerance: f32) -> Result<(), ConfigError> {
        self.update_config(|c| c.tolerance = tolerance)
    }

    /// Change the smoothing window. Existing samples are trimmed on the next push.
    pub fn set_smoothing_window(&mut self, window: usize) -> Result<(), ConfigError> {
        self.update_config(|c| c.smoothing_window = window)
    }

    /// Change the anatomical reference. The scale is re-estimated on the next
    /// frame with both lower legs visible.
    pub fn set_tibia_length(&mut self, tibia_length_cm: f32) -> Result<(), ConfigError> {
        self.update_config(|c| c.tibia_length_cm = tibia_length_cm)
    }

    /// Change search tuning. An active template keeps its patch size.
    pub fn set_tracker_config(&mut self, tracker: TrackerConfig) -> Result<(), ConfigError> {
        self.update_config(|c| c.tracker = tracker)
    }

    /// Change the rep boundary threshold.
    pub fn set_velocity_config(&mut self, velocity: VelocityConfig) -> Result<(), ConfigError> {
        self.update_config(|c| c.velocity = velocity)
    }

    /// Replace the whole configuration. Histories, calibration and tracking
    /// state are kept.
    pub fn set_config(&mut self, config: EngineConfig) -> Result<(), ConfigError> {
        self.update_config(|c| *c = config)
    }

    fn update_config(&mut self, edit: impl FnOnce(&mut EngineConfig)) -> Result<(), ConfigError> {
        let mut config = self.config.clone();
        edit(&mut config);
        config.validate()?;

        self.smoother.set_window(config.smoothing_window);
        self.calibration.set_tibia_length(config.tibia_length_cm);
        self.calibration.set_default(config.default_cm_per_pixel);
        self.tracker.set_config(config.tracker.clone());
        self.velocity
            .set_rep_reset_threshold(config.velocity.rep_reset_threshold);
        self.config = config;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::Joint;

    fn squat(hip_y: f32, knee_y: f32) -> Skeleton {
        Skeleton::new()
            .with(Joint::LeftShoulder, 0.45, 0.3)
            .with(Joint::RightShoulder, 0.55, 0.3)
            .with(Joint::LeftHip, 0.45, hip_y)
            .with(Joint::RightHip, 0.55, hip_y)
            .with(Joint::LeftKnee, 0.4, knee_y)
            .with(Joint::RightKnee, 0.6, knee_y)
            .with(Joint::LeftAnkle, 0.4, knee_y + 0.2)
            .with(Joint::RightAnkle, 0.6, knee_y + 0.2)
    }

    #[test]
    fn test_missing_pose_leaves_histories() {
        let data = vec![0u8; 10 * 20 * 3];
        let frame = Frame::packed(&data, 10, 20, 3).unwrap();
        let mut engine = MotionEngine::default();

        engine.advance(Some(&squat(0.6, 0.6)), &frame, 0.0);
        let missing = engine.advance(None, &frame, 0.033);
        assert_eq!(missing.verdict, None);
        assert_eq!(missing.angles, None);
        assert_eq!(missing.frames_without_pose, 1);
        assert_eq!(engine.smoother.len(), 1);

        let empty = engine.advance(Some(&Skeleton::new()), &frame, 0.066);
        assert_eq!(empty.frames_without_pose, 2);
        assert_eq!(engine.smoother.len(), 1);
    }

    #[test]
    fn test_tibia_length_applies_on_next_frame() {
        // Shins span 0.2 * 20 = 4 px.
        let data = vec![0u8; 10 * 20 * 3];
        let frame = Frame::packed(&data, 10, 20, 3).unwrap();
        let mut engine = MotionEngine::default();

        let analysis = engine.advance(Some(&squat(0.5, 0.6)), &frame, 0.0);
        assert!((analysis.cm_per_pixel - 38.5 / 4.0).abs() < 1e-4);

        engine.set_tibia_length(40.0).unwrap();
        assert!((engine.cm_per_pixel() - 38.5 / 4.0).abs() < 1e-4);
        let analysis = engine.advance(Some(&squat(0.5, 0.6)), &frame, 0.1);
        assert!((analysis.cm_per_pixel - 10.0).abs() < 1e-4);

        assert!(engine.set_tibia_length(0.0).is_err());
        assert_eq!(engine.config().tibia_length_cm, 40.0);
    }

    #[test]
    fn test_tracker_config_applies_to_next_target() {
        let data = vec![0u8; 100 * 100 * 3];
        let frame = Frame::packed(&data, 100, 100, 3).unwrap();
        let mut engine = MotionEngine::default();

        // Default patch is 16 px: 5 px from the edge is rejected.
        assert!(engine.set_tracker_target(&frame, 5, 50).is_err());

        engine
            .set_tracker_config(TrackerConfig {
                min_patch_px: 8,
                ..TrackerConfig::default()
            })
            .unwrap();
        assert_eq!(engine.config().tracker.min_patch_px, 8);
        assert_eq!(
            engine.set_tracker_target(&frame, 5, 50).unwrap(),
            PixelPoint::new(5.0, 50.0)
        );

        let invalid = TrackerConfig {
            sample_stride: 0,
            ..TrackerConfig::default()
        };
        assert_eq!(
            engine.set_tracker_config(invalid),
            Err(ConfigError::ZeroSampleStride)
        );
        assert_eq!(engine.config().tracker.min_patch_px, 8);
    }

    #[test]
    fn test_invalid_update_keeps_config() {
        let mut engine = MotionEngine::default();
        assert_eq!(
            engine.set_smoothing_window(0),
            Err(ConfigError::ZeroSmoothingWindow)
        );
        assert_eq!(engine.config().smoothing_window, 5);
        assert!(engine.set_tolerance(f32::NAN).is_err());
        assert_eq!(engine.config().tolerance, 0.0);
    }
}
