//! Pixel-to-centimeter scale derived from lower-leg length.

use tracing::debug;

use crate::pose::{Joint, Skeleton};

/// Self-calibrating image scale.
///
/// Both tibias (knee to ankle) are measured in pixels and compared against an
/// anatomical constant. This assumes an average tibia and a camera roughly
/// orthogonal to the shins; no markers or camera intrinsics are needed.
#[derive(Debug, Clone)]
pub struct Calibration {
    tibia_length_cm: f32,
    default_cm_per_pixel: f32,
    cm_per_pixel: f32,
    established: bool,
}

impl Calibration {
    pub fn new(tibia_length_cm: f32, default_cm_per_pixel: f32) -> Self {
        Self {
            tibia_length_cm,
            default_cm_per_pixel,
            cm_per_pixel: default_cm_per_pixel,
            established: false,
        }
    }

    /// Current scale. Always positive.
    #[inline]
    pub fn cm_per_pixel(&self) -> f32 {
        self.cm_per_pixel
    }

    /// Whether a frame with both lower legs has been seen since the last reset.
    pub fn is_established(&self) -> bool {
        self.established
    }

    pub fn set_tibia_length(&mut self, tibia_length_cm: f32) {
        self.tibia_length_cm = tibia_length_cm;
    }

    /// Change the seed scale. Takes effect immediately if no scale has been
    /// measured yet, otherwise after the next reset.
    pub fn set_default(&mut self, default_cm_per_pixel: f32) {
        self.default_cm_per_pixel = default_cm_per_pixel;
        if !self.established {
            self.cm_per_pixel = default_cm_per_pixel;
        }
    }

    /// Re-estimate the scale from this frame's lower legs.
    ///
    /// All four of knee and ankle, left and right, must be present; otherwise
    /// the previous scale is kept.
    pub fn update(&mut self, skeleton: &Skeleton, width: usize, height: usize) -> f32 {
        let (w, h) = (width as f32, height as f32);
        let legs = (
            skeleton.get(Joint::LeftKnee),
            skeleton.get(Joint::LeftAnkle),
            skeleton.get(Joint::RightKnee),
            skeleton.get(Joint::RightAnkle),
        );

        let (Some(lk), Some(la), Some(rk), Some(ra)) = legs else {
            debug!(
                cm_per_pixel = self.cm_per_pixel,
                "lower legs not fully visible, holding scale"
            );
            return self.cm_per_pixel;
        };

        let left = lk.pixel_distance(&la, w, h);
        let right = rk.pixel_distance(&ra, w, h);
        let lower_leg_px = (left + right) / 2.0;

        let scale = self.tibia_length_cm / lower_leg_px.max(1.0);
        if scale.is_finite() && scale > 0.0 {
            self.cm_per_pixel = scale;
            self.established = true;
        }
        self.cm_per_pixel
    }

    pub fn reset(&mut self) {
        self.cm_per_pixel = self.default_cm_per_pixel;
        self.established = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legs(shin: f32) -> Skeleton {
        Skeleton::new()
            .with(Joint::LeftKnee, 0.4, 0.6)
            .with(Joint::LeftAnkle, 0.4, 0.6 + shin)
            .with(Joint::RightKnee, 0.6, 0.6)
            .with(Joint::RightAnkle, 0.6, 0.6 + shin)
    }

    #[test]
    fn test_scale_from_both_shins() {
        let mut calibration = Calibration::new(38.5, 0.2);
        // 0.25 * 1000 px = 250 px per shin
        let scale = calibration.update(&legs(0.25), 500, 1000);
        assert!((scale - 38.5 / 250.0).abs() < 1e-5);
        assert!(calibration.is_established());
    }

    #[test]
    fn test_holds_when_ankle_missing() {
        let mut calibration = Calibration::new(38.5, 0.2);
        assert_eq!(calibration.update(&Skeleton::new(), 500, 1000), 0.2);

        calibration.update(&legs(0.25), 500, 1000);
        let before = calibration.cm_per_pixel();

        let mut partial = legs(0.1);
        partial.set(Joint::RightAnkle, None);
        assert_eq!(calibration.update(&partial, 500, 1000), before);
    }

    #[test]
    fn test_collapsed_legs_floor_at_one_pixel() {
        let mut calibration = Calibration::new(38.5, 0.2);
        let scale = calibration.update(&legs(0.0), 500, 1000);
        assert_eq!(scale, 38.5);
        assert!(scale > 0.0);
    }

    #[test]
    fn test_reset_restores_default() {
        let mut calibration = Calibration::new(38.5, 0.2);
        calibration.update(&legs(0.25), 500, 1000);
        calibration.reset();
        assert_eq!(calibration.cm_per_pixel(), 0.2);
        assert!(!calibration.is_established());
    }
}
