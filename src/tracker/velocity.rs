//! Vertical bar velocity from tracked positions.

use serde::{Deserialize, Serialize};

/// Velocity reported for one frame, in meters per second. Upward is positive.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VelocitySample {
    pub instantaneous: f32,
    /// Highest upward velocity of the current concentric phase
    pub peak: f32,
}

#[derive(Debug, Clone, Copy)]
struct LastSample {
    y: f32,
    timestamp: f64,
}

/// Finite-difference velocity with a sign-change rep boundary.
///
/// The running peak grows while the bar moves up and resets to zero on the
/// first downward sample once it has exceeded `rep_reset_threshold`. There is
/// no hysteresis, so a single jittery sample can close a rep early.
#[derive(Debug, Clone)]
pub struct VelocityEstimator {
    rep_reset_threshold: f32,
    last: Option<LastSample>,
    instantaneous: f32,
    peak: f32,
    completed_reps: u32,
    last_rep_peak: Option<f32>,
}

impl VelocityEstimator {
    pub fn new(rep_reset_threshold: f32) -> Self {
        Self {
            rep_reset_threshold,
            last: None,
            instantaneous: 0.0,
            peak: 0.0,
            completed_reps: 0,
            last_rep_peak: None,
        }
    }

    pub fn set_rep_reset_threshold(&mut self, threshold: f32) {
        self.rep_reset_threshold = threshold;
    }

    /// Fold in the tracked vertical position (pixels) at `timestamp` (seconds).
    pub fn update(&mut self, y: f32, timestamp: f64, cm_per_pixel: f32) -> VelocitySample {
        let Some(last) = self.last else {
            self.last = Some(LastSample { y, timestamp });
            self.instantaneous = 0.0;
            return self.sample();
        };

        let dt = timestamp - last.timestamp;
        // Image y grows downward, so a shrinking y is upward motion.
        let v = (f64::from(last.y - y) * f64::from(cm_per_pixel) / dt / 100.0) as f32;
        if dt <= 0.0 || !v.is_finite() {
            return self.sample();
        }

        self.last = Some(LastSample { y, timestamp });
        self.instantaneous = v;

        if v > 0.0 {
            self.peak = self.peak.max(v);
        } else if v < 0.0 && self.peak > self.rep_reset_threshold {
            self.completed_reps += 1;
            self.last_rep_peak = Some(self.peak);
            self.peak = 0.0;
        }
        self.sample()
    }

    #[inline]
    pub fn sample(&self) -> VelocitySample {
        VelocitySample {
            instantaneous: self.instantaneous,
            peak: self.peak,
        }
    }

    /// Number of concentric phases closed so far.
    pub fn completed_reps(&self) -> u32 {
        self.completed_reps
    }

    /// Peak velocity of the most recently closed concentric phase.
    pub fn last_rep_peak(&self) -> Option<f32> {
        self.last_rep_peak
    }

    /// Forget the last position so the next sample re-seeds. Peak and rep
    /// count are kept.
    pub fn resume(&mut self) {
        self.last = None;
        self.instantaneous = 0.0;
    }

    pub fn reset(&mut self) {
        self.resume();
        self.peak = 0.0;
        self.completed_reps = 0;
        self.last_rep_peak = None;
    }
}

impl Default for VelocityEstimator {
    fn default() -> Self {
        Self::new(0.05)
    }
}
