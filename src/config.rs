//! Tunable parameters for the motion engine.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for the [`MotionEngine`](crate::MotionEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Depth tolerance in normalized image units (suggested 0.0 to 0.05).
    pub tolerance: f32,
    /// Number of samples averaged by the hip and knee histories.
    pub smoothing_window: usize,
    /// Anatomical tibia length used to derive the pixel scale.
    pub tibia_length_cm: f32,
    /// Scale used until the first frame with both lower legs visible.
    pub default_cm_per_pixel: f32,
    /// Margin that maps to a depth percentage of 100%.
    pub depth_reference_cm: f32,
    pub tracker: TrackerConfig,
    pub velocity: VelocityConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.0,
            smoothing_window: 5,
            tibia_length_cm: 38.5,
            default_cm_per_pixel: 0.2,
            depth_reference_cm: 4.0,
            tracker: TrackerConfig::default(),
            velocity: VelocityConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        if self.smoothing_window == 0 {
            return Err(ConfigError::ZeroSmoothingWindow);
        }
        positive("tibia_length_cm", self.tibia_length_cm)?;
        positive("default_cm_per_pixel", self.default_cm_per_pixel)?;
        positive("depth_reference_cm", self.depth_reference_cm)?;
        self.tracker.validate()?;
        self.velocity.validate()
    }
}

/// Configuration for the template-matching object tracker.
///
/// Patch size and search radius scale with the frame width so the same
/// settings work for portrait phone video and landscape webcams alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Patch edge length as a fraction of frame width.
    pub patch_fraction: f32,
    /// Smallest patch edge in pixels.
    pub min_patch_px: usize,
    /// Search radius as a fraction of frame width.
    pub search_fraction: f32,
    /// Smallest search radius in pixels.
    pub min_search_px: usize,
    /// Pixel step used when comparing a candidate against the template.
    pub sample_stride: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            patch_fraction: 0.06,
            min_patch_px: 16,
            search_fraction: 0.05,
            min_search_px: 8,
            sample_stride: 2,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        fraction("patch_fraction", self.patch_fraction)?;
        fraction("search_fraction", self.search_fraction)?;
        if self.sample_stride == 0 {
            return Err(ConfigError::ZeroSampleStride);
        }
        Ok(())
    }

    /// Patch edge length in pixels for a frame of the given width.
    pub fn patch_size(&self, frame_width: usize) -> usize {
        let scaled = (frame_width as f32 * self.patch_fraction).round() as usize;
        scaled.max(self.min_patch_px).max(1)
    }

    /// Search radius in pixels for a frame of the given width.
    pub fn search_radius(&self, frame_width: usize) -> usize {
        let scaled = (frame_width as f32 * self.search_fraction).round() as usize;
        scaled.max(self.min_search_px)
    }
}

/// Configuration for the velocity estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VelocityConfig {
    /// Running peak (m/s) that must be exceeded before a downward sample
    /// closes the concentric phase.
    pub rep_reset_threshold: f32,
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self {
            rep_reset_threshold: 0.05,
        }
    }
}

impl VelocityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.rep_reset_threshold.is_finite() || self.rep_reset_threshold < 0.0 {
            return Err(ConfigError::InvalidRepThreshold(self.rep_reset_threshold));
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveLength { name, value })
    }
}

fn fraction(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::FractionOutOfRange { name, value })
    }
}
