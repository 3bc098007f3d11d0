//! Pass/fail depth judging.

use serde::{Deserialize, Serialize};

use crate::analysis::smoother::SmoothedHeights;

/// Upper bound of the displayed depth fraction.
pub const MAX_DEPTH_PCT: f32 = 1.2;

/// Depth verdict for one frame. Recomputed every frame, never carried forward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthVerdict {
    /// `hip_y <= knee_y + tolerance` on the smoothed heights.
    pub is_good: bool,
    /// Smoothed knee y minus hip y, converted to centimeters.
    pub margin_cm: f32,
    /// `margin_cm` relative to the reference depth, clamped to `[0, 1.2]`.
    pub depth_pct: f32,
}

/// Judge depth from smoothed heights.
///
/// The pass/fail decision uses `tolerance` alone (normalized units, downward
/// positive). `reference_cm` only scales the displayed depth fraction.
pub fn judge_depth(
    heights: SmoothedHeights,
    tolerance: f32,
    cm_per_pixel: f32,
    frame_height: usize,
    reference_cm: f32,
) -> DepthVerdict {
    let is_good = heights.hip <= heights.knee + tolerance;

    let margin_norm = heights.knee - heights.hip;
    let margin_px = margin_norm * frame_height as f32;
    let margin_cm = margin_px * cm_per_pixel;
    let depth_pct = (margin_cm / reference_cm).clamp(0.0, MAX_DEPTH_PCT);

    DepthVerdict {
        is_good,
        margin_cm,
        depth_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heights(hip: f32, knee: f32) -> SmoothedHeights {
        SmoothedHeights { hip, knee }
    }

    #[test]
    fn test_hip_above_knee_passes_with_zero_tolerance() {
        let verdict = judge_depth(heights(0.55, 0.60), 0.0, 0.2, 1000, 4.0);
        assert!(verdict.is_good);
        // 0.05 * 1000 px * 0.2 cm/px
        assert!((verdict.margin_cm - 10.0).abs() < 1e-3);
        assert_eq!(verdict.depth_pct, MAX_DEPTH_PCT);
    }

    #[test]
    fn test_equal_heights_pass() {
        let verdict = judge_depth(heights(0.6, 0.6), 0.0, 0.2, 1000, 4.0);
        assert!(verdict.is_good);
        assert_eq!(verdict.margin_cm, 0.0);
        assert_eq!(verdict.depth_pct, 0.0);
    }

    #[test]
    fn test_tolerance_decides_near_misses() {
        let shallow = heights(0.62, 0.60);
        assert!(!judge_depth(shallow, 0.0, 0.2, 1000, 4.0).is_good);
        assert!(judge_depth(shallow, 0.03, 0.2, 1000, 4.0).is_good);
    }

    #[test]
    fn test_depth_pct_is_clamped() {
        for (hip, knee) in [(0.0, 1.0), (1.0, 0.0), (0.5, 0.5005), (0.3, 0.9)] {
            let verdict = judge_depth(heights(hip, knee), 0.01, 5.0, 4000, 4.0);
            assert!((0.0..=MAX_DEPTH_PCT).contains(&verdict.depth_pct));
        }
    }

    #[test]
    fn test_partial_depth_fraction() {
        // 0.01 * 1000 * 0.2 = 2 cm of a 4 cm reference
        let verdict = judge_depth(heights(0.59, 0.60), 0.0, 0.2, 1000, 4.0);
        assert!((verdict.depth_pct - 0.5).abs() < 1e-3);
    }
}
