//! Single-target template tracker.
//!
//! The template is captured once at initialization and never refreshed, and
//! there is no loss detection: the tracker always reports its best match in
//! the search window, even after the real target has left it.

use tracing::{debug, info, warn};

use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::tracker::frame::Frame;
use crate::tracker::matching::search_window;
use crate::tracker::rect::{PatchRect, PixelPoint};
use crate::tracker::track_state::TrackerState;

pub struct ObjectTracker {
    config: TrackerConfig,
    state: TrackerState,
}

impl ObjectTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            state: TrackerState::Uninitialized,
        }
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    #[inline]
    pub fn is_tracking(&self) -> bool {
        self.state.is_tracking()
    }

    /// Center of the last match, `None` while uninitialized.
    pub fn position(&self) -> Option<PixelPoint> {
        self.state.position().map(|rect| rect.center())
    }

    /// Replace the tuning. The patch size of an active template is kept.
    pub fn set_config(&mut self, config: TrackerConfig) {
        self.config = config;
    }

    /// Capture a template centered on pixel `(x, y)` and start tracking it.
    ///
    /// Fails without touching the current state when the patch would extend
    /// past the frame edges.
    pub fn initialize(
        &mut self,
        frame: &Frame<'_>,
        x: i64,
        y: i64,
    ) -> Result<PixelPoint, TrackerError> {
        let size = self.config.patch_size(frame.width());
        let Some(rect) = PatchRect::centered(x, y, size, frame.width(), frame.height()) else {
            warn!(x, y, size, "tracker target too close to the frame edge");
            return Err(TrackerError::PatchOutOfBounds {
                x,
                y,
                size,
                width: frame.width(),
                height: frame.height(),
            });
        };

        let template = frame
            .pixels()
            .slice(ndarray::s![rect.y..rect.y + size, rect.x..rect.x + size, ..])
            .to_owned();
        self.state = TrackerState::Tracking {
            template,
            position: rect,
        };

        info!(x, y, size, "tracker initialized");
        Ok(rect.center())
    }

    /// Locate the template in `frame` near the previous match.
    ///
    /// Holds the previous position when no candidate fits inside the frame or
    /// when the frame's pixel format no longer matches the template.
    pub fn update(&mut self, frame: &Frame<'_>) -> Option<PixelPoint> {
        let TrackerState::Tracking { template, position } = &mut self.state else {
            return None;
        };

        if template.dim().2 != frame.channels() {
            warn!(
                template_channels = template.dim().2,
                frame_channels = frame.channels(),
                "frame pixel format differs from template, holding position"
            );
            return Some(position.center());
        }

        let radius = self.config.search_radius(frame.width());
        match search_window(
            frame,
            &template.view(),
            *position,
            radius,
            self.config.sample_stride,
        ) {
            Some(found) => *position = found.rect,
            None => debug!(?position, "no candidate inside the frame, holding position"),
        }
        Some(position.center())
    }

    /// Drop the template and return to the uninitialized state.
    pub fn clear(&mut self) {
        if self.state.is_tracking() {
            info!("tracker cleared");
        }
        self.state = TrackerState::Uninitialized;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TrackerConfig {
        TrackerConfig {
            patch_fraction: 0.1,
            min_patch_px: 8,
            search_fraction: 0.1,
            min_search_px: 6,
            sample_stride: 1,
        }
    }

    fn blank(width: usize, height: usize) -> Vec<u8> {
        vec![20u8; width * height * 3]
    }

    fn paint_square(data: &mut [u8], width: usize, x: usize, y: usize, size: usize) {
        for row in y..y + size {
            for col in x..x + size {
                let i = (row * width + col) * 3;
                data[i..i + 3].copy_from_slice(&[240, 200, 30]);
            }
        }
    }

    #[test]
    fn test_rejects_patch_past_edge() {
        let data = blank(100, 80);
        let frame = Frame::packed(&data, 100, 80, 3).unwrap();
        let mut tracker = ObjectTracker::new(config());

        // 10 px patch centered 3 px from the left edge
        let err = tracker.initialize(&frame, 3, 40).unwrap_err();
        assert!(matches!(err, TrackerError::PatchOutOfBounds { size: 10, .. }));
        assert!(!tracker.is_tracking());
        assert_eq!(tracker.update(&frame), None);
    }

    #[test]
    fn test_follows_moving_square() {
        let (w, h) = (100, 80);
        let mut first = blank(w, h);
        paint_square(&mut first, w, 40, 30, 10);
        let frame = Frame::packed(&first, w, h, 3).unwrap();

        let mut tracker = ObjectTracker::new(config());
        let start = tracker.initialize(&frame, 45, 35).unwrap();
        assert_eq!(start, PixelPoint::new(45.0, 35.0));

        let mut second = blank(w, h);
        paint_square(&mut second, w, 44, 24, 10);
        let frame = Frame::packed(&second, w, h, 3).unwrap();
        assert_eq!(tracker.update(&frame), Some(PixelPoint::new(49.0, 29.0)));
    }

    #[test]
    fn test_clear_returns_to_uninitialized() {
        let data = blank(100, 80);
        let frame = Frame::packed(&data, 100, 80, 3).unwrap();
        let mut tracker = ObjectTracker::new(config());
        tracker.initialize(&frame, 50, 40).unwrap();
        assert!(tracker.is_tracking());
        tracker.clear();
        assert!(!tracker.is_tracking());
        assert_eq!(tracker.position(), None);
    }

    #[test]
    fn test_holds_on_channel_mismatch() {
        let data = blank(100, 80);
        let frame = Frame::packed(&data, 100, 80, 3).unwrap();
        let mut tracker = ObjectTracker::new(config());
        let start = tracker.initialize(&frame, 50, 40).unwrap();

        let rgba = vec![0u8; 100 * 80 * 4];
        let frame = Frame::packed(&rgba, 100, 80, 4).unwrap();
        assert_eq!(tracker.update(&frame), Some(start));
    }
}
