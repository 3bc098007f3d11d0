use ndarray::Array3;

use crate::tracker::rect::PatchRect;

/// Lifecycle of the object tracker.
#[derive(Debug, Clone, Default)]
pub enum TrackerState {
    /// No target selected yet
    #[default]
    Uninitialized,
    /// Following a template captured at initialization
    Tracking {
        /// Reference patch, `[row, column, channel]`. Captured once, never refreshed.
        template: Array3<u8>,
        /// Location of the best match in the most recent frame
        position: PatchRect,
    },
}

impl TrackerState {
    #[inline]
    pub fn is_tracking(&self) -> bool {
        matches!(self, TrackerState::Tracking { .. })
    }

    /// Last known patch location, `None` while uninitialized.
    pub fn position(&self) -> Option<PatchRect> {
        match self {
            TrackerState::Uninitialized => None,
            TrackerState::Tracking { position, .. } => Some(*position),
        }
    }
}
