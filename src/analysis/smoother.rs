//! Moving-average smoothing of the hip and knee height signals.

use std::collections::VecDeque;

/// Bounded FIFO of scalar samples.
#[derive(Debug, Clone)]
pub struct History {
    samples: VecDeque<f32>,
    max_len: usize,
}

impl History {
    /// Create a history holding at most `max_len` samples (at least one).
    pub fn new(max_len: usize) -> Self {
        let max_len = max_len.max(1);
        Self {
            samples: VecDeque::with_capacity(max_len),
            max_len,
        }
    }

    /// Change the bound. Existing samples are trimmed on the next push.
    pub fn set_max_len(&mut self, max_len: usize) {
        self.max_len = max_len.max(1);
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn push(&mut self, value: f32) {
        self.samples.push_back(value);
        while self.samples.len() > self.max_len {
            self.samples.pop_front();
        }
    }

    /// Arithmetic mean of the retained samples, `None` while empty.
    pub fn average(&self) -> Option<f32> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: f32 = self.samples.iter().sum();
        Some(sum / self.samples.len() as f32)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Smoothed hip and knee heights in normalized units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedHeights {
    pub hip: f32,
    pub knee: f32,
}

/// Paired hip/knee histories advanced together.
#[derive(Debug, Clone)]
pub struct HeightSmoother {
    hip: History,
    knee: History,
}

impl HeightSmoother {
    pub fn new(window: usize) -> Self {
        Self {
            hip: History::new(window),
            knee: History::new(window),
        }
    }

    pub fn set_window(&mut self, window: usize) {
        self.hip.set_max_len(window);
        self.knee.set_max_len(window);
    }

    /// Fold one frame's heights into the histories and return the new averages.
    pub fn push(&mut self, hip: f32, knee: f32) -> SmoothedHeights {
        self.hip.push(hip);
        self.knee.push(knee);
        SmoothedHeights {
            hip: self.hip.average().unwrap_or(hip),
            knee: self.knee.average().unwrap_or(knee),
        }
    }

    /// Current averages without pushing, `None` before the first sample.
    pub fn current(&self) -> Option<SmoothedHeights> {
        Some(SmoothedHeights {
            hip: self.hip.average()?,
            knee: self.knee.average()?,
        })
    }

    pub fn len(&self) -> usize {
        self.hip.len()
    }

    pub fn clear(&mut self) {
        self.hip.clear();
        self.knee.clear();
    }
}
