use serde::{Deserialize, Serialize};

/// A point in pixel coordinates (origin top-left, y downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A square image patch addressed by its top-left pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatchRect {
    /// Top-left column
    pub x: usize,
    /// Top-left row
    pub y: usize,
    /// Edge length in pixels
    pub size: usize,
}

impl PatchRect {
    #[inline]
    pub fn new(x: usize, y: usize, size: usize) -> Self {
        Self { x, y, size }
    }

    /// Patch of edge `size` centered on `(cx, cy)`, if it lies fully inside
    /// a `width` x `height` frame.
    pub fn centered(cx: i64, cy: i64, size: usize, width: usize, height: usize) -> Option<Self> {
        let half = (size / 2) as i64;
        Self::at(cx.checked_sub(half)?, cy.checked_sub(half)?, size, width, height)
    }

    /// Patch with top-left `(x, y)`, if it lies fully inside the frame.
    pub fn at(x: i64, y: i64, size: usize, width: usize, height: usize) -> Option<Self> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        let rect = Self::new(x, y, size);
        rect.fits(width, height).then_some(rect)
    }

    /// Whether the patch lies fully inside a `width` x `height` frame.
    #[inline]
    pub fn fits(&self, width: usize, height: usize) -> bool {
        self.size > 0
            && self.x.checked_add(self.size).is_some_and(|right| right <= width)
            && self.y.checked_add(self.size).is_some_and(|bottom| bottom <= height)
    }

    /// Center pixel of the patch, the inverse of [`PatchRect::centered`].
    #[inline]
    pub fn center(&self) -> PixelPoint {
        let half = self.size / 2;
        PixelPoint::new((self.x + half) as f32, (self.y + half) as f32)
    }
}
