//! Borrowed pixel buffer supplied by the frame source.

use ndarray::{ArrayView3, ShapeBuilder};

use crate::error::FrameError;

/// Color channels compared by the tracker; any further channel (alpha) is ignored.
pub const COLOR_CHANNELS: usize = 3;

/// A read-only, interleaved 8-bit image (RGB, RGBA, BGR...).
///
/// Rows may be padded: `stride` is the distance in bytes between the starts
/// of two consecutive rows.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pixels: ArrayView3<'a, u8>,
}

impl<'a> Frame<'a> {
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        channels: usize,
    ) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::EmptyFrame { width, height });
        }
        if channels < COLOR_CHANNELS {
            return Err(FrameError::TooFewChannels(channels));
        }
        let row_bytes = width * channels;
        if stride < row_bytes {
            return Err(FrameError::StrideTooShort { stride, row_bytes });
        }
        let needed = (height - 1) * stride + row_bytes;
        if data.len() < needed {
            return Err(FrameError::BufferTooShort {
                len: data.len(),
                needed,
            });
        }

        let shape = (height, width, channels).strides((stride, channels, 1));
        let pixels = ArrayView3::from_shape(shape, data).map_err(|_| FrameError::BufferTooShort {
            len: data.len(),
            needed,
        })?;
        Ok(Self { pixels })
    }

    /// A frame whose rows are tightly packed.
    pub fn packed(
        data: &'a [u8],
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<Self, FrameError> {
        Self::new(data, width, height, width * channels, channels)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.pixels.dim().2
    }

    /// Pixels indexed as `[row, column, channel]`.
    #[inline]
    pub fn pixels(&self) -> &ArrayView3<'a, u8> {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_rows() {
        // 2x2 RGB with 2 bytes of padding per row
        let data = [
            1, 2, 3, 4, 5, 6, 0, 0, //
            7, 8, 9, 10, 11, 12,
        ];
        let frame = Frame::new(&data, 2, 2, 8, 3).unwrap();
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.pixels()[[1, 0, 0]], 7);
        assert_eq!(frame.pixels()[[1, 1, 2]], 12);
    }

    #[test]
    fn test_rejects_bad_layouts() {
        let data = [0u8; 12];
        assert_eq!(
            Frame::new(&data, 0, 2, 6, 3).unwrap_err(),
            FrameError::EmptyFrame {
                width: 0,
                height: 2
            }
        );
        assert_eq!(
            Frame::new(&data, 2, 2, 6, 1).unwrap_err(),
            FrameError::TooFewChannels(1)
        );
        assert_eq!(
            Frame::new(&data, 2, 2, 4, 3).unwrap_err(),
            FrameError::StrideTooShort {
                stride: 4,
                row_bytes: 6
            }
        );
        assert_eq!(
            Frame::packed(&data, 2, 2, 4).unwrap_err(),
            FrameError::BufferTooShort { len: 12, needed: 16 }
        );
    }
}
