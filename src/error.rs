//! Error types for frame validation, tracker initialization and configuration.

use thiserror::Error;

/// A pixel buffer whose declared layout cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("frame dimensions must be non-zero, got {width}x{height}")]
    EmptyFrame { width: usize, height: usize },
    #[error("at least 3 color channels are required, got {0}")]
    TooFewChannels(usize),
    #[error("row stride of {stride} bytes is shorter than a {row_bytes}-byte row")]
    StrideTooShort { stride: usize, row_bytes: usize },
    #[error("pixel buffer holds {len} bytes but the layout needs {needed}")]
    BufferTooShort { len: usize, needed: usize },
}

/// Failure to start tracking a target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error(
        "a {size}px patch centered at ({x}, {y}) does not fit inside the {width}x{height} frame"
    )]
    PatchOutOfBounds {
        x: i64,
        y: i64,
        size: usize,
        width: usize,
        height: usize,
    },
}

/// A tunable parameter outside its accepted range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("tolerance must be finite, got {0}")]
    InvalidTolerance(f32),
    #[error("smoothing window must hold at least one sample")]
    ZeroSmoothingWindow,
    #[error("{name} must be a positive length, got {value}")]
    NonPositiveLength { name: &'static str, value: f32 },
    #[error("{name} must lie in (0, 1], got {value}")]
    FractionOutOfRange { name: &'static str, value: f32 },
    #[error("tracker sample stride must be at least 1")]
    ZeroSampleStride,
    #[error("rep reset threshold must be finite and non-negative, got {0}")]
    InvalidRepThreshold(f32),
}
