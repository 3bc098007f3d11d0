//! Trait for pose estimation backends.

use crate::pose::Skeleton;
use crate::tracker::Frame;

/// Trait for pose estimation backends.
///
/// Implement this trait to feed any landmark detector into the engine.
///
/// # Example
///
/// ```ignore
/// use squatjudge_rs::{Frame, PoseSource, Skeleton};
///
/// struct MyEstimator {
///     // Your model here
/// }
///
/// impl PoseSource for MyEstimator {
///     type Error = std::io::Error;
///
///     fn estimate(&mut self, frame: &Frame<'_>) -> Result<Option<Skeleton>, Self::Error> {
///         // Run inference and return the landmarks of the subject, if any
///         Ok(None)
///     }
/// }
/// ```
pub trait PoseSource {
    /// Error type for estimation failures.
    type Error;

    /// Run pose estimation on one frame.
    ///
    /// # Returns
    /// `Ok(None)` when nobody was found, the subject's landmarks otherwise.
    fn estimate(&mut self, frame: &Frame<'_>) -> Result<Option<Skeleton>, Self::Error>;
}

/// Helper trait for converting model-specific landmark output to a `Skeleton`.
pub trait IntoSkeleton {
    fn into_skeleton(self) -> Skeleton;
}

impl IntoSkeleton for Skeleton {
    fn into_skeleton(self) -> Skeleton {
        self
    }
}
