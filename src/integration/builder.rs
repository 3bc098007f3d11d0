//! Builder for creating Skeleton objects from raw landmark output.

use crate::integration::source::IntoSkeleton;
use crate::pose::{Joint, Position, Skeleton};

/// Landmarks below this visibility are treated as not observed.
pub const DEFAULT_MIN_VISIBILITY: f32 = 0.5;

/// Builder for creating a `Skeleton` from landmark detector output.
#[derive(Debug, Clone)]
pub struct SkeletonBuilder {
    skeleton: Skeleton,
    min_visibility: f32,
}

impl Default for SkeletonBuilder {
    fn default() -> Self {
        Self {
            skeleton: Skeleton::new(),
            min_visibility: DEFAULT_MIN_VISIBILITY,
        }
    }
}

impl SkeletonBuilder {
    /// Create a new skeleton builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the visibility below which landmarks are dropped.
    pub fn min_visibility(mut self, min_visibility: f32) -> Self {
        self.min_visibility = min_visibility;
        self
    }

    /// Set one joint from normalized coordinates.
    pub fn joint(mut self, joint: Joint, x: f32, y: f32) -> Self {
        self.skeleton.set(joint, Position::new(x, y));
        self
    }

    /// Set one joint with a visibility score.
    pub fn joint_with_visibility(self, joint: Joint, x: f32, y: f32, visibility: f32) -> Self {
        if visibility >= self.min_visibility {
            self.joint(joint, x, y)
        } else {
            self
        }
    }

    /// Set joints from `(x, y, visibility)` triples in topology order.
    ///
    /// Entries past the last known joint are ignored.
    pub fn landmarks(mut self, landmarks: &[[f32; 3]]) -> Self {
        for (joint, &[x, y, visibility]) in Joint::ALL.iter().zip(landmarks) {
            self = self.joint_with_visibility(*joint, x, y, visibility);
        }
        self
    }

    /// Build the final `Skeleton`.
    pub fn build(self) -> Skeleton {
        self.skeleton
    }
}

impl IntoSkeleton for SkeletonBuilder {
    fn into_skeleton(self) -> Skeleton {
        self.build()
    }
}
