//! Integration module for connecting pose estimators with the motion engine.
//!
//! Pose detection itself happens outside this crate. This module provides the
//! trait a pose backend implements, a builder for turning raw landmark output
//! into a [`Skeleton`](crate::Skeleton), and a pipeline bundling both with a
//! [`MotionEngine`](crate::MotionEngine).

mod builder;
mod pipeline;
mod source;

pub use builder::{DEFAULT_MIN_VISIBILITY, SkeletonBuilder};
pub use pipeline::AnalysisPipeline;
pub use source::{IntoSkeleton, PoseSource};
