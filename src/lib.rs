//! Squat depth judging and barbell velocity estimation.
//!
//! The [`MotionEngine`] consumes one frame at a time: normalized pose landmarks
//! (from any external pose estimator) plus the raw pixel buffer. It reports a
//! depth verdict, per-side knee and hip angles, the tracked barbell position
//! and its vertical velocity.

pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod integration;
pub mod pose;
pub mod tracker;

pub use analysis::{DepthVerdict, JointAngles, LimbAngles};
pub use config::{EngineConfig, TrackerConfig, VelocityConfig};
pub use engine::{FrameAnalysis, MotionEngine};
pub use error::{ConfigError, FrameError, TrackerError};
pub use integration::{AnalysisPipeline, PoseSource, SkeletonBuilder};
pub use pose::{Joint, Position, Side, Skeleton};
pub use tracker::{Frame, PixelPoint, VelocitySample};
