//! Per-frame measurements derived from pose landmarks.

mod angles;
mod calibration;
mod depth;
mod smoother;

pub use angles::{JointAngles, LimbAngles, joint_angle};
pub use calibration::Calibration;
pub use depth::{DepthVerdict, judge_depth};
pub use smoother::{HeightSmoother, History, SmoothedHeights};
