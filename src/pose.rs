//! Body landmarks supplied by an external pose estimator.

mod joint;
mod position;
mod skeleton;

pub use joint::{Joint, SKELETON_CONNECTIONS, Side};
pub use position::Position;
pub use skeleton::Skeleton;
