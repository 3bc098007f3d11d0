mod frame;
mod matching;
mod object_tracker;
mod rect;
mod track_state;
mod velocity;

pub use frame::{COLOR_CHANNELS, Frame};
pub use matching::{MatchResult, match_score, search_window};
pub use object_tracker::ObjectTracker;
pub use rect::{PatchRect, PixelPoint};
pub use track_state::TrackerState;
pub use velocity::{VelocityEstimator, VelocitySample};
