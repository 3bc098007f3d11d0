use crate::pose::joint::Joint;
use crate::pose::position::Position;

/// Landmarks observed for one subject in one frame.
///
/// A joint that was not observed is `None`. The engine only reads skeletons.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    joints: [Option<Position>; Joint::COUNT],
}

impl Default for Skeleton {
    fn default() -> Self {
        Self {
            joints: [None; Joint::COUNT],
        }
    }
}

impl Skeleton {
    /// An empty skeleton with every joint absent.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, joint: Joint) -> Option<Position> {
        self.joints[joint.index()]
    }

    pub fn set(&mut self, joint: Joint, position: Option<Position>) {
        self.joints[joint.index()] = position;
    }

    /// Builder-style variant of [`Skeleton::set`] for normalized coordinates.
    pub fn with(mut self, joint: Joint, x: f32, y: f32) -> Self {
        self.set(joint, Position::new(x, y));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.joints.iter().all(Option::is_none)
    }

    /// Iterate over observed joints.
    pub fn observed(&self) -> impl Iterator<Item = (Joint, Position)> + '_ {
        Joint::ALL
            .iter()
            .zip(self.joints.iter())
            .filter_map(|(joint, pos)| pos.map(|p| (*joint, p)))
    }

    /// Height of the hip crease: the smaller y of the observed hips.
    ///
    /// Returns `None` when neither hip was observed.
    pub fn hip_height(&self) -> Option<f32> {
        self.extremal_y(Joint::LeftHip, Joint::RightHip, f32::min)
    }

    /// Height of the top of the knee: the larger y of the observed knees.
    ///
    /// Returns `None` when neither knee was observed.
    pub fn knee_height(&self) -> Option<f32> {
        self.extremal_y(Joint::LeftKnee, Joint::RightKnee, f32::max)
    }

    fn extremal_y(&self, a: Joint, b: Joint, pick: fn(f32, f32) -> f32) -> Option<f32> {
        match (self.get(a), self.get(b)) {
            (Some(pa), Some(pb)) => Some(pick(pa.y, pb.y)),
            (Some(p), None) | (None, Some(p)) => Some(p.y),
            (None, None) => None,
        }
    }
}
