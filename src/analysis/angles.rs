//! Knee and hip angles from three landmarks.
//!
//! Angles are single-frame estimates with no smoothing, meant for live
//! feedback rather than judging.

use serde::{Deserialize, Serialize};

use crate::pose::{Joint, Position, Side, Skeleton};

/// Shortest limb segment (in pixels) that still has a direction.
const MIN_SEGMENT_PX: f32 = 1e-4;

/// Angle at `vertex` between the segments to `proximal` and `distal`.
///
/// Points are scaled to pixel space first so a non-square frame does not
/// skew the angle. Returns whole degrees in `[0, 180]`, or `None` when a point
/// is missing or a segment has no length.
pub fn joint_angle(
    proximal: Option<Position>,
    vertex: Option<Position>,
    distal: Option<Position>,
    width: f32,
    height: f32,
) -> Option<u16> {
    let vertex = vertex?.to_pixels(width, height);
    let to_proximal =
        (proximal?.to_pixels(width, height) - vertex).try_normalize(MIN_SEGMENT_PX)?;
    let to_distal = (distal?.to_pixels(width, height) - vertex).try_normalize(MIN_SEGMENT_PX)?;

    let cos = to_proximal.dot(&to_distal).clamp(-1.0, 1.0);
    let degrees = cos.acos().to_degrees().round();
    Some(degrees.clamp(0.0, 180.0) as u16)
}

/// Knee flexion (hip-knee-ankle) and hip flexion (shoulder-hip-knee) of one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LimbAngles {
    pub knee: Option<u16>,
    pub hip: Option<u16>,
}

impl LimbAngles {
    pub fn measure(skeleton: &Skeleton, side: Side, width: f32, height: f32) -> Self {
        let shoulder = skeleton.get(Joint::shoulder(side));
        let hip = skeleton.get(Joint::hip(side));
        let knee = skeleton.get(Joint::knee(side));
        let ankle = skeleton.get(Joint::ankle(side));

        Self {
            knee: joint_angle(hip, knee, ankle, width, height),
            hip: joint_angle(shoulder, hip, knee, width, height),
        }
    }
}

/// Per-side angles for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JointAngles {
    pub left: LimbAngles,
    pub right: LimbAngles,
}

impl JointAngles {
    pub fn measure(skeleton: &Skeleton, width: usize, height: usize) -> Self {
        let (w, h) = (width as f32, height as f32);
        Self {
            left: LimbAngles::measure(skeleton, Side::Left, w, h),
            right: LimbAngles::measure(skeleton, Side::Right, w, h),
        }
    }

    pub fn side(&self, side: Side) -> LimbAngles {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Option<Position> {
        Position::new(x, y)
    }

    #[test]
    fn test_straight_leg() {
        let angle = joint_angle(p(0.5, 0.2), p(0.5, 0.5), p(0.5, 0.8), 720.0, 1280.0);
        assert_eq!(angle, Some(180));
    }

    #[test]
    fn test_right_angle() {
        let angle = joint_angle(p(0.2, 0.5), p(0.5, 0.5), p(0.5, 0.8), 1000.0, 1000.0);
        assert_eq!(angle, Some(90));
    }

    #[test]
    fn test_missing_point_is_absent() {
        assert_eq!(joint_angle(None, p(0.5, 0.5), p(0.5, 0.8), 100.0, 100.0), None);
    }

    #[test]
    fn test_coincident_points_are_absent() {
        let angle = joint_angle(p(0.5, 0.5), p(0.5, 0.5), p(0.5, 0.8), 100.0, 100.0);
        assert_eq!(angle, None);
    }

    #[test]
    fn test_missing_right_knee_keeps_left_side() {
        let skeleton = Skeleton::new()
            .with(Joint::LeftShoulder, 0.4, 0.2)
            .with(Joint::LeftHip, 0.4, 0.5)
            .with(Joint::LeftKnee, 0.4, 0.7)
            .with(Joint::LeftAnkle, 0.4, 0.9)
            .with(Joint::RightShoulder, 0.6, 0.2)
            .with(Joint::RightHip, 0.6, 0.5)
            .with(Joint::RightAnkle, 0.6, 0.9);

        let angles = JointAngles::measure(&skeleton, 1000, 1000);
        assert_eq!(angles.left.knee, Some(180));
        assert_eq!(angles.left.hip, Some(180));
        assert_eq!(angles.right, LimbAngles::default());
    }
}
