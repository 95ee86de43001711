//! Player pose and movement math
//!
//! Heading is kept in degrees, normalized to [0, 360). Forward and right
//! vectors are derived from the heading on demand (see `heading_vector` for
//! the sign convention).

use glam::Vec2;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{heading_vector, normalize_degrees};

/// Discrete input axis in {-1, 0, 1}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Axis {
    Negative,
    #[default]
    Neutral,
    Positive,
}

impl Axis {
    /// Combine a pair of held keys (positive minus negative)
    pub fn from_keys(positive: bool, negative: bool) -> Self {
        match (positive, negative) {
            (true, false) => Axis::Positive,
            (false, true) => Axis::Negative,
            _ => Axis::Neutral,
        }
    }

    #[inline]
    pub fn value(self) -> f32 {
        match self {
            Axis::Negative => -1.0,
            Axis::Neutral => 0.0,
            Axis::Positive => 1.0,
        }
    }

    #[inline]
    pub fn is_neutral(self) -> bool {
        self == Axis::Neutral
    }
}

/// Player position and heading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// World position (x grows with column, y grows with row)
    pub pos: Vec2,
    /// Heading in degrees, always in [0, 360)
    #[serde(deserialize_with = "deserialize_degrees")]
    angle: f32,
}

fn deserialize_degrees<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    f32::deserialize(deserializer).map(normalize_degrees)
}

impl Pose {
    pub fn new(pos: Vec2, angle_deg: f32) -> Self {
        Self {
            pos,
            angle: normalize_degrees(angle_deg),
        }
    }

    /// Heading in degrees
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Same position turned by a relative amount (positive = counter-clockwise on screen)
    pub fn rotated(&self, delta_deg: f32) -> Self {
        Self::new(self.pos, self.angle + delta_deg)
    }

    /// Unit vector the player faces
    #[inline]
    pub fn forward(&self) -> Vec2 {
        heading_vector(self.angle)
    }

    /// Unit vector to the player's right (forward turned 90° clockwise on screen)
    #[inline]
    pub fn right(&self) -> Vec2 {
        let f = self.forward();
        Vec2::new(-f.y, f.x)
    }
}

/// Turn, then move along the new right/forward vectors
///
/// Each axis moves `direction * axis * speed * elapsed` independently, so a
/// diagonal input is faster than a single axis. Walls do not stop movement.
pub fn update_pose(
    pose: &Pose,
    angle_delta_deg: f32,
    strafe: Axis,
    forward: Axis,
    elapsed_secs: f32,
    move_speed: f32,
) -> Pose {
    let mut next = if angle_delta_deg != 0.0 {
        pose.rotated(angle_delta_deg)
    } else {
        *pose
    };

    let dt = elapsed_secs.max(0.0);
    if dt == 0.0 {
        return next;
    }

    let step = move_speed * dt;
    if !strafe.is_neutral() {
        next.pos += next.right() * strafe.value() * step;
    }
    if !forward.is_neutral() {
        next.pos += next.forward() * forward.value() * step;
    }
    next
}
