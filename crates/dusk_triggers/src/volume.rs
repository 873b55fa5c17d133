//! Volume shapes and overlap math
//!
//! The player is a vertical capsule, which keeps every test closed-form:
//! yaw rotation happens around Y, so the capsule axis stays vertical in
//! any volume's local space.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A sensor shape. Capsules stand on the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum VolumeShape {
    Box { half_extents: [f32; 3] },
    Sphere { radius: f32 },
    Capsule { radius: f32, half_height: f32 },
}

/// Where a volume sits. Only yaw is authored; tilted sensor volumes have
/// never been needed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VolumePose {
    pub position: Vec3,
    /// Radians around +Y.
    pub yaw: f32,
}

impl VolumePose {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }
}

/// The player's collision capsule: `center` is mid-body, `half_height` the
/// cylindrical core's half-length (caps excluded).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerCollider {
    pub center: Vec3,
    pub radius: f32,
    pub half_height: f32,
}

impl PlayerCollider {
    pub fn new(center: Vec3) -> Self {
        Self {
            center,
            radius: 0.35,
            half_height: 0.6,
        }
    }

    fn segment_y(&self) -> (f32, f32) {
        (
            self.center.y - self.half_height,
            self.center.y + self.half_height,
        )
    }
}

/// Whether the player capsule overlaps the posed volume.
pub fn overlaps(shape: &VolumeShape, pose: &VolumePose, player: &PlayerCollider) -> bool {
    match *shape {
        VolumeShape::Sphere { radius } => {
            let reach = radius + player.radius;
            distance_point_to_player_axis(pose.position, player) <= reach
        }
        VolumeShape::Capsule {
            radius,
            half_height,
        } => {
            // Two parallel vertical segments.
            let dx = pose.position.x - player.center.x;
            let dz = pose.position.z - player.center.z;
            let (p0, p1) = player.segment_y();
            let dy = interval_gap(
                pose.position.y - half_height,
                pose.position.y + half_height,
                p0,
                p1,
            );
            let reach = radius + player.radius;
            dx * dx + dz * dz + dy * dy <= reach * reach
        }
        VolumeShape::Box { half_extents } => {
            let e = Vec3::from(half_extents);
            // Into box-local space; the player axis stays vertical.
            let inverse = Quat::from_rotation_y(-pose.yaw);
            let local_center = inverse * (player.center - pose.position);
            let dx = (local_center.x.abs() - e.x).max(0.0);
            let dz = (local_center.z.abs() - e.z).max(0.0);
            let (p0, p1) = (
                local_center.y - player.half_height,
                local_center.y + player.half_height,
            );
            let dy = interval_gap(-e.y, e.y, p0, p1);
            dx * dx + dy * dy + dz * dz <= player.radius * player.radius
        }
    }
}

/// Distance from a point to the player's core segment.
fn distance_point_to_player_axis(point: Vec3, player: &PlayerCollider) -> f32 {
    let (y0, y1) = player.segment_y();
    let closest = Vec3::new(
        player.center.x,
        point.y.clamp(y0, y1),
        player.center.z,
    );
    point.distance(closest)
}

/// Gap between two closed intervals; zero when they touch or overlap.
fn interval_gap(a0: f32, a1: f32, b0: f32, b1: f32) -> f32 {
    (a0.max(b0) - a1.min(b1)).max(0.0)
}
