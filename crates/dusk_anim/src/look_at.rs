//! Look-at blends with optional lens pull
//!
//! A trigger points the camera at a world position over a fixed duration.
//! Partway through the turn the lens may start tightening (narrower field
//! of view, wider aperture focused on the target); the lens holds after
//! the turn completes and then eases back to neutral. Player input stays
//! locked for the whole run; the owner schedules the restore using
//! [`LookAtSpec::input_restore_delay`].

use dusk_core::CameraRig;
use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::easing::Easing;

/// Lens behavior while looking at a target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomSpec {
    /// Fraction of the turn after which the lens starts to move.
    pub start_at: f32,
    /// Field-of-view multiplier at full zoom.
    pub fov_scale: f32,
    /// Depth-of-field aperture at full zoom; zero leaves DoF alone.
    pub aperture: f32,
    /// Seconds to hold full zoom after the turn completes.
    pub hold: f32,
    /// Seconds to ease the lens back to neutral.
    pub return_duration: f32,
}

impl Default for ZoomSpec {
    fn default() -> Self {
        Self {
            start_at: 0.4,
            fov_scale: 0.8,
            aperture: 0.12,
            hold: 1.2,
            return_duration: 0.8,
        }
    }
}

/// A look-at request, usually authored on a trigger zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookAtSpec {
    pub target: [f32; 3],
    #[serde(default = "default_duration")]
    pub duration: f32,
    #[serde(default)]
    pub zoom: Option<ZoomSpec>,
}

fn default_duration() -> f32 {
    1.2
}

impl LookAtSpec {
    pub fn new(target: Vec3) -> Self {
        Self {
            target: target.to_array(),
            duration: default_duration(),
            zoom: None,
        }
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_zoom(mut self, zoom: ZoomSpec) -> Self {
        self.zoom = Some(zoom);
        self
    }

    /// Seconds until the player may have input back: the turn itself, plus
    /// the zoom hold and return when a lens pull is attached.
    pub fn input_restore_delay(&self) -> f32 {
        self.duration
            + self
                .zoom
                .map(|z| z.hold + z.return_duration)
                .unwrap_or(0.0)
    }
}

/// Handed back the frame the blend completes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAtFinished {
    /// Final camera rotation, for the character rig to resume from.
    pub rotation: Quat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Turning,
    Holding,
    Returning,
}

/// One running look-at. Construct with [`LookAtBlend::start`].
#[derive(Debug)]
pub struct LookAtBlend {
    spec: LookAtSpec,
    phase: Phase,
    elapsed: f32,
    start_rotation: Quat,
    target_rotation: Quat,
    base_fov: f32,
    focus_distance: f32,
}

impl LookAtBlend {
    /// Capture the camera pose and aim at the target. Yaw-then-pitch, no
    /// roll, so the horizon stays level.
    pub fn start(spec: LookAtSpec, rig: &dyn CameraRig) -> Self {
        let target = Vec3::from(spec.target);
        let to_target = target - rig.position();
        let target_rotation = face_towards(to_target).unwrap_or_else(|| rig.rotation());
        Self {
            spec,
            phase: Phase::Turning,
            elapsed: 0.0,
            start_rotation: rig.rotation(),
            target_rotation,
            base_fov: rig.fov(),
            focus_distance: to_target.length(),
        }
    }

    /// Advance and write the camera. Returns the completion exactly once.
    pub fn update(&mut self, dt: f32, rig: &mut dyn CameraRig) -> Option<LookAtFinished> {
        self.elapsed += dt;
        match self.phase {
            Phase::Turning => {
                let t = if self.spec.duration > 0.0 {
                    (self.elapsed / self.spec.duration).min(1.0)
                } else {
                    1.0
                };
                let eased = Easing::QuadInOut.apply(t);
                rig.set_rotation(self.start_rotation.slerp(self.target_rotation, eased));
                if let Some(zoom) = self.spec.zoom {
                    self.apply_lens(zoom, zoom_in_progress(zoom, t), rig);
                }
                if t >= 1.0 {
                    rig.set_rotation(self.target_rotation);
                    match self.spec.zoom {
                        Some(_) => {
                            self.phase = Phase::Holding;
                            self.elapsed = 0.0;
                            None
                        }
                        None => Some(self.finish(rig)),
                    }
                } else {
                    None
                }
            }
            Phase::Holding => {
                let zoom = self.spec.zoom.unwrap_or_default();
                self.apply_lens(zoom, 1.0, rig);
                if self.elapsed >= zoom.hold {
                    self.phase = Phase::Returning;
                    self.elapsed = 0.0;
                }
                None
            }
            Phase::Returning => {
                let zoom = self.spec.zoom.unwrap_or_default();
                let t = if zoom.return_duration > 0.0 {
                    (self.elapsed / zoom.return_duration).min(1.0)
                } else {
                    1.0
                };
                let eased = Easing::QuadInOut.apply(t);
                self.apply_lens(zoom, 1.0 - eased, rig);
                if t >= 1.0 {
                    rig.set_fov(self.base_fov);
                    rig.set_depth_of_field(0.0, self.focus_distance);
                    Some(self.finish(rig))
                } else {
                    None
                }
            }
        }
    }

    /// Drop the blend, putting the lens back to neutral.
    pub fn cancel(&self, rig: &mut dyn CameraRig) {
        rig.set_fov(self.base_fov);
        rig.set_depth_of_field(0.0, self.focus_distance);
    }

    fn apply_lens(&self, zoom: ZoomSpec, amount: f32, rig: &mut dyn CameraRig) {
        let fov = self.base_fov * (1.0 + (zoom.fov_scale - 1.0) * amount);
        rig.set_fov(fov);
        if zoom.aperture > 0.0 {
            rig.set_depth_of_field(zoom.aperture * amount, self.focus_distance);
        }
    }

    fn finish(&self, rig: &dyn CameraRig) -> LookAtFinished {
        LookAtFinished {
            rotation: rig.rotation(),
        }
    }
}

/// Lens progress within the turn: zero until `start_at`, eased to one at
/// the end of the turn.
fn zoom_in_progress(zoom: ZoomSpec, turn_t: f32) -> f32 {
    if turn_t <= zoom.start_at {
        return 0.0;
    }
    let span = 1.0 - zoom.start_at;
    if span <= 0.0 {
        return 1.0;
    }
    Easing::QuadInOut.apply((turn_t - zoom.start_at) / span)
}

/// Yaw/pitch rotation looking along `dir` (camera forward is -Z). `None`
/// when the direction is degenerate.
pub fn face_towards(dir: Vec3) -> Option<Quat> {
    let length = dir.length();
    if length < 1e-6 {
        return None;
    }
    let dir = dir / length;
    let yaw = (-dir.x).atan2(-dir.z);
    let pitch = dir.y.asin();
    Some(Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0))
}
