//! First-person character rig
//!
//! Owns the player's yaw and pitch and writes the camera from them, with
//! the idle glance and the walking headbob layered on top. The rig never
//! moves the body; the host's controller does, and hands the body position
//! in each frame. While controls are locked the rig leaves the camera to
//! whichever clock is driving it and only lets the layered effects fade.

use dusk_anim::{GlanceConfig, Headbob, HeadbobConfig, IdleGlance};
use dusk_audio::SharedVolume;
use dusk_core::CameraRig;
use glam::{EulerRot, Quat, Vec2, Vec3};

#[derive(Debug, Clone, Copy)]
pub struct RigConfig {
    /// Eye height above the body center, meters.
    pub eye_height: f32,
    /// Radians of turn per unit of look input.
    pub sensitivity: f32,
    /// Pitch clamp, radians either way.
    pub max_pitch: f32,
    pub glance: GlanceConfig,
    pub headbob: HeadbobConfig,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            eye_height: 0.7,
            sensitivity: 0.0025,
            max_pitch: 1.45,
            glance: GlanceConfig::default(),
            headbob: HeadbobConfig::default(),
        }
    }
}

#[derive(Debug)]
pub struct CharacterRig {
    config: RigConfig,
    yaw: f32,
    pitch: f32,
    enabled: bool,
    glance: IdleGlance,
    headbob: Headbob,
    /// Volume cell for the host's breathing loop, routed with the SFX
    /// group like any real handle.
    breath: SharedVolume,
}

impl CharacterRig {
    pub fn new(config: RigConfig, seed: u64) -> Self {
        Self {
            glance: IdleGlance::new(config.glance, seed),
            headbob: Headbob::new(config.headbob),
            config,
            yaw: 0.0,
            pitch: 0.0,
            enabled: true,
            breath: SharedVolume::new(1.0),
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// A shared handle on the breathing volume cell.
    pub fn breath(&self) -> SharedVolume {
        self.breath.clone()
    }

    /// Integrate look input and write the camera. `suppress_glance` covers
    /// dialog and anything else that should keep the eyes forward.
    pub fn update(
        &mut self,
        dt: f32,
        look: Vec2,
        speed: f32,
        body_position: Vec3,
        suppress_glance: bool,
        camera: &mut dyn CameraRig,
    ) {
        let moving = speed > 0.1 || look != Vec2::ZERO;
        if self.enabled {
            self.yaw -= look.x * self.config.sensitivity;
            self.pitch = (self.pitch - look.y * self.config.sensitivity)
                .clamp(-self.config.max_pitch, self.config.max_pitch);
        }

        let glance = self
            .glance
            .update(dt, moving, suppress_glance || !self.enabled);
        let bob = self.headbob.update(dt, if self.enabled { speed } else { 0.0 });
        if !self.enabled {
            return;
        }

        let rotation = Quat::from_euler(
            EulerRot::YXZ,
            self.yaw + glance.yaw,
            self.pitch + glance.pitch,
            bob.roll,
        );
        camera.set_rotation(rotation);
        let eye = body_position + Vec3::new(0.0, self.config.eye_height + bob.height, 0.0);
        camera.set_position(eye);
    }

    /// Adopt a camera orientation so free look resumes without a snap.
    /// Called with the final pose of a camera path or look-at.
    pub fn sync_orientation(&mut self, rotation: Quat) {
        let (yaw, pitch, _roll) = rotation.to_euler(EulerRot::YXZ);
        self.yaw = yaw;
        self.pitch = pitch.clamp(-self.config.max_pitch, self.config.max_pitch);
    }
}
