//! Collaborator traits at the host boundary
//!
//! The orchestration crates hold `&mut dyn` references to these traits,
//! handed in by the host every frame. Nothing here is asynchronous: calls
//! are expected to take effect immediately or be queued host-side.

use glam::{Quat, Vec3};

use crate::id::{AudioHandle, BodyId};

/// First-person camera owned by the renderer.
pub trait CameraRig {
    fn position(&self) -> Vec3;
    fn rotation(&self) -> Quat;
    fn set_position(&mut self, position: Vec3);
    fn set_rotation(&mut self, rotation: Quat);

    /// Vertical field of view in radians.
    fn fov(&self) -> f32;
    fn set_fov(&mut self, fov: f32);

    /// Hosts without a depth-of-field pass may ignore this.
    fn set_depth_of_field(&mut self, aperture: f32, focus_distance: f32);
}

/// Playback options for [`AudioOutput::play`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayOpts {
    pub looping: bool,
    /// Linear gain in `[0, 1]`.
    pub volume: f32,
    /// Fade-in length in seconds; zero starts at full volume.
    pub fade_in: f32,
}

impl Default for PlayOpts {
    fn default() -> Self {
        Self {
            looping: false,
            volume: 1.0,
            fade_in: 0.0,
        }
    }
}

impl PlayOpts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_fade_in(mut self, seconds: f32) -> Self {
        self.fade_in = seconds;
        self
    }
}

/// Audio backend owned by the host.
pub trait AudioOutput {
    /// Start a source by asset name. Unknown sources return a null handle,
    /// which every other method treats as a no-op.
    fn play(&mut self, source: &str, opts: PlayOpts) -> AudioHandle;
    fn stop(&mut self, handle: AudioHandle);
    fn fade_out(&mut self, handle: AudioHandle, seconds: f32);
    fn set_volume(&mut self, handle: AudioHandle, volume: f32);
    fn is_playing(&self, handle: AudioHandle) -> bool;
}

/// Rigid-body transform access into the host physics world.
///
/// Dusk never steps the simulation. It reads and writes poses of bodies the
/// host registered under a [`BodyId`], wakes them while driving them, and
/// removes the sensor bodies of consumed trigger zones.
pub trait BodyTransforms {
    fn translation(&self, body: BodyId) -> Option<Vec3>;
    fn rotation(&self, body: BodyId) -> Option<Quat>;
    fn set_translation(&mut self, body: BodyId, translation: Vec3);
    fn set_rotation(&mut self, body: BodyId, rotation: Quat);

    /// Keep a sleeping body active while it is being driven kinematically.
    fn wake(&mut self, body: BodyId);

    /// Remove the body from the world entirely.
    fn remove(&mut self, body: BodyId);

    /// Height of the walkable ground under `point`, if any.
    fn ground_height_at(&self, point: Vec3) -> Option<f32>;
}

/// Per-element shader uniform writes, addressed by element index.
pub trait ShaderUniforms {
    fn set_float(&mut self, element: u32, name: &str, value: f32);
    fn set_vec3(&mut self, element: u32, name: &str, value: Vec3);
}

/// Captions and page-level UI events.
pub trait UiSink {
    fn show_caption(&mut self, text: &str);
    fn clear_caption(&mut self);

    /// Forward a named event to the embedding page (menus, credits, ...).
    fn ui_event(&mut self, name: &str);
}

/// Scene content operations owned by the host asset layer.
pub trait SceneOps {
    fn load(&mut self, asset: &str);
    fn unload(&mut self, asset: &str);

    /// Start a named animation on a scene object.
    fn play_animation(&mut self, object: &str, animation: &str);

    fn play_video(&mut self, id: &str, source: &str, surface: Option<&str>, looping: bool);
    fn stop_video(&mut self, id: &str);
}

/// Small string key/value persistence (browser local storage, a file...).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}
