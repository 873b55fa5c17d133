//! Headless host ports
//!
//! Stand-ins for the renderer, audio backend, physics world, page UI and
//! local storage. Everything is state plus logging: the demo's output IS
//! the log, so the port impls narrate what a real host would render.

use std::collections::BTreeMap;
use std::path::PathBuf;

use dusk_core::{
    AudioHandle, AudioOutput, BodyId, BodyTransforms, CameraRig, KeyValueStore, PlayOpts,
    SceneOps, ShaderUniforms, UiSink,
};
use glam::{Quat, Vec3};

pub struct HeadlessCamera {
    position: Vec3,
    rotation: Quat,
    fov: f32,
}

impl HeadlessCamera {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 1.7, 0.0),
            rotation: Quat::IDENTITY,
            fov: 1.2,
        }
    }
}

impl CameraRig for HeadlessCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn fov(&self) -> f32 {
        self.fov
    }

    fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
    }

    fn set_depth_of_field(&mut self, aperture: f32, focus_distance: f32) {
        log::debug!("camera: dof aperture {aperture:.3} focus {focus_distance:.2}m");
    }
}

struct Sound {
    source: String,
    looping: bool,
}

/// Logs playback instead of making noise. Looping handles stay "playing"
/// until stopped; one-shots play forever as far as `is_playing` can tell,
/// so timed content must carry explicit durations (the demo content does).
#[derive(Default)]
pub struct HeadlessAudio {
    next: u64,
    playing: BTreeMap<AudioHandle, Sound>,
    pub started: Vec<String>,
}

impl AudioOutput for HeadlessAudio {
    fn play(&mut self, source: &str, opts: PlayOpts) -> AudioHandle {
        self.next += 1;
        let handle = AudioHandle::new(self.next);
        log::info!(
            "audio: play {source} (volume {:.2}{})",
            opts.volume,
            if opts.looping { ", looping" } else { "" }
        );
        self.started.push(source.to_string());
        self.playing.insert(
            handle,
            Sound {
                source: source.to_string(),
                looping: opts.looping,
            },
        );
        handle
    }

    fn stop(&mut self, handle: AudioHandle) {
        if let Some(sound) = self.playing.remove(&handle) {
            log::info!("audio: stop {}", sound.source);
        }
    }

    fn fade_out(&mut self, handle: AudioHandle, seconds: f32) {
        if let Some(sound) = self.playing.remove(&handle) {
            log::info!("audio: fade out {} over {seconds:.1}s", sound.source);
        }
    }

    fn set_volume(&mut self, handle: AudioHandle, volume: f32) {
        if let Some(sound) = self.playing.get(&handle) {
            log::debug!("audio: {} volume {volume:.2}", sound.source);
        }
    }

    fn is_playing(&self, handle: AudioHandle) -> bool {
        self.playing.contains_key(&handle)
    }
}

impl HeadlessAudio {
    pub fn playing_sources(&self) -> Vec<&str> {
        self.playing
            .values()
            .map(|sound| sound.source.as_str())
            .collect()
    }

    /// Non-looping handles do not self-terminate in a headless world;
    /// the script calls this to emulate one-shots running out.
    pub fn finish_one_shots(&mut self) {
        self.playing.retain(|_, sound| sound.looping);
    }
}

/// Flat ground plus a pose table for the bodies the demo registers.
#[derive(Default)]
pub struct HeadlessBodies {
    translations: BTreeMap<BodyId, Vec3>,
    rotations: BTreeMap<BodyId, Quat>,
    pub removed: Vec<BodyId>,
}

impl HeadlessBodies {
    pub fn register(&mut self, body: BodyId, translation: Vec3) {
        self.translations.insert(body, translation);
    }
}

impl BodyTransforms for HeadlessBodies {
    fn translation(&self, body: BodyId) -> Option<Vec3> {
        self.translations.get(&body).copied()
    }

    fn rotation(&self, body: BodyId) -> Option<Quat> {
        self.rotations.get(&body).copied()
    }

    fn set_translation(&mut self, body: BodyId, translation: Vec3) {
        self.translations.insert(body, translation);
    }

    fn set_rotation(&mut self, body: BodyId, rotation: Quat) {
        self.rotations.insert(body, rotation);
    }

    fn wake(&mut self, _body: BodyId) {}

    fn remove(&mut self, body: BodyId) {
        self.translations.remove(&body);
        self.rotations.remove(&body);
        self.removed.push(body);
        log::info!("physics: removed body {body:?}");
    }

    fn ground_height_at(&self, _point: Vec3) -> Option<f32> {
        Some(0.0)
    }
}

#[derive(Default)]
pub struct HeadlessUi {
    pub captions_shown: usize,
}

impl UiSink for HeadlessUi {
    fn show_caption(&mut self, text: &str) {
        self.captions_shown += 1;
        log::info!("caption: \"{text}\"");
    }

    fn clear_caption(&mut self) {
        log::info!("caption: cleared");
    }

    fn ui_event(&mut self, name: &str) {
        log::info!("ui: event `{name}`");
    }
}

#[derive(Default)]
pub struct HeadlessScenes;

impl SceneOps for HeadlessScenes {
    fn load(&mut self, asset: &str) {
        log::info!("scene: load {asset}");
    }

    fn unload(&mut self, asset: &str) {
        log::info!("scene: unload {asset}");
    }

    fn play_animation(&mut self, object: &str, animation: &str) {
        log::info!("scene: {object} plays `{animation}`");
    }

    fn play_video(&mut self, id: &str, source: &str, surface: Option<&str>, looping: bool) {
        log::info!(
            "video: {id} -> {source} on {}{}",
            surface.unwrap_or("fullscreen"),
            if looping { " (loop)" } else { "" }
        );
    }

    fn stop_video(&mut self, id: &str) {
        log::info!("video: stop {id}");
    }
}

/// Counts uniform writes so the title sequence has something to report.
#[derive(Default)]
pub struct UniformLog {
    pub writes: usize,
}

impl ShaderUniforms for UniformLog {
    fn set_float(&mut self, element: u32, name: &str, value: f32) {
        self.writes += 1;
        log::trace!("uniform: [{element}] {name} = {value:.3}");
    }

    fn set_vec3(&mut self, element: u32, name: &str, value: Vec3) {
        self.writes += 1;
        log::trace!("uniform: [{element}] {name} = {value:?}");
    }
}

/// Key/value persistence backed by one JSON file, standing in for the
/// browser's local storage. Writes go straight to disk; a write failure
/// logs and keeps the in-memory copy.
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: PathBuf) -> Self {
        let values = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(values) => values,
                Err(err) => {
                    log::warn!("storage: discarding malformed {}: {err}", path.display());
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self { path, values }
    }

    fn persist(&self) {
        let raw = match serde_json::to_string_pretty(&self.values) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("storage: failed to serialize: {err}");
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, raw) {
            log::warn!("storage: failed to write {}: {err}", self.path.display());
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.persist();
    }
}
