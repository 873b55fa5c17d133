//! End-to-end session scenarios against a headless host
//!
//! Fake ports stand in for the renderer, the audio backend and the physics
//! world; the content mirrors the phone-booth beat of the real game. Frames
//! step by 0.125s so every timer lands on an exact binary fraction.

use approx::assert_relative_eq;
use dusk_anim::CameraClip;
use dusk_audio::{mixer, PlayerSettings};
use dusk_core::{
    AudioHandle, AudioOutput, BodyId, BodyTransforms, CameraRig, PlayOpts, SceneOps, UiSink,
};
use dusk_game::{CharacterRig, Frame, GameDirector, Ports, RigConfig, Session};
use dusk_rules::RuleBook;
use dusk_state::{keys, StatePatch, StateStore};
use dusk_triggers::{TriggerAction, TriggerZone, ZoneDef, ZoneMonitor};
use glam::{Quat, Vec3};

const DT: f32 = 0.125;
const RINGING: i64 = 5;
const ANSWERED: i64 = 6;

struct FakeCamera {
    position: Vec3,
    rotation: Quat,
    fov: f32,
}

impl Default for FakeCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.7, 0.0),
            rotation: Quat::IDENTITY,
            fov: 1.2,
        }
    }
}

impl CameraRig for FakeCamera {
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

    fn set_depth_of_field(&mut self, _aperture: f32, _focus_distance: f32) {}
}

#[derive(Default)]
struct FakeAudio {
    next: u64,
    started: Vec<String>,
    playing: Vec<(AudioHandle, String)>,
}

impl FakeAudio {
    fn is_source_playing(&self, source: &str) -> bool {
        self.playing.iter().any(|(_, s)| s == source)
    }
}

impl AudioOutput for FakeAudio {
    fn play(&mut self, source: &str, _opts: PlayOpts) -> AudioHandle {
        self.next += 1;
        let handle = AudioHandle::new(self.next);
        self.started.push(source.to_string());
        self.playing.push((handle, source.to_string()));
        handle
    }

    fn stop(&mut self, handle: AudioHandle) {
        self.playing.retain(|(h, _)| *h != handle);
    }

    fn fade_out(&mut self, handle: AudioHandle, _seconds: f32) {
        self.playing.retain(|(h, _)| *h != handle);
    }

    fn set_volume(&mut self, _handle: AudioHandle, _volume: f32) {}

    fn is_playing(&self, handle: AudioHandle) -> bool {
        self.playing.iter().any(|(h, _)| *h == handle)
    }
}

#[derive(Default)]
struct FakeBodies {
    removed: Vec<BodyId>,
}

impl BodyTransforms for FakeBodies {
    fn translation(&self, _body: BodyId) -> Option<Vec3> {
        None
    }

    fn rotation(&self, _body: BodyId) -> Option<Quat> {
        None
    }

    fn set_translation(&mut self, _body: BodyId, _translation: Vec3) {}

    fn set_rotation(&mut self, _body: BodyId, _rotation: Quat) {}

    fn wake(&mut self, _body: BodyId) {}

    fn remove(&mut self, body: BodyId) {
        self.removed.push(body);
    }

    fn ground_height_at(&self, _point: Vec3) -> Option<f32> {
        Some(0.0)
    }
}

#[derive(Default)]
struct FakeUi {
    captions: Vec<String>,
    events: Vec<String>,
}

impl UiSink for FakeUi {
    fn show_caption(&mut self, text: &str) {
        self.captions.push(text.to_string());
    }

    fn clear_caption(&mut self) {}

    fn ui_event(&mut self, name: &str) {
        self.events.push(name.to_string());
    }
}

#[derive(Default)]
struct FakeScenes {
    loaded: Vec<String>,
}

impl SceneOps for FakeScenes {
    fn load(&mut self, asset: &str) {
        self.loaded.push(asset.to_string());
    }

    fn unload(&mut self, asset: &str) {
        self.loaded.retain(|a| a != asset);
    }

    fn play_animation(&mut self, _object: &str, _animation: &str) {}

    fn play_video(&mut self, _id: &str, _source: &str, _surface: Option<&str>, _looping: bool) {}

    fn stop_video(&mut self, _id: &str) {}
}

#[derive(Default)]
struct Host {
    camera: FakeCamera,
    audio: FakeAudio,
    bodies: FakeBodies,
    ui: FakeUi,
    scenes: FakeScenes,
}

impl Host {
    fn ports(&mut self) -> Ports<'_> {
        Ports {
            camera: &mut self.camera,
            audio: &mut self.audio,
            bodies: &mut self.bodies,
            ui: &mut self.ui,
            scenes: &mut self.scenes,
        }
    }
}

fn step(session: &mut Session, host: &mut Host, body_position: Vec3) {
    let mut ports = host.ports();
    session.frame(&Frame::idle(DT, body_position), &mut ports);
}

fn book() -> RuleBook {
    RuleBook::from_json(
        r#"[
            { "id": "BONNE_SOIREE", "audio": "vo/bonne_soiree", "delay": 2.0,
              "duration": 3.0,
              "captions": [ { "text": "Bonne soiree.", "at": 0.0 } ],
              "criteria": { "current_state": 6 } }
        ]"#,
        r#"[
            { "id": "night-bed", "audio": "music/night_bed",
              "criteria": { "current_state": { "$gte": 0 } } }
        ]"#,
        r#"[
            { "id": "phone-zoom", "clip": "clips/phone_zoom", "delay": 0.5 }
        ]"#,
        r#"[
            { "id": "phone-ring", "audio": "sfx/phone_ring", "looping": true,
              "criteria": { "current_state": 5 } }
        ]"#,
        "[]",
        "[]",
    )
    .unwrap()
}

fn booth_zone() -> ZoneDef {
    serde_json::from_str(
        r#"{
            "id": "phonebooth-answer",
            "shape": "sphere",
            "radius": 1.2,
            "position": [0.0, 1.0, 0.0],
            "once": true,
            "criteria": { "current_state": 5 },
            "enter": [ { "type": "set_state", "set": { "current_state": 6 } } ]
        }"#,
    )
    .unwrap()
}

fn phone_zoom_clip() -> CameraClip {
    CameraClip::from_json(
        "clips/phone_zoom",
        r#"{
            "frames": [
                { "t": 0.0, "q": [0.0, 0.0, 0.0, 1.0], "p": [0.0, 0.0, 0.0] },
                { "t": 0.5, "q": [0.0, 0.19509, 0.0, 0.98079], "p": [0.0, 0.0, -0.5] },
                { "t": 1.0, "q": [0.0, 0.38268, 0.0, 0.92388], "p": [0.0, 0.0, -1.0] }
            ]
        }"#,
    )
    .unwrap()
}

fn ringing_session() -> Session {
    let mut store = StateStore::new();
    store.set(StatePatch::new().with(keys::CURRENT_STATE, RINGING));
    let mut director = GameDirector::new(store, book(), mixer::shared(PlayerSettings::default()));
    director.add_clip(phone_zoom_clip());
    let mut zones = ZoneMonitor::new();
    zones.add(TriggerZone::new(booth_zone()).with_body(BodyId::new(7)));
    Session::new(
        director,
        CharacterRig::new(RigConfig::default(), 42),
        zones,
    )
}

#[test]
fn answering_the_phone_plays_the_line_after_two_seconds() {
    let mut host = Host::default();
    let mut session = ringing_session();
    let away = Vec3::new(10.0, 1.0, 10.0);
    let booth = Vec3::new(0.0, 1.0, 0.0);

    // The opening state cascade starts the bed music and the ring loop.
    step(&mut session, &mut host, away);
    assert!(host.audio.is_source_playing("music/night_bed"));
    assert!(host.audio.is_source_playing("sfx/phone_ring"));
    assert!(!session.director().is_speaking());

    // Walking into the booth answers the phone: the ring loop stops, the
    // line is queued with its authored delay, nothing speaks yet.
    step(&mut session, &mut host, booth);
    assert_eq!(session.director().state().beat(), ANSWERED);
    assert!(session.director().queue().is_pending("dialog:BONNE_SOIREE"));
    assert!(!host.audio.started.iter().any(|s| s == "vo/bonne_soiree"));
    assert!(!host.audio.is_source_playing("sfx/phone_ring"));
    assert!(host.audio.is_source_playing("music/night_bed"));

    // 15 frames = 1.875s simulated: one frame short of the delay.
    for _ in 0..15 {
        step(&mut session, &mut host, booth);
    }
    assert!(!session.director().is_speaking());

    // 16th frame lands exactly on 2.0s.
    step(&mut session, &mut host, booth);
    assert!(session.director().is_speaking());
    assert!(host.audio.is_source_playing("vo/bonne_soiree"));
    assert_eq!(host.ui.captions, vec!["Bonne soiree."]);

    // The once-zone is gone along with its sensor body.
    assert!(session.zones().is_empty());
    assert!(host.bodies.removed.contains(&BodyId::new(7)));
}

#[test]
fn double_scheduling_a_camera_keeps_one_entry_and_plays_once() {
    let mut host = Host::default();
    let mut session = ringing_session();
    let away = Vec3::new(10.0, 1.0, 10.0);

    {
        let mut ports = host.ports();
        let request = TriggerAction::CameraAnim {
            id: "phone-zoom".to_string(),
        };
        session.director_mut().dispatch(request.clone(), &mut ports);
        session.director_mut().dispatch(request, &mut ports);
    }
    assert_eq!(session.director().queue().len(), 1);
    assert!(session.director().queue().is_pending("camera:phone-zoom"));

    let mut frames_playing = 0;
    for _ in 0..30 {
        step(&mut session, &mut host, away);
        if session.director().is_camera_playing() {
            frames_playing += 1;
        }
    }
    assert!(frames_playing > 0);
    assert!(!session.director().is_camera_playing());
    assert!(session.director().queue().is_empty());
    assert!(!session.director().state().controls_locked());

    // The cutscene is once; asking again schedules but never replays.
    {
        let mut ports = host.ports();
        let request = TriggerAction::CameraAnim {
            id: "phone-zoom".to_string(),
        };
        session.director_mut().dispatch(request, &mut ports);
    }
    for _ in 0..10 {
        step(&mut session, &mut host, away);
        assert!(!session.director().is_camera_playing());
    }
}

#[test]
fn look_at_locks_input_until_the_scheduled_restore() {
    let mut host = Host::default();
    let mut session = ringing_session();
    let spot = Vec3::new(5.0, 1.0, 5.0);

    // One frame of normal control puts the camera at the player's eye.
    step(&mut session, &mut host, spot);
    assert_relative_eq!(host.camera.position.x, 5.0, epsilon = 1e-5);
    assert!(!session.director().state().controls_locked());

    // The target sits straight along +X from the eye.
    {
        let mut ports = host.ports();
        let look: TriggerAction = serde_json::from_str(
            r#"{ "type": "look_at", "target": [10.0, 1.7, 5.0], "duration": 1.0 }"#,
        )
        .unwrap();
        session.director_mut().dispatch(look, &mut ports);
        session.director_mut().settle(&mut ports);
    }
    assert!(session.director().state().controls_locked());
    assert!(session.director().queue().is_pending("restore-input"));

    // 7 frames = 0.875s: still turning, still locked.
    for _ in 0..7 {
        step(&mut session, &mut host, spot);
    }
    assert!(session.director().state().controls_locked());

    // 8th frame completes the turn and fires the restore together.
    step(&mut session, &mut host, spot);
    assert!(!session.director().state().controls_locked());
    assert_relative_eq!(
        session.character().yaw(),
        -std::f32::consts::FRAC_PI_2,
        epsilon = 1e-3
    );
}
