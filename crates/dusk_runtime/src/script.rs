//! The scripted phone-booth opening
//!
//! A deterministic walk through the demo content against the headless
//! host: the title sequence plays over the night street, the player walks
//! toward the ringing booth, glances at it on the way, answers, rides the
//! camera zoom, hears the line and leaves. The log is the demo's output.

use std::path::PathBuf;

use dusk_anim::{CordFollow, TitleConfig, TitleSequence};
use dusk_audio::{mixer, PlayerSettings};
use dusk_core::{BodyId, BodyTransforms};
use dusk_game::{CharacterRig, Frame, GameDirector, Ports, RigConfig, Session};
use dusk_state::{startup_patch, StateStore};
use dusk_triggers::{TriggerZone, ZoneMonitor};
use glam::{Vec2, Vec3};

use crate::content::GameContent;
use crate::host::{
    FileStore, HeadlessAudio, HeadlessBodies, HeadlessCamera, HeadlessScenes, HeadlessUi,
    UniformLog,
};

/// The player's physics body.
const PLAYER: BodyId = BodyId::new(1);
/// The phone box the handset cord hangs from.
const CORD_ANCHOR: BodyId = BodyId::new(50);

const SPAWN: Vec3 = Vec3::new(9.0, 1.0, 7.0);
/// Just inside the booth.
const BOOTH: Vec3 = Vec3::new(0.0, 1.0, 0.4);
const EXIT: Vec3 = Vec3::new(7.0, 1.0, 7.0);

const WALK_SPEED: f32 = 1.6;
/// The beat the answer zone advances to.
const ANSWERED: i64 = 6;
/// Hard cap on simulated time, in case content edits stall a phase.
const MAX_SIM_SECONDS: f32 = 45.0;

struct Host {
    camera: HeadlessCamera,
    audio: HeadlessAudio,
    bodies: HeadlessBodies,
    ui: HeadlessUi,
    scenes: HeadlessScenes,
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Title,
    WalkIn,
    Answering,
    WalkOut,
    Done,
}

pub fn run(content: GameContent, page_url: &str, settings_path: PathBuf, fps: u32) {
    let fps = fps.max(1);
    let dt = 1.0 / fps as f32;

    let mut storage = FileStore::open(settings_path);
    let settings = PlayerSettings::load_or_default(&storage);
    log::info!(
        "settings: master {:.2}, dof {}",
        settings.master_volume,
        if settings.dof_enabled { "on" } else { "off" }
    );

    let mut store = StateStore::new();
    store.set(startup_patch(page_url, &content.presets));

    let mut host = Host {
        camera: HeadlessCamera::new(),
        audio: HeadlessAudio::default(),
        bodies: HeadlessBodies::default(),
        ui: HeadlessUi::default(),
        scenes: HeadlessScenes::default(),
    };
    host.bodies.register(PLAYER, SPAWN);

    // Once-zones get a sensor body so consuming them has something to
    // tear down.
    let mut zones = ZoneMonitor::new();
    for (index, def) in content.zones.into_iter().enumerate() {
        let sensor = def.once.then(|| BodyId::new(100 + index as u64));
        if let Some(body) = sensor {
            host.bodies.register(body, Vec3::from(def.position));
        }
        let mut zone = TriggerZone::new(def);
        if let Some(body) = sensor {
            zone = zone.with_body(body);
        }
        zones.add(zone);
    }

    // The handset cord: anchored to the box, four hanging segments.
    let segments: Vec<BodyId> = (0..4).map(|i| BodyId::new(60 + i)).collect();
    host.bodies.register(CORD_ANCHOR, Vec3::new(0.0, 2.2, 0.0));
    for (i, &body) in segments.iter().enumerate() {
        host.bodies
            .register(body, Vec3::new(0.0, 2.0 - 0.3 * i as f32, 0.0));
    }
    let mut cord = CordFollow::new(CORD_ANCHOR, segments);

    let rig_config = RigConfig::default();
    let director = GameDirector::new(store, content.book, mixer::shared(settings))
        .with_clips(content.clips)
        .with_player_body(PLAYER, rig_config.eye_height);
    let mut session = Session::new(director, CharacterRig::new(rig_config, 7), zones);

    let mut title = TitleSequence::new(TitleConfig::default());
    let mut uniforms = UniformLog::default();
    title.start();

    let mut phase = Phase::Title;
    let mut position = SPAWN;
    let mut last_beat = session.director().state().beat();
    let mut was_speaking = false;
    let mut t = 0.0f32;
    let mut frames: u64 = 0;
    log::info!("demo: starting at beat {last_beat}, {fps} fps");

    while phase != Phase::Done && t < MAX_SIM_SECONDS {
        let locked = session.director().state().controls_locked();

        // Scripted locomotion; the rig only looks, the script moves.
        let target = match phase {
            Phase::WalkIn => Some(BOOTH),
            Phase::WalkOut => Some(EXIT),
            _ => None,
        };
        let mut speed = 0.0;
        if let Some(target) = target {
            if !locked {
                let moved = step_toward(&mut position, target, WALK_SPEED * dt);
                speed = moved / dt;
            }
        }

        let frame = Frame {
            dt,
            look: Vec2::ZERO,
            move_speed: speed,
            body_position: position,
        };
        {
            let mut ports = host.ports();
            session.frame(&frame, &mut ports);
        }

        // Camera paths drive the player's body; adopt wherever it was left.
        if session.director().is_camera_playing() {
            if let Some(driven) = host.bodies.translation(PLAYER) {
                position = driven;
            }
        } else {
            host.bodies.set_translation(PLAYER, position);
        }

        if title.is_active() && title.update(dt, &mut uniforms) {
            log::info!("title: done after {} uniform writes", uniforms.writes);
            phase = Phase::WalkIn;
        }

        let beat = session.director().state().beat();
        if beat != last_beat {
            log::info!("state: beat {last_beat} -> {beat} at t={t:.2}s");
            if beat == ANSWERED {
                cord.attach(hand_at(position), 0.6, &host.bodies);
                phase = Phase::Answering;
            }
            last_beat = beat;
        }

        if cord.is_attached() {
            cord.move_to(hand_at(position));
        }
        cord.update(dt, &mut host.bodies);

        let speaking = session.director().is_speaking();
        if was_speaking && !speaking && phase == Phase::Answering {
            log::info!("demo: line over, hanging up");
            cord.release();
            phase = Phase::WalkOut;
        }
        was_speaking = speaking;

        if phase == Phase::WalkOut && position.distance(EXIT) < 0.1 {
            log::info!("demo: back on the street at t={t:.2}s");
            phase = Phase::Done;
        }

        // One-shots do not end on their own in a headless world.
        frames += 1;
        if frames % (fps as u64 * 2) == 0 {
            host.audio.finish_one_shots();
        }
        t += dt;
    }

    if phase != Phase::Done {
        log::warn!("demo: stopped at {MAX_SIM_SECONDS:.0}s in phase {phase:?}");
    }
    log::info!(
        "demo: {frames} frames over {t:.1}s, {} sounds started, {} captions",
        host.audio.started.len(),
        host.ui.captions_shown
    );
    log::info!("demo: still audible: {:?}", host.audio.playing_sources());

    if let Err(err) = settings.save(&mut storage) {
        log::warn!("settings: save failed: {err}");
    }
}

/// Where the handset sits while the player holds it.
fn hand_at(body: Vec3) -> Vec3 {
    body + Vec3::new(0.2, 0.4, -0.2)
}

/// Step toward `target` by at most `max_step`; returns the distance moved.
fn step_toward(position: &mut Vec3, target: Vec3, max_step: f32) -> f32 {
    let to = target - *position;
    let distance = to.length();
    if distance <= max_step {
        *position = target;
        distance
    } else {
        *position += to / distance * max_step;
        max_step
    }
}
