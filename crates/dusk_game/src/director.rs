//! The game director
//!
//! Owns the state store, the rule book and every subsystem that reacts to
//! them. Each state transition runs one cascade pass in a fixed order:
//! music, dialog, camera cues, SFX, scenes and videos. Delayed cues go
//! through the scheduling queue and are cancelled if the state moves past
//! them before they fire. Trigger-zone actions come in through
//! [`GameDirector::dispatch`] and feed the same pipeline.

use std::collections::HashMap;

use dusk_anim::{CameraClip, LookAtBlend, LookAtSpec, PathConfig, PathPlayer};
use dusk_audio::{MusicDirector, SfxBoard, SharedSettings, VolumeBus};
use dusk_core::{AudioOutput, BodyId, CameraRig};
use dusk_rules::{PlayedSet, RuleBook};
use dusk_sched::SchedulingQueue;
use dusk_state::{keys, GameState, StatePatch, StateStore};
use dusk_triggers::TriggerAction;

use crate::character::CharacterRig;
use crate::dialog::DialogManager;
use crate::scene::SceneDirector;
use crate::session::Ports;

/// Passes a single cascade may take before it is declared stuck.
const CASCADE_LIMIT: usize = 8;

const RESTORE_INPUT_KEY: &str = "restore-input";

fn dialog_key(id: &str) -> String {
    format!("dialog:{id}")
}

fn camera_key(id: &str) -> String {
    format!("camera:{id}")
}

/// A deferred cue waiting in the scheduling queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Start a dialog line by rule id.
    Dialog(String),
    /// Start a camera animation by rule id.
    Camera(String),
    /// Hand input back to the player.
    RestoreInput,
}

pub struct GameDirector {
    store: StateStore,
    book: RuleBook,
    clips: HashMap<String, CameraClip>,
    queue: SchedulingQueue<PendingAction>,
    bus: VolumeBus,
    music: MusicDirector,
    sfx: SfxBoard,
    dialog: DialogManager,
    scenes: SceneDirector,
    path: PathPlayer,
    look_at: Option<LookAtBlend>,
    camera_played: PlayedSet,
    /// Queue entries this director put there by evaluation, as opposed to
    /// trigger requests. Only these are cancelled when the state moves on.
    pending_dialog: Option<String>,
    pending_camera: Option<String>,
}

impl GameDirector {
    pub fn new(store: StateStore, book: RuleBook, settings: SharedSettings) -> Self {
        Self {
            store,
            book,
            clips: HashMap::new(),
            queue: SchedulingQueue::new(),
            bus: VolumeBus::new(settings),
            music: MusicDirector::new(),
            sfx: SfxBoard::new(),
            dialog: DialogManager::new(),
            scenes: SceneDirector::new(),
            path: PathPlayer::new(PathConfig::default()),
            look_at: None,
            camera_played: PlayedSet::new(),
            pending_dialog: None,
            pending_camera: None,
        }
    }

    /// Let camera paths drive the player's physics body.
    pub fn with_player_body(mut self, body: BodyId, eye_height: f32) -> Self {
        self.path = PathPlayer::new(PathConfig::default()).with_driven_body(body, eye_height);
        self
    }

    pub fn with_clips(mut self, clips: impl IntoIterator<Item = CameraClip>) -> Self {
        for clip in clips {
            self.add_clip(clip);
        }
        self
    }

    pub fn add_clip(&mut self, clip: CameraClip) {
        let name = clip.name().to_string();
        if self.clips.insert(name.clone(), clip).is_some() {
            log::warn!("camera clip `{name}` loaded twice, keeping the later one");
        }
    }

    pub fn state(&self) -> &GameState {
        self.store.state()
    }

    pub fn bus(&self) -> &VolumeBus {
        &self.bus
    }

    pub fn settings(&self) -> SharedSettings {
        self.bus.settings()
    }

    pub fn queue(&self) -> &SchedulingQueue<PendingAction> {
        &self.queue
    }

    pub fn is_speaking(&self) -> bool {
        self.dialog.is_speaking()
    }

    pub fn is_camera_playing(&self) -> bool {
        self.path.is_playing()
    }

    /// Merge a patch into the state. The cascade runs on the next
    /// [`GameDirector::update`] or [`GameDirector::settle`].
    pub fn set(&mut self, patch: StatePatch) {
        self.store.set(patch);
    }

    /// Advance every clock one frame and run the cascade for any state
    /// written since the last call.
    pub fn update(&mut self, dt: f32, character: &mut CharacterRig, ports: &mut Ports<'_>) {
        self.settle(ports);

        let speaking = self.dialog.is_speaking();
        let camera_busy = self.path.is_playing();
        let fired = self.queue.update(dt, |action| match action {
            PendingAction::Dialog(_) => !speaking,
            PendingAction::Camera(_) => !camera_busy,
            PendingAction::RestoreInput => true,
        });
        if let Some((_, action)) = fired {
            self.fire(action, ports);
        }

        if let Some(done) = self.path.update(dt, ports.camera, Some(&mut *ports.bodies)) {
            character.sync_orientation(done.rotation);
            if done.restore_input {
                self.store
                    .set(StatePatch::new().with(keys::CONTROLS_LOCKED, false));
            }
        }

        if let Some(blend) = self.look_at.as_mut() {
            if let Some(done) = blend.update(dt, ports.camera) {
                character.sync_orientation(done.rotation);
                self.look_at = None;
            }
        }

        self.dialog.update(dt, ports.audio, ports.ui);
        self.sfx.update(ports.audio);

        self.settle(ports);
    }

    /// Run queued state transitions through the cascade until none remain.
    pub fn settle(&mut self, ports: &mut Ports<'_>) {
        let mut passes = 0;
        while self.store.has_pending() {
            passes += 1;
            if passes > CASCADE_LIMIT {
                log::warn!("state cascade still unsettled after {CASCADE_LIMIT} passes");
                break;
            }
            for transition in self.store.drain_transitions() {
                log::debug!("state changed: {:?}", transition.changed);
            }
            self.reevaluate(ports);
        }
    }

    /// Apply a trigger action. The single place zone geometry becomes
    /// state, cues and UI events.
    pub fn dispatch(&mut self, action: TriggerAction, ports: &mut Ports<'_>) {
        match action {
            TriggerAction::SetState { set } => self.store.set(set),
            TriggerAction::LookAt { spec } => self.start_look_at(spec, ports.camera),
            TriggerAction::CameraAnim { id } => self.request_camera(&id),
            TriggerAction::Dialog { id } => self.request_dialog(&id),
            TriggerAction::PlaySfx { id } => match self.book.sfx.by_id(&id) {
                Some(rule) => self.sfx.play(rule, &self.bus, ports.audio),
                None => log::warn!("sfx `{id}` is not in the rule book"),
            },
            TriggerAction::StopSfx { id } => self.sfx.stop(&id, ports.audio),
            TriggerAction::Music { id } => match self.book.music.by_id(&id) {
                Some(rule) => self.music.apply(Some(rule), &self.bus, ports.audio),
                None => log::warn!("music `{id}` is not in the rule book"),
            },
            TriggerAction::Ui { event } => ports.ui.ui_event(&event),
            TriggerAction::Custom { name } => {
                log::info!("custom action `{name}` forwarded to the page");
                ports.ui.ui_event(&name);
            }
        }
    }

    /// Re-apply the volume cascade to everything currently audible.
    pub fn refresh_volumes(&self, audio: &mut dyn AudioOutput) {
        self.music.refresh_volume(&self.bus, audio);
        self.sfx.refresh_volume(&self.bus, audio);
        self.dialog.refresh_volume(&self.bus, audio);
    }

    /// One cascade pass against a state snapshot: music, dialog, cameras,
    /// SFX, scenes. The character enable state is the session's step; it
    /// reads `controls_locked` after the cascade has settled.
    fn reevaluate(&mut self, ports: &mut Ports<'_>) {
        let state = self.store.snapshot();
        // Music rules carry no play-once flag, and the SFX board owns its
        // own played set so a spent one-shot stays selected (and plays out)
        // until its criteria release.
        let no_exclusions = PlayedSet::new();

        let cue = self.book.music.select(&state, &no_exclusions);
        self.music.apply(cue, &self.bus, ports.audio);

        self.schedule_dialog(&state);
        self.schedule_camera(&state);

        let wanted = self.book.sfx.select_all(&state, &no_exclusions);
        self.sfx.reconcile(&wanted, &self.bus, ports.audio);

        self.scenes.reconcile(&state, &self.book, ports.scenes);
    }

    fn schedule_dialog(&mut self, state: &GameState) {
        match self.book.dialog.select(state, self.dialog.played()) {
            Some(rule) => {
                if self.dialog.current_id() == Some(rule.id.as_str())
                    || self.pending_dialog.as_deref() == Some(rule.id.as_str())
                {
                    return;
                }
                if let Some(stale) = self.pending_dialog.take() {
                    self.queue.cancel(&dialog_key(&stale));
                    log::debug!("dialog `{stale}` overtaken before it started");
                }
                if self.queue.schedule(
                    dialog_key(&rule.id),
                    rule.delay,
                    PendingAction::Dialog(rule.id.clone()),
                ) {
                    self.pending_dialog = Some(rule.id.clone());
                }
            }
            None => {
                if let Some(stale) = self.pending_dialog.take() {
                    self.queue.cancel(&dialog_key(&stale));
                    log::debug!("dialog `{stale}` no longer matches, cancelled");
                }
            }
        }
    }

    fn schedule_camera(&mut self, state: &GameState) {
        match self.book.cameras.select(state, &self.camera_played) {
            Some(rule) => {
                if self.pending_camera.as_deref() == Some(rule.id.as_str()) {
                    return;
                }
                if let Some(stale) = self.pending_camera.take() {
                    self.queue.cancel(&camera_key(&stale));
                    log::debug!("camera `{stale}` overtaken before it started");
                }
                if self.queue.schedule(
                    camera_key(&rule.id),
                    rule.delay,
                    PendingAction::Camera(rule.id.clone()),
                ) {
                    self.pending_camera = Some(rule.id.clone());
                }
            }
            None => {
                if let Some(stale) = self.pending_camera.take() {
                    self.queue.cancel(&camera_key(&stale));
                    log::debug!("camera `{stale}` no longer matches, cancelled");
                }
            }
        }
    }

    fn fire(&mut self, action: PendingAction, ports: &mut Ports<'_>) {
        match action {
            PendingAction::Dialog(id) => {
                if self.pending_dialog.as_deref() == Some(id.as_str()) {
                    self.pending_dialog = None;
                }
                match self.book.dialog.by_id(&id) {
                    Some(rule) => self.dialog.start(rule, &self.bus, ports.audio, ports.ui),
                    None => log::warn!("dialog `{id}` is not in the rule book"),
                }
            }
            PendingAction::Camera(id) => {
                if self.pending_camera.as_deref() == Some(id.as_str()) {
                    self.pending_camera = None;
                }
                self.start_camera(&id, ports);
            }
            PendingAction::RestoreInput => {
                self.store
                    .set(StatePatch::new().with(keys::CONTROLS_LOCKED, false));
            }
        }
    }

    fn request_dialog(&mut self, id: &str) {
        let delay = match self.book.dialog.by_id(id) {
            Some(rule) => rule.delay,
            None => {
                log::warn!("dialog `{id}` is not in the rule book");
                return;
            }
        };
        self.queue
            .schedule(dialog_key(id), delay, PendingAction::Dialog(id.to_string()));
    }

    fn request_camera(&mut self, id: &str) {
        let delay = match self.book.cameras.by_id(id) {
            Some(rule) => rule.delay,
            None => {
                log::warn!("camera `{id}` is not in the rule book");
                return;
            }
        };
        self.queue
            .schedule(camera_key(id), delay, PendingAction::Camera(id.to_string()));
    }

    fn start_camera(&mut self, id: &str, ports: &mut Ports<'_>) {
        let rule = match self.book.cameras.by_id(id) {
            Some(rule) => rule,
            None => {
                log::warn!("camera `{id}` is not in the rule book");
                return;
            }
        };
        if rule.once && !self.camera_played.mark(id) {
            log::debug!("camera `{id}` already played");
            return;
        }
        let clip = match self.clips.get(&rule.clip) {
            Some(clip) => clip,
            None => {
                log::warn!("camera `{id}`: no clip named `{}`", rule.clip);
                return;
            }
        };
        self.store
            .set(StatePatch::new().with(keys::CONTROLS_LOCKED, true));
        self.path
            .start(clip.clone(), rule.restore_input, ports.camera);
    }

    fn start_look_at(&mut self, mut spec: LookAtSpec, camera: &mut dyn CameraRig) {
        if let Some(active) = self.look_at.take() {
            active.cancel(camera);
        }
        if let Some(zoom) = spec.zoom.as_mut() {
            let settings = self.bus.settings();
            let settings = settings.read();
            if settings.dof_enabled {
                zoom.aperture *= settings.dof_aperture_scale;
            } else {
                zoom.aperture = 0.0;
            }
        }
        let delay = spec.input_restore_delay();
        self.store
            .set(StatePatch::new().with(keys::CONTROLS_LOCKED, true));
        self.queue.cancel(RESTORE_INPUT_KEY);
        self.queue
            .schedule(RESTORE_INPUT_KEY, delay, PendingAction::RestoreInput);
        log::info!("look-at {:?}, input back in {delay:.2}s", spec.target);
        self.look_at = Some(LookAtBlend::start(spec, camera));
    }
}
