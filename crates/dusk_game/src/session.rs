//! The session frame loop
//!
//! One call per rendered frame, in a fixed order: director clocks and
//! cascades, zone overlap against the player, zone actions back into the
//! director, then the character writes the camera if it still owns it.

use dusk_audio::AudioGroup;
use dusk_core::{AudioOutput, BodyTransforms, CameraRig, SceneOps, UiSink};
use dusk_triggers::{PlayerCollider, ZoneMonitor};
use glam::{Vec2, Vec3};

use crate::character::CharacterRig;
use crate::director::GameDirector;

/// Host collaborators, reborrowed for one frame.
pub struct Ports<'a> {
    pub camera: &'a mut dyn CameraRig,
    pub audio: &'a mut dyn AudioOutput,
    pub bodies: &'a mut dyn BodyTransforms,
    pub ui: &'a mut dyn UiSink,
    pub scenes: &'a mut dyn SceneOps,
}

/// Input and body state sampled by the host this frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub dt: f32,
    /// Look input in screen units.
    pub look: Vec2,
    /// Ground speed of the body, m/s.
    pub move_speed: f32,
    /// Body center in world space.
    pub body_position: Vec3,
}

impl Frame {
    /// A frame with no input, for scripted stepping.
    pub fn idle(dt: f32, body_position: Vec3) -> Self {
        Self {
            dt,
            look: Vec2::ZERO,
            move_speed: 0.0,
            body_position,
        }
    }
}

pub struct Session {
    director: GameDirector,
    character: CharacterRig,
    zones: ZoneMonitor,
}

impl Session {
    pub fn new(director: GameDirector, character: CharacterRig, zones: ZoneMonitor) -> Self {
        Self {
            director,
            character,
            zones,
        }
    }

    pub fn director(&self) -> &GameDirector {
        &self.director
    }

    pub fn director_mut(&mut self) -> &mut GameDirector {
        &mut self.director
    }

    pub fn character(&self) -> &CharacterRig {
        &self.character
    }

    pub fn zones(&self) -> &ZoneMonitor {
        &self.zones
    }

    pub fn frame(&mut self, frame: &Frame, ports: &mut Ports<'_>) {
        self.director.update(frame.dt, &mut self.character, ports);

        let player = PlayerCollider::new(frame.body_position);
        let events = self.zones.update(
            frame.dt,
            &player,
            self.director.state(),
            Some(&mut *ports.bodies),
        );
        for event in events {
            for action in event.actions {
                self.director.dispatch(action, ports);
            }
        }
        self.director.settle(ports);

        let locked = self.director.state().controls_locked();
        self.character.set_enabled(!locked);
        let suppress_glance = locked || self.director.is_speaking();
        self.character.update(
            frame.dt,
            frame.look,
            frame.move_speed,
            frame.body_position,
            suppress_glance,
            ports.camera,
        );
    }

    /// Push the current settings through every playing handle and the
    /// breathing proxy. Call after the player changes a volume.
    pub fn refresh_volumes(&mut self, audio: &mut dyn AudioOutput) {
        self.director.refresh_volumes(audio);
        let mut breath = self.character.breath();
        self.director.bus().route(AudioGroup::Sfx, 1.0, &mut breath);
    }
}
