//! The SFX board
//!
//! Two ways a sound effect starts: criteria-driven autoplay (the state
//! cascade hands the board every currently-matching rule and the board
//! starts what is new and stops what stopped matching) and manual
//! playback by id from trigger actions. Play-once rules are excluded
//! from both paths after their first start.

use std::collections::HashMap;

use dusk_core::{AudioHandle, AudioOutput, PlayOpts};
use dusk_rules::rule::PlayedSet;
use dusk_rules::sfx::SfxRule;

use crate::mixer::{AudioGroup, VolumeBus};
use crate::volume::HandleVolume;

#[derive(Debug)]
struct ActiveSfx {
    handle: AudioHandle,
    volume: f32,
    looping: bool,
    /// Started by the reconcile pass, so the reconcile pass owns stopping
    /// it. Spent one-shots stay parked here until their criteria release,
    /// which keeps a held-true criteria from retriggering them.
    auto: bool,
}

#[derive(Debug, Default)]
pub struct SfxBoard {
    active: HashMap<String, ActiveSfx>,
    played: PlayedSet,
}

impl SfxBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Play-once ids that have already fired.
    pub fn played(&self) -> &PlayedSet {
        &self.played
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.contains_key(id)
    }

    /// Criteria-driven autoplay/stop. Safe to re-run with the same set.
    pub fn reconcile(&mut self, matched: &[&SfxRule], bus: &VolumeBus, audio: &mut dyn AudioOutput) {
        let wanted: Vec<&str> = matched.iter().map(|r| r.id.as_str()).collect();

        let released: Vec<String> = self
            .active
            .iter()
            .filter(|(id, sfx)| sfx.auto && !wanted.contains(&id.as_str()))
            .map(|(id, _)| id.clone())
            .collect();
        for id in released {
            if let Some(sfx) = self.active.remove(&id) {
                audio.stop(sfx.handle);
                log::debug!("sfx '{id}' released");
            }
        }

        for rule in matched {
            if !self.active.contains_key(&rule.id) {
                self.start(rule, true, bus, audio);
            }
        }
    }

    /// Manual playback from a trigger action or scripted call.
    pub fn play(&mut self, rule: &SfxRule, bus: &VolumeBus, audio: &mut dyn AudioOutput) {
        if let Some(existing) = self.active.get(&rule.id) {
            if existing.looping {
                log::debug!("sfx '{}' already looping", rule.id);
                return;
            }
        }
        self.start(rule, false, bus, audio);
    }

    /// Stop by id, whatever started it.
    pub fn stop(&mut self, id: &str, audio: &mut dyn AudioOutput) {
        match self.active.remove(id) {
            Some(sfx) => audio.stop(sfx.handle),
            None => log::debug!("sfx '{id}' not active, nothing to stop"),
        }
    }

    /// Drop bookkeeping for finished manual one-shots.
    pub fn update(&mut self, audio: &dyn AudioOutput) {
        self.active
            .retain(|_, sfx| sfx.auto || sfx.looping || audio.is_playing(sfx.handle));
    }

    /// Re-push cascaded volumes after a settings change.
    pub fn refresh_volume(&self, bus: &VolumeBus, audio: &mut dyn AudioOutput) {
        for sfx in self.active.values() {
            let mut control = HandleVolume::new(audio, sfx.handle);
            bus.route(AudioGroup::Sfx, sfx.volume, &mut control);
        }
    }

    pub fn stop_all(&mut self, audio: &mut dyn AudioOutput) {
        for (_, sfx) in self.active.drain() {
            audio.stop(sfx.handle);
        }
    }

    fn start(&mut self, rule: &SfxRule, auto: bool, bus: &VolumeBus, audio: &mut dyn AudioOutput) {
        if rule.once && !self.played.mark(&rule.id) {
            return;
        }
        let handle = audio.play(
            &rule.audio,
            PlayOpts::new()
                .with_looping(rule.looping)
                .with_volume(bus.gain(AudioGroup::Sfx) * rule.volume),
        );
        if handle.is_null() {
            log::warn!("sfx '{}' failed to start ({})", rule.id, rule.audio);
            return;
        }
        log::debug!("sfx '{}' started", rule.id);
        self.active.insert(
            rule.id.clone(),
            ActiveSfx {
                handle,
                volume: rule.volume,
                looping: rule.looping,
                auto,
            },
        );
    }
}
