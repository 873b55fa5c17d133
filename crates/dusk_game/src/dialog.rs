//! Spoken lines and their captions
//!
//! One line plays at a time. Captions appear at their authored offsets and
//! the caption area is cleared when the line ends. Lines with an authored
//! `duration` end on the clock; the rest end when the host reports their
//! audio finished.

use dusk_audio::{AudioGroup, HandleVolume, VolumeBus};
use dusk_core::{AudioHandle, AudioOutput, PlayOpts, UiSink};
use dusk_rules::dialog::{Caption, DialogRule};
use dusk_rules::PlayedSet;

#[derive(Debug)]
struct ActiveLine {
    id: String,
    handle: AudioHandle,
    /// Authored line volume, before the cascade.
    volume: f32,
    elapsed: f32,
    duration: Option<f32>,
    captions: Vec<Caption>,
    next_caption: usize,
    caption_shown: bool,
}

#[derive(Debug, Default)]
pub struct DialogManager {
    line: Option<ActiveLine>,
    played: PlayedSet,
}

impl DialogManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Play-once lines already heard this session.
    pub fn played(&self) -> &PlayedSet {
        &self.played
    }

    pub fn is_speaking(&self) -> bool {
        self.line.is_some()
    }

    pub fn current_id(&self) -> Option<&str> {
        self.line.as_ref().map(|line| line.id.as_str())
    }

    /// Start a line. An already-running line is cut off, which only happens
    /// when a trigger forces dialog past the queue's speaking check.
    pub fn start(
        &mut self,
        rule: &DialogRule,
        bus: &VolumeBus,
        audio: &mut dyn AudioOutput,
        ui: &mut dyn UiSink,
    ) {
        if rule.once && !self.played.mark(&rule.id) {
            log::debug!("dialog `{}` already played", rule.id);
            return;
        }
        if let Some(line) = self.line.take() {
            log::warn!("dialog `{}` interrupts `{}`", rule.id, line.id);
            audio.stop(line.handle);
            if line.caption_shown {
                ui.clear_caption();
            }
        }

        let gain = bus.gain(AudioGroup::Dialog) * rule.volume;
        let handle = audio.play(&rule.audio, PlayOpts::new().with_volume(gain));
        if handle.is_null() {
            log::warn!("dialog `{}`: unknown audio `{}`", rule.id, rule.audio);
        }
        log::info!("dialog `{}`", rule.id);

        let mut captions = rule.captions.clone();
        captions.sort_by(|a, b| a.at.total_cmp(&b.at));
        self.line = Some(ActiveLine {
            id: rule.id.clone(),
            handle,
            volume: rule.volume,
            elapsed: 0.0,
            duration: rule.duration,
            captions,
            next_caption: 0,
            caption_shown: false,
        });
    }

    /// Advance the line. Returns the id of a line that finished this frame.
    pub fn update(
        &mut self,
        dt: f32,
        audio: &mut dyn AudioOutput,
        ui: &mut dyn UiSink,
    ) -> Option<String> {
        let line = self.line.as_mut()?;
        line.elapsed += dt;

        while let Some(caption) = line.captions.get(line.next_caption) {
            if line.elapsed < caption.at {
                break;
            }
            ui.show_caption(&caption.text);
            line.caption_shown = true;
            line.next_caption += 1;
        }

        let finished = match line.duration {
            Some(duration) => line.elapsed >= duration,
            None => !audio.is_playing(line.handle),
        };
        if !finished {
            return None;
        }

        let line = self.line.take()?;
        audio.stop(line.handle);
        if line.caption_shown {
            ui.clear_caption();
        }
        log::debug!("dialog `{}` finished", line.id);
        Some(line.id)
    }

    /// Cut the current line off, clearing its caption.
    pub fn cancel(&mut self, audio: &mut dyn AudioOutput, ui: &mut dyn UiSink) {
        if let Some(line) = self.line.take() {
            audio.stop(line.handle);
            if line.caption_shown {
                ui.clear_caption();
            }
            log::debug!("dialog `{}` cancelled", line.id);
        }
    }

    /// Re-apply the volume cascade to the running line.
    pub fn refresh_volume(&self, bus: &VolumeBus, audio: &mut dyn AudioOutput) {
        if let Some(line) = &self.line {
            let mut control = HandleVolume::new(audio, line.handle);
            bus.route(AudioGroup::Dialog, line.volume, &mut control);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dusk_audio::{mixer, PlayerSettings};

    #[derive(Default)]
    struct FakeAudio {
        next: u64,
        started: Vec<String>,
        stopped: Vec<AudioHandle>,
        playing: Vec<AudioHandle>,
    }

    impl AudioOutput for FakeAudio {
        fn play(&mut self, source: &str, _opts: PlayOpts) -> AudioHandle {
            if source == "missing" {
                return AudioHandle::null();
            }
            self.next += 1;
            let handle = AudioHandle::new(self.next);
            self.started.push(source.to_string());
            self.playing.push(handle);
            handle
        }

        fn stop(&mut self, handle: AudioHandle) {
            self.stopped.push(handle);
            self.playing.retain(|h| *h != handle);
        }

        fn fade_out(&mut self, handle: AudioHandle, _seconds: f32) {
            self.playing.retain(|h| *h != handle);
        }

        fn set_volume(&mut self, _handle: AudioHandle, _volume: f32) {}

        fn is_playing(&self, handle: AudioHandle) -> bool {
            self.playing.contains(&handle)
        }
    }

    #[derive(Default)]
    struct FakeUi {
        captions: Vec<String>,
        cleared: usize,
        events: Vec<String>,
    }

    impl UiSink for FakeUi {
        fn show_caption(&mut self, text: &str) {
            self.captions.push(text.to_string());
        }

        fn clear_caption(&mut self) {
            self.cleared += 1;
        }

        fn ui_event(&mut self, name: &str) {
            self.events.push(name.to_string());
        }
    }

    fn bus() -> VolumeBus {
        VolumeBus::new(mixer::shared(PlayerSettings::default()))
    }

    fn line(id: &str) -> DialogRule {
        serde_json::from_str(&format!(
            r#"{{
                "id": "{id}",
                "audio": "vo/{id}",
                "duration": 2.0,
                "captions": [
                    {{ "text": "first", "at": 0.0 }},
                    {{ "text": "second", "at": 1.0 }}
                ]
            }}"#
        ))
        .unwrap()
    }

    #[test]
    fn captions_follow_the_clock() {
        let mut dialog = DialogManager::new();
        let mut audio = FakeAudio::default();
        let mut ui = FakeUi::default();

        dialog.start(&line("bonne-soiree"), &bus(), &mut audio, &mut ui);
        assert!(dialog.is_speaking());

        assert!(dialog.update(0.5, &mut audio, &mut ui).is_none());
        assert_eq!(ui.captions, vec!["first"]);

        assert!(dialog.update(0.6, &mut audio, &mut ui).is_none());
        assert_eq!(ui.captions, vec!["first", "second"]);

        let finished = dialog.update(1.0, &mut audio, &mut ui);
        assert_eq!(finished.as_deref(), Some("bonne-soiree"));
        assert_eq!(ui.cleared, 1);
        assert!(!dialog.is_speaking());
    }

    #[test]
    fn untimed_lines_end_with_their_audio() {
        let mut rule = line("walkie");
        rule.duration = None;
        let mut dialog = DialogManager::new();
        let mut audio = FakeAudio::default();
        let mut ui = FakeUi::default();

        dialog.start(&rule, &bus(), &mut audio, &mut ui);
        assert!(dialog.update(0.1, &mut audio, &mut ui).is_none());

        audio.playing.clear();
        assert_eq!(
            dialog.update(0.1, &mut audio, &mut ui).as_deref(),
            Some("walkie")
        );
    }

    #[test]
    fn once_lines_do_not_restart() {
        let mut dialog = DialogManager::new();
        let mut audio = FakeAudio::default();
        let mut ui = FakeUi::default();
        let rule = line("intro");

        dialog.start(&rule, &bus(), &mut audio, &mut ui);
        dialog.cancel(&mut audio, &mut ui);
        dialog.start(&rule, &bus(), &mut audio, &mut ui);

        assert_eq!(audio.started.len(), 1);
        assert!(!dialog.is_speaking());
        assert!(dialog.played().contains("intro"));
    }

    #[test]
    fn interrupting_stops_the_previous_line() {
        let mut dialog = DialogManager::new();
        let mut audio = FakeAudio::default();
        let mut ui = FakeUi::default();

        dialog.start(&line("one"), &bus(), &mut audio, &mut ui);
        dialog.start(&line("two"), &bus(), &mut audio, &mut ui);

        assert_eq!(audio.started, vec!["vo/one", "vo/two"]);
        assert_eq!(audio.stopped.len(), 1);
        assert_eq!(dialog.current_id(), Some("two"));
    }
}
