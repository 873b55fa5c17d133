//! Music direction
//!
//! At most one music cue plays at a time. The director is handed whichever
//! cue currently wins the music table and reconciles playback against it:
//! the same winner is a no-op, a new winner fades the old track out and
//! the new one in, no winner fades to silence.

use dusk_core::{AudioHandle, AudioOutput, PlayOpts};
use dusk_rules::music::MusicRule;

use crate::mixer::{AudioGroup, VolumeBus};
use crate::volume::HandleVolume;

#[derive(Debug)]
struct CurrentTrack {
    id: String,
    handle: AudioHandle,
    /// Authored cue volume, before the cascade.
    volume: f32,
    fade_out: f32,
}

#[derive(Debug, Default)]
pub struct MusicDirector {
    current: Option<CurrentTrack>,
}

impl MusicDirector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.id.as_str())
    }

    /// Reconcile playback against the winning cue. Idempotent per winner.
    pub fn apply(&mut self, cue: Option<&MusicRule>, bus: &VolumeBus, audio: &mut dyn AudioOutput) {
        match (self.current.as_ref(), cue) {
            (Some(current), Some(cue)) if current.id == cue.id => {}
            (_, Some(cue)) => {
                self.fade_out_current(audio);
                let handle = audio.play(
                    &cue.audio,
                    PlayOpts::new()
                        .with_looping(cue.looping)
                        .with_volume(bus.gain(AudioGroup::Music) * cue.volume)
                        .with_fade_in(cue.fade_in),
                );
                if handle.is_null() {
                    log::warn!("music cue '{}' failed to start ({})", cue.id, cue.audio);
                    return;
                }
                log::info!("music: now playing '{}'", cue.id);
                self.current = Some(CurrentTrack {
                    id: cue.id.clone(),
                    handle,
                    volume: cue.volume,
                    fade_out: cue.fade_out,
                });
            }
            (Some(_), None) => {
                log::info!("music: fading to silence");
                self.fade_out_current(audio);
            }
            (None, None) => {}
        }
    }

    /// Re-push the cascaded volume after a settings change.
    pub fn refresh_volume(&self, bus: &VolumeBus, audio: &mut dyn AudioOutput) {
        if let Some(current) = &self.current {
            let mut control = HandleVolume::new(audio, current.handle);
            bus.route(AudioGroup::Music, current.volume, &mut control);
        }
    }

    pub fn stop(&mut self, audio: &mut dyn AudioOutput) {
        self.fade_out_current(audio);
    }

    fn fade_out_current(&mut self, audio: &mut dyn AudioOutput) {
        if let Some(current) = self.current.take() {
            audio.fade_out(current.handle, current.fade_out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixer::shared;
    use crate::settings::PlayerSettings;

    #[derive(Debug, PartialEq)]
    enum Call {
        Play(String, f32, f32),
        FadeOut(u64, f32),
        SetVolume(u64, f32),
    }

    #[derive(Default)]
    struct FakeAudio {
        calls: Vec<Call>,
        next: u64,
    }

    impl AudioOutput for FakeAudio {
        fn play(&mut self, source: &str, opts: PlayOpts) -> AudioHandle {
            self.next += 1;
            self.calls
                .push(Call::Play(source.to_string(), opts.volume, opts.fade_in));
            AudioHandle::new(self.next)
        }
        fn stop(&mut self, _handle: AudioHandle) {}
        fn fade_out(&mut self, handle: AudioHandle, seconds: f32) {
            self.calls.push(Call::FadeOut(handle.to_raw(), seconds));
        }
        fn set_volume(&mut self, handle: AudioHandle, volume: f32) {
            self.calls.push(Call::SetVolume(handle.to_raw(), volume));
        }
        fn is_playing(&self, _handle: AudioHandle) -> bool {
            true
        }
    }

    fn cue(id: &str) -> MusicRule {
        serde_json::from_str(&format!(
            r#"{{ "id": "{id}", "audio": "music/{id}", "fade_out": 2.0 }}"#
        ))
        .unwrap()
    }

    fn bus() -> VolumeBus {
        VolumeBus::new(shared(PlayerSettings::default()))
    }

    #[test]
    fn same_winner_is_a_no_op() {
        let mut director = MusicDirector::new();
        let mut audio = FakeAudio::default();
        let night = cue("night");

        director.apply(Some(&night), &bus(), &mut audio);
        director.apply(Some(&night), &bus(), &mut audio);
        director.apply(Some(&night), &bus(), &mut audio);

        assert_eq!(audio.calls.len(), 1);
        assert_eq!(director.current_id(), Some("night"));
    }

    #[test]
    fn new_winner_crossfades() {
        let mut director = MusicDirector::new();
        let mut audio = FakeAudio::default();

        director.apply(Some(&cue("night")), &bus(), &mut audio);
        director.apply(Some(&cue("finale")), &bus(), &mut audio);

        assert_eq!(
            audio.calls,
            vec![
                Call::Play("music/night".into(), 1.0, 1.0),
                Call::FadeOut(1, 2.0),
                Call::Play("music/finale".into(), 1.0, 1.0),
            ]
        );
        assert_eq!(director.current_id(), Some("finale"));
    }

    #[test]
    fn no_winner_fades_to_silence() {
        let mut director = MusicDirector::new();
        let mut audio = FakeAudio::default();

        director.apply(Some(&cue("night")), &bus(), &mut audio);
        director.apply(None, &bus(), &mut audio);
        // Silence stays silent.
        director.apply(None, &bus(), &mut audio);

        assert_eq!(audio.calls.len(), 2);
        assert_eq!(audio.calls[1], Call::FadeOut(1, 2.0));
        assert_eq!(director.current_id(), None);
    }

    #[test]
    fn settings_changes_reroute_the_live_track() {
        let mut director = MusicDirector::new();
        let mut audio = FakeAudio::default();
        let bus = bus();

        director.apply(Some(&cue("night")), &bus, &mut audio);
        bus.set_group(AudioGroup::Music, 0.25);
        director.refresh_volume(&bus, &mut audio);

        assert_eq!(audio.calls[1], Call::SetVolume(1, 0.25));
    }
}
