//! The volume cascade
//!
//! Every audible thing belongs to a group; its final gain is the master
//! volume times its group volume times its own authored volume. Settings
//! sit behind a shared lock so the options UI and the directors see the
//! same numbers.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::settings::PlayerSettings;
use crate::volume::VolumeControl;

/// Mixing groups under the master volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioGroup {
    Music,
    Sfx,
    Dialog,
}

/// Settings handle shared between the bus and whoever edits preferences.
pub type SharedSettings = Arc<RwLock<PlayerSettings>>;

pub fn shared(settings: PlayerSettings) -> SharedSettings {
    Arc::new(RwLock::new(settings))
}

/// Computes cascaded gains and pushes them at routing targets.
#[derive(Debug, Clone)]
pub struct VolumeBus {
    settings: SharedSettings,
}

impl VolumeBus {
    pub fn new(settings: SharedSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> SharedSettings {
        Arc::clone(&self.settings)
    }

    /// Cascaded gain for a group: zero when muted, otherwise
    /// master times group.
    pub fn gain(&self, group: AudioGroup) -> f32 {
        let settings = self.settings.read();
        if settings.muted {
            return 0.0;
        }
        let group_volume = match group {
            AudioGroup::Music => settings.music_volume,
            AudioGroup::Sfx => settings.sfx_volume,
            AudioGroup::Dialog => settings.dialog_volume,
        };
        settings.master_volume * group_volume
    }

    /// Push `base` scaled by the group's cascaded gain at a target.
    pub fn route(&self, group: AudioGroup, base: f32, control: &mut dyn VolumeControl) {
        control.set_volume(self.gain(group) * base.clamp(0.0, 1.0));
    }

    pub fn set_master(&self, volume: f32) {
        self.settings.write().master_volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_group(&self, group: AudioGroup, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        let mut settings = self.settings.write();
        match group {
            AudioGroup::Music => settings.music_volume = volume,
            AudioGroup::Sfx => settings.sfx_volume = volume,
            AudioGroup::Dialog => settings.dialog_volume = volume,
        }
    }

    pub fn set_muted(&self, muted: bool) {
        self.settings.write().muted = muted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::SharedVolume;

    #[test]
    fn gain_cascades_master_over_groups() {
        let bus = VolumeBus::new(shared(PlayerSettings::default()));
        bus.set_master(0.5);
        bus.set_group(AudioGroup::Sfx, 0.8);

        assert!((bus.gain(AudioGroup::Sfx) - 0.4).abs() < 1e-6);
        assert!((bus.gain(AudioGroup::Music) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn mute_silences_every_group() {
        let bus = VolumeBus::new(shared(PlayerSettings::default()));
        bus.set_muted(true);
        assert_eq!(bus.gain(AudioGroup::Music), 0.0);
        assert_eq!(bus.gain(AudioGroup::Dialog), 0.0);
    }

    #[test]
    fn route_scales_the_base_volume() {
        let bus = VolumeBus::new(shared(PlayerSettings::default()));
        bus.set_group(AudioGroup::Dialog, 0.5);

        let mut proxy = SharedVolume::default();
        bus.route(AudioGroup::Dialog, 0.6, &mut proxy);
        assert!((proxy.get() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn edits_are_visible_through_the_shared_handle() {
        let settings = shared(PlayerSettings::default());
        let bus = VolumeBus::new(Arc::clone(&settings));
        settings.write().music_volume = 0.2;
        assert!((bus.gain(AudioGroup::Music) - 0.2).abs() < 1e-6);
    }
}
