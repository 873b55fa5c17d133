//! Persisted player preferences

use dusk_core::KeyValueStore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage key the settings live under.
pub const SETTINGS_KEY: &str = "dusk.settings";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("malformed settings payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Player-adjustable preferences, persisted between sessions.
///
/// Fields absent from the stored payload fall back to defaults, so adding
/// a preference never invalidates old saves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub master_volume: f32,
    pub music_volume: f32,
    pub sfx_volume: f32,
    pub dialog_volume: f32,
    pub muted: bool,
    /// Depth-of-field pass on or off.
    pub dof_enabled: bool,
    /// Multiplier on authored depth-of-field apertures.
    pub dof_aperture_scale: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            music_volume: 1.0,
            sfx_volume: 1.0,
            dialog_volume: 1.0,
            muted: false,
            dof_enabled: true,
            dof_aperture_scale: 1.0,
        }
    }
}

impl PlayerSettings {
    /// Pull everything back into range. Stored payloads are user data and
    /// may carry anything.
    pub fn clamped(mut self) -> Self {
        self.master_volume = clamp_unit(self.master_volume);
        self.music_volume = clamp_unit(self.music_volume);
        self.sfx_volume = clamp_unit(self.sfx_volume);
        self.dialog_volume = clamp_unit(self.dialog_volume);
        self.dof_aperture_scale = if self.dof_aperture_scale.is_finite() {
            self.dof_aperture_scale.clamp(0.0, 4.0)
        } else {
            1.0
        };
        self
    }

    /// Read from the store. Absent key is a fresh profile, not an error.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, SettingsError> {
        match store.get(SETTINGS_KEY) {
            None => Ok(Self::default()),
            Some(raw) => Ok(serde_json::from_str::<Self>(&raw)?.clamped()),
        }
    }

    /// Like [`PlayerSettings::load`], but a corrupt payload logs and
    /// yields defaults instead of failing the session.
    pub fn load_or_default(store: &dyn KeyValueStore) -> Self {
        match Self::load(store) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("discarding stored settings: {err}");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), SettingsError> {
        let raw = serde_json::to_string(self)?;
        store.set(SETTINGS_KEY, &raw);
        Ok(())
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore(HashMap<String, String>);

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }
        fn set(&mut self, key: &str, value: &str) {
            self.0.insert(key.to_string(), value.to_string());
        }
    }

    #[test]
    fn fresh_store_yields_defaults() {
        let store = MemoryStore::default();
        let settings = PlayerSettings::load(&store).unwrap();
        assert_eq!(settings, PlayerSettings::default());
    }

    #[test]
    fn settings_round_trip_through_the_store() {
        let mut store = MemoryStore::default();
        let mut settings = PlayerSettings::default();
        settings.music_volume = 0.4;
        settings.muted = true;
        settings.save(&mut store).unwrap();

        let loaded = PlayerSettings::load(&store).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn out_of_range_values_are_clamped_on_load() {
        let mut store = MemoryStore::default();
        store.set(
            SETTINGS_KEY,
            r#"{ "master_volume": 7.5, "sfx_volume": -1.0, "dof_aperture_scale": 99.0 }"#,
        );
        let loaded = PlayerSettings::load(&store).unwrap();
        assert_eq!(loaded.master_volume, 1.0);
        assert_eq!(loaded.sfx_volume, 0.0);
        assert_eq!(loaded.dof_aperture_scale, 4.0);
        // Untouched fields keep their defaults.
        assert_eq!(loaded.music_volume, 1.0);
    }

    #[test]
    fn corrupt_payload_falls_back_to_defaults() {
        let mut store = MemoryStore::default();
        store.set(SETTINGS_KEY, "{not json");
        assert!(PlayerSettings::load(&store).is_err());
        assert_eq!(
            PlayerSettings::load_or_default(&store),
            PlayerSettings::default()
        );
    }
}
