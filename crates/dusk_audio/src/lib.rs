//! # dusk_audio - Audio Direction
//!
//! The orchestration side of sound: which music cue should be playing,
//! which ambient effects the current state wants alive, and how player
//! volume preferences cascade onto everything audible. Decoding and
//! playback stay behind the [`dusk_core::AudioOutput`] port.
//!
//! # Features
//!
//! - Master/music/sfx/dialog volume cascade over shared player settings
//! - `VolumeControl` routing for real handles and lightweight proxies
//! - Persisted player settings with clamping on load
//! - Music direction: single winning cue, crossfade on change
//! - SFX board: criteria-driven autoplay/stop plus manual one-shots

pub mod mixer;
pub mod music;
pub mod settings;
pub mod sfx;
pub mod volume;

pub mod prelude {
    pub use crate::mixer::{AudioGroup, SharedSettings, VolumeBus};
    pub use crate::music::MusicDirector;
    pub use crate::settings::{PlayerSettings, SettingsError};
    pub use crate::sfx::SfxBoard;
    pub use crate::volume::{HandleVolume, SharedVolume, VolumeControl};
}

pub use prelude::*;
