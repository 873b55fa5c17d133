//! Volume routing targets
//!
//! The cascade only ever needs one verb from the thing it is adjusting.
//! Real playing handles and stand-in proxies (the breathing loop, the
//! dialog bus) implement the same trait so they route identically.

use std::sync::Arc;

use dusk_core::{AudioHandle, AudioOutput};
use parking_lot::RwLock;

/// Anything whose loudness the cascade can set.
pub trait VolumeControl {
    /// Linear gain in `[0, 1]`.
    fn set_volume(&mut self, volume: f32);
}

/// Routes to a live handle on the audio port. Built on the stack at the
/// call site; holds the port only for the duration of the adjustment.
pub struct HandleVolume<'a> {
    audio: &'a mut dyn AudioOutput,
    handle: AudioHandle,
}

impl<'a> HandleVolume<'a> {
    pub fn new(audio: &'a mut dyn AudioOutput, handle: AudioHandle) -> Self {
        Self { audio, handle }
    }
}

impl VolumeControl for HandleVolume<'_> {
    fn set_volume(&mut self, volume: f32) {
        self.audio.set_volume(self.handle, volume);
    }
}

/// A routed volume some other subsystem reads later. Cloning shares the
/// underlying cell.
#[derive(Debug, Clone)]
pub struct SharedVolume(Arc<RwLock<f32>>);

impl SharedVolume {
    pub fn new(initial: f32) -> Self {
        Self(Arc::new(RwLock::new(initial)))
    }

    pub fn get(&self) -> f32 {
        *self.0.read()
    }
}

impl Default for SharedVolume {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl VolumeControl for SharedVolume {
    fn set_volume(&mut self, volume: f32) {
        *self.0.write() = volume;
    }
}
