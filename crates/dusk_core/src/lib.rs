//! # dusk_core - Dusk Engine Seams
//!
//! Shared identifiers and the collaborator traits ("ports") through which
//! the orchestration crates reach the host engine. Dusk decides *what*
//! happens each frame; rendering, physics stepping, audio decoding and the
//! page UI happen on the other side of these traits.
//!
//! # Features
//!
//! - Handle newtypes for host-owned resources (bodies, playing sounds)
//! - Camera, audio, physics-transform, uniform, UI and scene ports
//! - No backend code: hosts and tests supply the implementations

pub mod id;
pub mod ports;

pub mod prelude {
    pub use crate::id::{AudioHandle, BodyId};
    pub use crate::ports::{
        AudioOutput, BodyTransforms, CameraRig, KeyValueStore, PlayOpts, SceneOps,
        ShaderUniforms, UiSink,
    };
}

pub use prelude::*;
