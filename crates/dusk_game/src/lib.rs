//! # dusk_game - Session Orchestration
//!
//! The umbrella over the other crates: a [`GameDirector`] that re-evaluates
//! the rule tables on every state transition and runs the deferred-action
//! queue, a [`DialogManager`] for spoken lines and captions, a
//! [`SceneDirector`] reconciling scene and video content, a [`CharacterRig`]
//! for first-person look, and a [`Session`] that steps them in a fixed order
//! once per frame.
//!
//! # Features
//!
//! - State cascade in a deterministic order: music, dialog, SFX, scenes,
//!   character enable state
//! - Delayed dialog and camera cues through the scheduling queue, with
//!   stale entries cancelled when the state moves on
//! - Trigger-zone actions dispatched into the same pipeline the rule
//!   tables feed
//! - Look-at requests with lens settings honoring the player's
//!   depth-of-field preferences

pub mod character;
pub mod dialog;
pub mod director;
pub mod scene;
pub mod session;

pub mod prelude {
    pub use crate::character::{CharacterRig, RigConfig};
    pub use crate::dialog::DialogManager;
    pub use crate::director::{GameDirector, PendingAction};
    pub use crate::scene::SceneDirector;
    pub use crate::session::{Frame, Ports, Session};
}

pub use prelude::*;
