//! # dusk_anim - Animation Clocks
//!
//! The per-frame clocks that move the camera and the small bits of business
//! around it: recorded camera paths, look-at blends with lens changes, idle
//! glances, the title sequence, the phone-cord follow and walking headbob.
//!
//! Every clock is advanced explicitly with a frame delta and talks to the
//! host through the `dusk_core` ports. None of them spin threads or keep
//! wall-clock time; a paused game simply stops calling `update`.

pub mod clip;
pub mod cord;
pub mod easing;
pub mod glance;
pub mod headbob;
pub mod look_at;
pub mod path;
pub mod rng;
pub mod title;

pub mod prelude {
    pub use crate::clip::{CameraClip, ClipError, ClipFrame};
    pub use crate::cord::CordFollow;
    pub use crate::easing::Easing;
    pub use crate::glance::{GlanceConfig, GlanceOffset, IdleGlance};
    pub use crate::headbob::{BobOffset, Headbob, HeadbobConfig};
    pub use crate::look_at::{LookAtBlend, LookAtFinished, LookAtSpec, ZoomSpec};
    pub use crate::path::{PathConfig, PathFinished, PathPlayer};
    pub use crate::rng::{scatter, scatter_f32, Rng};
    pub use crate::title::{TitleConfig, TitleSequence};
}

pub use prelude::*;
