//! # dusk_triggers - Trigger Zones
//!
//! Authored world volumes that react to the player walking in and out.
//! Overlap is tested once per frame against the player capsule; enter and
//! exit fire on edges only, criteria gate which zones are armed at all,
//! and one-shot zones are consumed on entry and torn down shortly after.
//!
//! # Features
//!
//! - Box, sphere and capsule volumes with yaw-rotated poses
//! - Criteria-gated arming against the game state
//! - Edge-triggered enter/exit with authored action lists
//! - One-shot zones with grace-delayed physics teardown

pub mod actions;
pub mod monitor;
pub mod volume;
pub mod zone;

pub mod prelude {
    pub use crate::actions::TriggerAction;
    pub use crate::monitor::{ZoneEvent, ZoneEventKind, ZoneMonitor};
    pub use crate::volume::{PlayerCollider, VolumePose, VolumeShape};
    pub use crate::zone::{TriggerZone, ZoneDef};
}

pub use prelude::*;
