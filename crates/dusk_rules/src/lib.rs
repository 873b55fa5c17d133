//! # dusk_rules - Criteria-Matched Rule Tables
//!
//! Narrative content is authored as declarative rules: each rule names the
//! state it wants (criteria), what it plays (domain payload), and how it
//! competes (priority, play-once). Tables resolve the active rule set for
//! the current game state; what to *do* with a selected rule belongs to the
//! game layer.
//!
//! # Features
//!
//! - `Rule` trait plus per-domain record types (dialog, music, scene
//!   objects, camera animations, SFX, videos)
//! - Explicit per-table policy for rules without criteria
//! - Explicit single/multi selection cardinality per table
//! - Priority-descending selection with stable declaration-order ties
//! - JSON loading with duplicate-id validation

pub mod book;
pub mod camera;
pub mod dialog;
pub mod music;
pub mod rule;
pub mod scene;
pub mod sfx;
pub mod table;
pub mod video;

pub mod prelude {
    pub use crate::book::{RuleBook, RulesError};
    pub use crate::camera::CameraRule;
    pub use crate::dialog::{Caption, DialogRule};
    pub use crate::music::MusicRule;
    pub use crate::rule::{Cardinality, MissingCriteria, PlayedSet, Rule};
    pub use crate::scene::SceneRule;
    pub use crate::sfx::SfxRule;
    pub use crate::table::RuleTable;
    pub use crate::video::VideoRule;
}

pub use prelude::*;
