//! Camera animation cues

use dusk_state::Criteria;
use serde::{Deserialize, Serialize};

use crate::rule::Rule;

/// A recorded camera path bound to story state. One camera animation plays
/// at a time; the scheduler holds later arrivals until the rig is free.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraRule {
    pub id: String,
    #[serde(default)]
    pub criteria: Option<Criteria>,
    #[serde(default)]
    pub priority: i32,
    /// Cutscene cameras fire once by default.
    #[serde(default = "default_once")]
    pub once: bool,
    /// Seconds to hold in the queue before the path may start.
    #[serde(default)]
    pub delay: f32,
    /// Clip asset name (see `dusk_anim::clip`).
    pub clip: String,
    /// Give player input back when the path ends.
    #[serde(default = "default_restore_input")]
    pub restore_input: bool,
}

fn default_once() -> bool {
    true
}

fn default_restore_input() -> bool {
    true
}

impl Rule for CameraRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn criteria(&self) -> Option<&Criteria> {
        self.criteria.as_ref()
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn play_once(&self) -> bool {
        self.once
    }
}
