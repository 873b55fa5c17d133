//! Sound effects

use dusk_state::Criteria;
use serde::{Deserialize, Serialize};

use crate::rule::Rule;

/// A sound effect. Rules with criteria start when their criteria begin to
/// match and stop when they stop matching; rules without criteria are
/// one-shots played by id from trigger actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SfxRule {
    pub id: String,
    #[serde(default)]
    pub criteria: Option<Criteria>,
    pub audio: String,
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default)]
    pub looping: bool,
    /// Never starts a second time.
    #[serde(default)]
    pub once: bool,
}

fn default_volume() -> f32 {
    1.0
}

impl Rule for SfxRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn criteria(&self) -> Option<&Criteria> {
        self.criteria.as_ref()
    }

    fn play_once(&self) -> bool {
        self.once
    }
}
