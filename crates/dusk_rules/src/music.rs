//! Music cues

use dusk_state::Criteria;
use serde::{Deserialize, Serialize};

use crate::rule::Rule;

/// A music track tied to a stretch of the story. The music director keeps
/// whichever cue currently wins playing and crossfades on change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicRule {
    pub id: String,
    #[serde(default)]
    pub criteria: Option<Criteria>,
    #[serde(default)]
    pub priority: i32,
    pub audio: String,
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default = "default_looping")]
    pub looping: bool,
    /// Crossfade lengths in seconds.
    #[serde(default = "default_fade")]
    pub fade_in: f32,
    #[serde(default = "default_fade")]
    pub fade_out: f32,
}

fn default_volume() -> f32 {
    1.0
}

fn default_looping() -> bool {
    true
}

fn default_fade() -> f32 {
    1.0
}

impl Rule for MusicRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn criteria(&self) -> Option<&Criteria> {
        self.criteria.as_ref()
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
