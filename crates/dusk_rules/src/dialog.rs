//! Dialog lines

use dusk_state::Criteria;
use serde::{Deserialize, Serialize};

use crate::rule::Rule;

/// One timed subtitle within a dialog line. The caption stays up until the
/// next caption starts or the line ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    pub text: String,
    /// Seconds from the start of the line.
    #[serde(default)]
    pub at: f32,
}

/// A voice line with subtitles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogRule {
    pub id: String,
    #[serde(default)]
    pub criteria: Option<Criteria>,
    #[serde(default)]
    pub priority: i32,
    /// Most lines are heard exactly once.
    #[serde(default = "default_once")]
    pub once: bool,
    /// Seconds to hold the line in the queue before it may start.
    #[serde(default)]
    pub delay: f32,
    /// Audio asset name.
    pub audio: String,
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default)]
    pub captions: Vec<Caption>,
    /// Playback length in seconds. When absent the line runs until the
    /// audio backend reports the source finished.
    #[serde(default)]
    pub duration: Option<f32>,
}

fn default_once() -> bool {
    true
}

fn default_volume() -> f32 {
    1.0
}

impl Rule for DialogRule {
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
