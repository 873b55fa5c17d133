//! Video surfaces

use dusk_state::Criteria;
use serde::{Deserialize, Serialize};

use crate::rule::Rule;

/// A video mapped onto a scene surface (a TV set, a projection). All
/// matching videos play at once, reconciled the same way as scene objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRule {
    pub id: String,
    #[serde(default)]
    pub criteria: Option<Criteria>,
    /// Video asset name.
    pub source: String,
    /// Target surface; `None` plays full-screen.
    #[serde(default)]
    pub surface: Option<String>,
    #[serde(default = "default_looping")]
    pub looping: bool,
    /// Once stopped, never comes back.
    #[serde(default)]
    pub once: bool,
}

fn default_looping() -> bool {
    true
}

impl Rule for VideoRule {
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
