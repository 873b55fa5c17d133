//! Scene objects

use dusk_state::Criteria;
use serde::{Deserialize, Serialize};

use crate::rule::Rule;

/// A piece of scene content active over a stretch of the story. All
/// matching scene rules are active at once; the scene director loads the
/// newly active set, unloads the rest, and starts entry animations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneRule {
    pub id: String,
    /// Absent criteria means the object is always present.
    #[serde(default)]
    pub criteria: Option<Criteria>,
    /// Scene asset name.
    pub asset: String,
    /// Animation to start when the object becomes active.
    #[serde(default)]
    pub animation: Option<String>,
    /// Once deactivated, never comes back.
    #[serde(default)]
    pub once: bool,
}

impl Rule for SceneRule {
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
