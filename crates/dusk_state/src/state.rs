//! The flat game state record

use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::value::{StatePatch, StateValue};

/// Well-known state keys used across the orchestration crates.
pub mod keys {
    /// Numeric story-progression beat.
    pub const CURRENT_STATE: &str = "current_state";
    /// Player input suppressed (cutscenes, camera paths).
    pub const CONTROLS_LOCKED: &str = "controls_locked";
}

/// The narrative game state: a flat record of named values.
///
/// Keys appear dynamically as the story progresses; readers treat absent
/// keys as "not yet set" and the typed accessors answer accordingly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameState {
    values: BTreeMap<String, StateValue>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Boolean flag; absent or non-boolean reads as `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(StateValue::as_bool).unwrap_or(false)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(StateValue::as_number)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(StateValue::as_text)
    }

    pub fn position(&self, key: &str) -> Option<Vec3> {
        self.get(key)
            .and_then(StateValue::as_position)
            .map(Vec3::from)
    }

    /// The story-progression beat; zero before anything is set.
    pub fn beat(&self) -> i64 {
        self.number(keys::CURRENT_STATE).unwrap_or(0.0) as i64
    }

    pub fn controls_locked(&self) -> bool {
        self.flag(keys::CONTROLS_LOCKED)
    }

    /// Shallow-merge `patch` into the state. Returns the keys whose value
    /// actually changed (new keys included), in key order.
    pub fn merge(&mut self, patch: &StatePatch) -> Vec<String> {
        let mut changed = Vec::new();
        for (key, value) in patch.iter() {
            if self.values.get(key) != Some(value) {
                changed.push(key.clone());
            }
            self.values.insert(key.clone(), value.clone());
        }
        changed
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StateValue)> {
        self.values.iter()
    }
}

impl FromIterator<(String, StateValue)> for GameState {
    fn from_iter<T: IntoIterator<Item = (String, StateValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
