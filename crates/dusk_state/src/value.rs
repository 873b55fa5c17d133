//! State values and partial writes

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single value in the game state record.
///
/// Values deserialize from plain JSON scalars; a three-number array is a
/// world position. Numbers are always `f64`, which covers the story
/// progression enums and counters this layer deals in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Position([f32; 3]),
}

impl StateValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StateValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            StateValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StateValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_position(&self) -> Option<[f32; 3]> {
        match self {
            StateValue::Position(p) => Some(*p),
            _ => None,
        }
    }
}

impl From<bool> for StateValue {
    fn from(b: bool) -> Self {
        StateValue::Bool(b)
    }
}

impl From<f64> for StateValue {
    fn from(n: f64) -> Self {
        StateValue::Number(n)
    }
}

impl From<f32> for StateValue {
    fn from(n: f32) -> Self {
        StateValue::Number(n as f64)
    }
}

impl From<i64> for StateValue {
    fn from(n: i64) -> Self {
        StateValue::Number(n as f64)
    }
}

impl From<i32> for StateValue {
    fn from(n: i32) -> Self {
        StateValue::Number(n as f64)
    }
}

impl From<u32> for StateValue {
    fn from(n: u32) -> Self {
        StateValue::Number(n as f64)
    }
}

impl From<&str> for StateValue {
    fn from(s: &str) -> Self {
        StateValue::Text(s.to_string())
    }
}

impl From<String> for StateValue {
    fn from(s: String) -> Self {
        StateValue::Text(s)
    }
}

impl From<[f32; 3]> for StateValue {
    fn from(p: [f32; 3]) -> Self {
        StateValue::Position(p)
    }
}

/// A partial write against the game state: keys present in the patch
/// replace (or add) the same keys in the state, and nothing else changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatePatch(BTreeMap<String, StateValue>);

impl StatePatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StateValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StateValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StateValue)> {
        self.0.iter()
    }

    /// Fold `other` into this patch; later writes win on key collisions.
    pub fn merge(&mut self, other: StatePatch) {
        self.0.extend(other.0);
    }
}

impl FromIterator<(String, StateValue)> for StatePatch {
    fn from_iter<T: IntoIterator<Item = (String, StateValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
