//! The rule contract and table policies

use std::collections::HashSet;

use dusk_state::Criteria;

/// How a table treats rules that carry no criteria object at all.
///
/// This is distinct from an *empty* criteria object, which always matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingCriteria {
    /// The rule matches any state (ambient scene content).
    AlwaysActive,
    /// The rule never matches by evaluation; it plays only when requested
    /// by id (trigger actions, scripted calls).
    NeverAutoFires,
    /// Every rule in the table is expected to carry criteria. One without
    /// any never matches evaluation and is reported at load.
    ActiveWhenCriteriaMatch,
}

/// How many rules a table hands out per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// One winner (dialog, music, camera animations).
    Single,
    /// The whole matching set (scene objects, SFX, videos).
    Multi,
}

/// Common contract of every domain rule record.
pub trait Rule {
    fn id(&self) -> &str;

    /// `None` defers to the table's [`MissingCriteria`] policy.
    fn criteria(&self) -> Option<&Criteria>;

    /// Higher wins; declaration order breaks ties.
    fn priority(&self) -> i32 {
        0
    }

    /// Excluded from evaluation once it has played.
    fn play_once(&self) -> bool {
        false
    }
}

/// Ids of play-once rules that have already fired. Each domain keeps its
/// own set; ids are only unique within a table.
#[derive(Debug, Clone, Default)]
pub struct PlayedSet(HashSet<String>);

impl PlayedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the id was already marked.
    pub fn mark(&mut self, id: &str) -> bool {
        self.0.insert(id.to_string())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
