//! Rule tables and selection

use dusk_state::GameState;

use crate::rule::{Cardinality, MissingCriteria, PlayedSet, Rule};

/// An ordered collection of rules with a fixed selection policy.
///
/// Declaration order is meaningful: it breaks priority ties and is the
/// iteration order for multi-selection, so authored files behave the way
/// they read.
#[derive(Debug)]
pub struct RuleTable<R: Rule> {
    name: &'static str,
    missing: MissingCriteria,
    cardinality: Cardinality,
    rules: Vec<R>,
}

impl<R: Rule> RuleTable<R> {
    /// A table whose evaluation yields at most one rule.
    pub fn single(name: &'static str, missing: MissingCriteria, rules: Vec<R>) -> Self {
        Self::build(name, missing, Cardinality::Single, rules)
    }

    /// A table whose evaluation yields every matching rule.
    pub fn multi(name: &'static str, missing: MissingCriteria, rules: Vec<R>) -> Self {
        Self::build(name, missing, Cardinality::Multi, rules)
    }

    fn build(
        name: &'static str,
        missing: MissingCriteria,
        cardinality: Cardinality,
        rules: Vec<R>,
    ) -> Self {
        let mut seen = std::collections::HashSet::new();
        let mut deduped = Vec::with_capacity(rules.len());
        for rule in rules {
            if !seen.insert(rule.id().to_string()) {
                log::warn!("{name}: duplicate rule id `{}`, keeping the first", rule.id());
                continue;
            }
            if missing == MissingCriteria::ActiveWhenCriteriaMatch && rule.criteria().is_none() {
                log::warn!(
                    "{name}: rule `{}` has no criteria and never matches evaluation",
                    rule.id()
                );
            }
            deduped.push(rule);
        }
        Self {
            name,
            missing,
            cardinality,
            rules: deduped,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.rules.iter()
    }

    /// Direct lookup for manual (trigger-driven) playback.
    pub fn by_id(&self, id: &str) -> Option<&R> {
        self.rules.iter().find(|r| r.id() == id)
    }

    /// Whether a rule competes for the given state.
    fn eligible(&self, rule: &R, state: &GameState, played: &PlayedSet) -> bool {
        if rule.play_once() && played.contains(rule.id()) {
            return false;
        }
        match rule.criteria() {
            Some(criteria) => criteria.matches(state),
            None => self.missing == MissingCriteria::AlwaysActive,
        }
    }

    /// The single best matching rule: highest priority, earliest declared
    /// on ties. Logs a warning when used against a multi table.
    pub fn select<'a>(&'a self, state: &GameState, played: &PlayedSet) -> Option<&'a R> {
        if self.cardinality == Cardinality::Multi {
            log::warn!("{}: single-select on a multi-select table", self.name);
        }
        let mut best: Option<&R> = None;
        for rule in &self.rules {
            if !self.eligible(rule, state, played) {
                continue;
            }
            if best.map_or(true, |b| rule.priority() > b.priority()) {
                best = Some(rule);
            }
        }
        best
    }

    /// Every matching rule in declaration order. Logs a warning when used
    /// against a single table.
    pub fn select_all<'a>(&'a self, state: &GameState, played: &PlayedSet) -> Vec<&'a R> {
        if self.cardinality == Cardinality::Single {
            log::warn!("{}: multi-select on a single-select table", self.name);
        }
        self.rules
            .iter()
            .filter(|r| self.eligible(r, state, played))
            .collect()
    }
}
