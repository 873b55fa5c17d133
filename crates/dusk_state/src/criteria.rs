//! Criteria matching against the game state
//!
//! Criteria are small declarative predicates authored next to the content
//! they gate. A criteria object maps state keys to criteria; every entry
//! must pass (conjunction). A bare value is equality shorthand, an object
//! holds comparison operators:
//!
//! ```json
//! { "current_state": { "$gte": 30, "$lt": 50 }, "answered_phone": true }
//! ```
//!
//! Matching fails closed: a state key that is absent, an operator that is
//! unknown, or an operator argument of the wrong shape all make the
//! criterion fail rather than guess.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::state::GameState;
use crate::value::StateValue;

/// Argument of a single operator entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpArg {
    One(StateValue),
    Many(Vec<StateValue>),
}

/// Predicate over one state key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Criterion {
    /// Bare value shorthand for `{"$eq": value}`.
    Equals(StateValue),
    /// Operator map; every entry must pass.
    Ops(BTreeMap<String, OpArg>),
}

/// Conjunction of per-key criteria. An empty criteria object matches any
/// state; whether a *missing* criteria object matches is the owning rule
/// table's policy, not decided here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Criteria(BTreeMap<String, Criterion>);

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style equality entry.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StateValue>) -> Self {
        self.0
            .insert(key.into(), Criterion::Equals(value.into()));
        self
    }

    /// Builder-style operator entry.
    pub fn with_op(
        mut self,
        key: impl Into<String>,
        op: impl Into<String>,
        arg: impl Into<StateValue>,
    ) -> Self {
        let entry = self
            .0
            .entry(key.into())
            .or_insert_with(|| Criterion::Ops(BTreeMap::new()));
        if let Criterion::Ops(ops) = entry {
            ops.insert(op.into(), OpArg::One(arg.into()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every entry passes against `state`. Keys absent from the
    /// state fail their entry regardless of operator.
    pub fn matches(&self, state: &GameState) -> bool {
        self.0.iter().all(|(key, criterion)| {
            match state.get(key) {
                Some(value) => value_matches(value, criterion),
                None => false,
            }
        })
    }
}

/// Evaluate a single criterion against a present value.
pub fn value_matches(value: &StateValue, criterion: &Criterion) -> bool {
    match criterion {
        Criterion::Equals(expected) => value == expected,
        Criterion::Ops(ops) => ops.iter().all(|(op, arg)| apply_op(value, op, arg)),
    }
}

fn apply_op(value: &StateValue, op: &str, arg: &OpArg) -> bool {
    match op {
        "$eq" => one_arg(op, arg).map_or(false, |e| value == e),
        "$ne" => one_arg(op, arg).map_or(false, |e| value != e),
        "$gt" => compare(value, op, arg, |o| o == std::cmp::Ordering::Greater),
        "$gte" => compare(value, op, arg, |o| o != std::cmp::Ordering::Less),
        "$lt" => compare(value, op, arg, |o| o == std::cmp::Ordering::Less),
        "$lte" => compare(value, op, arg, |o| o != std::cmp::Ordering::Greater),
        "$in" => many_arg(op, arg).map_or(false, |list| list.contains(value)),
        "$nin" => many_arg(op, arg).map_or(false, |list| !list.contains(value)),
        other => {
            log::warn!("criteria: unknown operator `{other}`, failing the criterion");
            false
        }
    }
}

fn one_arg<'a>(op: &str, arg: &'a OpArg) -> Option<&'a StateValue> {
    match arg {
        OpArg::One(v) => Some(v),
        OpArg::Many(_) => {
            log::warn!("criteria: `{op}` expects a single value, got a list");
            None
        }
    }
}

fn many_arg<'a>(op: &str, arg: &'a OpArg) -> Option<&'a [StateValue]> {
    match arg {
        OpArg::Many(list) => Some(list),
        OpArg::One(_) => {
            log::warn!("criteria: `{op}` expects a list");
            None
        }
    }
}

/// Ordering comparisons are defined for numbers only; anything else fails.
fn compare(
    value: &StateValue,
    op: &str,
    arg: &OpArg,
    accept: impl Fn(std::cmp::Ordering) -> bool,
) -> bool {
    let expected = match one_arg(op, arg) {
        Some(e) => e,
        None => return false,
    };
    match (value.as_number(), expected.as_number()) {
        (Some(a), Some(b)) => a.partial_cmp(&b).map_or(false, accept),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::StatePatch;

    fn state_with(patch: StatePatch) -> GameState {
        let mut state = GameState::new();
        state.merge(&patch);
        state
    }

    fn parse(json: &str) -> Criteria {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn bare_value_is_equality() {
        let state = state_with(StatePatch::new().with("current_state", 40).with("night", true));
        assert!(parse(r#"{"current_state": 40}"#).matches(&state));
        assert!(parse(r#"{"night": true}"#).matches(&state));
        assert!(!parse(r#"{"current_state": 41}"#).matches(&state));
    }

    #[test]
    fn conjunction_requires_every_entry() {
        let state = state_with(StatePatch::new().with("current_state", 40).with("night", true));
        assert!(parse(r#"{"current_state": 40, "night": true}"#).matches(&state));
        assert!(!parse(r#"{"current_state": 40, "night": false}"#).matches(&state));
    }

    #[test]
    fn range_operators_combine() {
        let state = state_with(StatePatch::new().with("current_state", 40));
        let c = parse(r#"{"current_state": {"$gte": 30, "$lt": 50}}"#);
        assert!(c.matches(&state));

        let below = state_with(StatePatch::new().with("current_state", 20));
        assert!(!c.matches(&below));
        let at_edge = state_with(StatePatch::new().with("current_state", 50));
        assert!(!c.matches(&at_edge));
    }

    #[test]
    fn in_and_nin() {
        let state = state_with(StatePatch::new().with("current_state", 40));
        assert!(parse(r#"{"current_state": {"$in": [10, 40, 90]}}"#).matches(&state));
        assert!(!parse(r#"{"current_state": {"$nin": [10, 40, 90]}}"#).matches(&state));
        assert!(parse(r#"{"current_state": {"$nin": [10, 90]}}"#).matches(&state));
    }

    #[test]
    fn absent_key_fails_even_for_ne() {
        let state = GameState::new();
        assert!(!parse(r#"{"ghost": {"$ne": 1}}"#).matches(&state));
        assert!(!parse(r#"{"ghost": {"$nin": [1]}}"#).matches(&state));
    }

    #[test]
    fn unknown_operator_fails_closed() {
        let state = state_with(StatePatch::new().with("current_state", 40));
        assert!(!parse(r#"{"current_state": {"$near": 40}}"#).matches(&state));
        // The known sibling does not rescue the entry.
        assert!(!parse(r#"{"current_state": {"$gte": 0, "$near": 40}}"#).matches(&state));
    }

    #[test]
    fn malformed_arguments_fail_closed() {
        let state = state_with(StatePatch::new().with("current_state", 40));
        assert!(!parse(r#"{"current_state": {"$in": 40}}"#).matches(&state));
        assert!(!parse(r#"{"current_state": {"$gt": [1, 2]}}"#).matches(&state));
    }

    #[test]
    fn comparisons_reject_non_numbers() {
        let state = state_with(StatePatch::new().with("label", "north"));
        assert!(!parse(r#"{"label": {"$gt": "m"}}"#).matches(&state));
    }

    #[test]
    fn equality_is_type_strict() {
        let state = state_with(StatePatch::new().with("flag", true));
        assert!(!parse(r#"{"flag": 1}"#).matches(&state));
        // A mismatched type is "not equal".
        assert!(parse(r#"{"flag": {"$ne": 1}}"#).matches(&state));
    }

    #[test]
    fn empty_criteria_matches_anything() {
        assert!(parse("{}").matches(&GameState::new()));
    }
}
