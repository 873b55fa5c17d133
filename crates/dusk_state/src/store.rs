//! State store with recorded transitions

use crate::state::GameState;
use crate::value::StatePatch;

/// One completed write: the state before, the state after, and the patch
/// that was merged. Consumers re-evaluate against `after`; `before` exists
/// for edge detection and logging.
#[derive(Debug, Clone)]
pub struct StateTransition {
    pub before: GameState,
    pub after: GameState,
    pub patch: StatePatch,
    /// Keys whose value actually changed, in key order.
    pub changed: Vec<String>,
}

/// Owns the game state and records every write as a transition.
///
/// Writes never notify anybody directly. The game director drains the
/// recorded transitions once per write and runs its cascade in a fixed
/// order, which keeps re-entrant writes (a cascade step setting more state)
/// iterative instead of recursive.
#[derive(Debug, Default)]
pub struct StateStore {
    state: GameState,
    pending: Vec<StateTransition>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial(state: GameState) -> Self {
        Self {
            state,
            pending: Vec::new(),
        }
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy for consumers that outlive the borrow.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Shallow-merge `patch` and record the transition. Re-writing a key
    /// to its current value still records a transition; downstream
    /// re-evaluation is idempotent, so redundant cascades are harmless.
    /// Empty patches are dropped.
    pub fn set(&mut self, patch: StatePatch) {
        if patch.is_empty() {
            log::debug!("state: ignoring empty patch");
            return;
        }
        let before = self.state.clone();
        let changed = self.state.merge(&patch);
        if changed.is_empty() {
            log::debug!("state: patch changed nothing ({} keys rewritten)", patch.len());
        } else {
            log::info!("state: changed {}", changed.join(", "));
        }
        self.pending.push(StateTransition {
            before,
            after: self.state.clone(),
            patch,
            changed,
        });
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Take all recorded transitions, oldest first.
    pub fn drain_transitions(&mut self) -> Vec<StateTransition> {
        std::mem::take(&mut self.pending)
    }
}
