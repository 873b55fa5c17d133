//! # dusk_state - Game State and Criteria
//!
//! The single source of truth for narrative progression: a flat key/value
//! record, a store that merges partial writes and records transitions, and
//! the criteria language that rule tables and trigger zones match against.
//!
//! # Features
//!
//! - Typed state values (booleans, numbers, text, positions)
//! - Shallow-merge writes with recorded transitions
//! - Mongo-style criteria operators (`$eq` `$ne` `$gt` `$gte` `$lt` `$lte`
//!   `$in` `$nin`), conjunction over keys, fail-closed on anything unknown
//! - Named debug presets and URL-query startup overrides

pub mod criteria;
pub mod preset;
pub mod state;
pub mod store;
pub mod value;

pub mod prelude {
    pub use crate::criteria::{value_matches, Criteria, Criterion, OpArg};
    pub use crate::preset::{startup_patch, PresetBook};
    pub use crate::state::{keys, GameState};
    pub use crate::store::{StateStore, StateTransition};
    pub use crate::value::{StatePatch, StateValue};
}

pub use prelude::*;
