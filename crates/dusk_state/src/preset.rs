//! Debug presets and URL-query startup overrides
//!
//! During development the game is jumped to mid-story checkpoints by
//! loading the page with `?preset=<name>` or with individual
//! `state.<key>=<value>` query parameters. Presets are authored as named
//! patches in a JSON document:
//!
//! ```json
//! { "phonebooth": { "current_state": 40, "night": true } }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use url::Url;

use crate::value::{StatePatch, StateValue};

/// Named startup patches.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct PresetBook {
    presets: BTreeMap<String, StatePatch>,
}

impl PresetBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn get(&self, name: &str) -> Option<&StatePatch> {
        self.presets.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }
}

/// Build the startup patch encoded in a page URL.
///
/// `preset=<name>` applies a preset from `presets`; `state.<key>=<value>`
/// entries are merged on top in query order, values parsed as JSON scalars
/// with plain-text fallback. Unknown presets and unparsable URLs log a
/// warning and contribute nothing.
pub fn startup_patch(page_url: &str, presets: &PresetBook) -> StatePatch {
    let url = match Url::parse(page_url) {
        Ok(url) => url,
        Err(err) => {
            log::warn!("preset: unparsable page url ({err})");
            return StatePatch::new();
        }
    };

    let mut patch = StatePatch::new();
    for (key, value) in url.query_pairs() {
        if key == "preset" {
            match presets.get(&value) {
                Some(preset) => patch.merge(preset.clone()),
                None => log::warn!("preset: no preset named `{value}`"),
            }
        } else if let Some(state_key) = key.strip_prefix("state.") {
            patch.insert(state_key, parse_scalar(&value));
        }
    }
    patch
}

/// `true`/`false`/numbers parse as themselves; anything else is text.
fn parse_scalar(raw: &str) -> StateValue {
    serde_json::from_str::<StateValue>(raw).unwrap_or_else(|_| StateValue::Text(raw.to_string()))
}
