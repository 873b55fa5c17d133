//! The rule book: every table, loaded and policy-checked

use thiserror::Error;

use crate::camera::CameraRule;
use crate::dialog::DialogRule;
use crate::music::MusicRule;
use crate::rule::MissingCriteria;
use crate::scene::SceneRule;
use crate::sfx::SfxRule;
use crate::table::RuleTable;
use crate::video::VideoRule;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("failed to parse {table} rules: {source}")]
    Parse {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// All rule tables with their selection policies fixed by construction:
///
/// | table   | cardinality | rules without criteria |
/// |---------|-------------|------------------------|
/// | dialog  | single      | never auto-fire        |
/// | music   | single      | warned at load         |
/// | cameras | single      | never auto-fire        |
/// | sfx     | multi       | never auto-fire        |
/// | scenes  | multi       | always active          |
/// | videos  | multi       | always active          |
///
/// Music is purely criteria-driven: a cue with no criteria would be
/// stomped at the next transition, so it is flagged as a content bug.
#[derive(Debug)]
pub struct RuleBook {
    pub dialog: RuleTable<DialogRule>,
    pub music: RuleTable<MusicRule>,
    pub cameras: RuleTable<CameraRule>,
    pub sfx: RuleTable<SfxRule>,
    pub scenes: RuleTable<SceneRule>,
    pub videos: RuleTable<VideoRule>,
}

impl RuleBook {
    pub fn empty() -> Self {
        Self::from_parts(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
    }

    pub fn from_parts(
        dialog: Vec<DialogRule>,
        music: Vec<MusicRule>,
        cameras: Vec<CameraRule>,
        sfx: Vec<SfxRule>,
        scenes: Vec<SceneRule>,
        videos: Vec<VideoRule>,
    ) -> Self {
        Self {
            dialog: RuleTable::single("dialog", MissingCriteria::NeverAutoFires, dialog),
            music: RuleTable::single("music", MissingCriteria::ActiveWhenCriteriaMatch, music),
            cameras: RuleTable::single("cameras", MissingCriteria::NeverAutoFires, cameras),
            sfx: RuleTable::multi("sfx", MissingCriteria::NeverAutoFires, sfx),
            scenes: RuleTable::multi("scenes", MissingCriteria::AlwaysActive, scenes),
            videos: RuleTable::multi("videos", MissingCriteria::AlwaysActive, videos),
        }
    }

    /// Load every table from its JSON document (an array of rules each).
    pub fn from_json(
        dialog: &str,
        music: &str,
        cameras: &str,
        sfx: &str,
        scenes: &str,
        videos: &str,
    ) -> Result<Self, RulesError> {
        Ok(Self::from_parts(
            parse("dialog", dialog)?,
            parse("music", music)?,
            parse("cameras", cameras)?,
            parse("sfx", sfx)?,
            parse("scenes", scenes)?,
            parse("videos", videos)?,
        ))
    }
}

fn parse<R: serde::de::DeserializeOwned>(
    table: &'static str,
    json: &str,
) -> Result<Vec<R>, RulesError> {
    serde_json::from_str(json).map_err(|source| RulesError::Parse { table, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::PlayedSet;
    use dusk_state::{GameState, StatePatch};

    #[test]
    fn loads_all_tables() {
        let book = RuleBook::from_json(
            r#"[{ "id": "hello", "criteria": { "current_state": 1 }, "audio": "vo/hello" }]"#,
            r#"[{ "id": "bed", "criteria": { "current_state": { "$gte": 0 } }, "audio": "music/bed" }]"#,
            r#"[]"#,
            r#"[]"#,
            r#"[{ "id": "street", "asset": "scenes/street" }]"#,
            r#"[]"#,
        )
        .unwrap();

        let mut state = GameState::new();
        state.merge(&StatePatch::new().with("current_state", 1));
        let played = PlayedSet::new();

        assert_eq!(book.dialog.select(&state, &played).unwrap().id, "hello");
        assert_eq!(book.music.select(&state, &played).unwrap().id, "bed");
        assert_eq!(book.scenes.select_all(&state, &played).len(), 1);
        assert!(book.cameras.select(&state, &played).is_none());
    }

    #[test]
    fn parse_errors_name_the_table() {
        let err = RuleBook::from_json("[", "[]", "[]", "[]", "[]", "[]").unwrap_err();
        assert!(err.to_string().contains("dialog"));
    }
}
