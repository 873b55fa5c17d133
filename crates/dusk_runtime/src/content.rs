//! Demo content loading
//!
//! The phone-booth content ships embedded in the binary so the demo runs
//! from a bare checkout; `--content <dir>` swaps in a directory holding
//! the same files for authoring against a live build.

use std::fs;
use std::path::Path;

use dusk_anim::{CameraClip, ClipError};
use dusk_rules::{RuleBook, RulesError};
use dusk_state::PresetBook;
use dusk_triggers::ZoneDef;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error("failed to parse {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Clip(#[from] ClipError),
}

/// Everything the session needs, loaded and validated.
pub struct GameContent {
    pub book: RuleBook,
    pub zones: Vec<ZoneDef>,
    pub presets: PresetBook,
    pub clips: Vec<CameraClip>,
}

struct Sources<'a> {
    dialog: &'a str,
    music: &'a str,
    cameras: &'a str,
    sfx: &'a str,
    scenes: &'a str,
    videos: &'a str,
    zones: &'a str,
    presets: &'a str,
    /// Clip fallback name plus its JSON document.
    clips: &'a [(&'a str, &'a str)],
}

const EMBEDDED: Sources<'static> = Sources {
    dialog: include_str!("../content/dialog.json"),
    music: include_str!("../content/music.json"),
    cameras: include_str!("../content/cameras.json"),
    sfx: include_str!("../content/sfx.json"),
    scenes: include_str!("../content/scenes.json"),
    videos: include_str!("../content/videos.json"),
    zones: include_str!("../content/zones.json"),
    presets: include_str!("../content/presets.json"),
    clips: &[(
        "clips/phone_zoom",
        include_str!("../content/clips/phone_zoom.json"),
    )],
};

impl GameContent {
    /// The content compiled into the binary.
    pub fn embedded() -> Result<Self, ContentError> {
        Self::from_sources(&EMBEDDED)
    }

    /// Load `dialog.json`, `music.json`, ... and `clips/*.json` from a
    /// content directory laid out like `crates/dusk_runtime/content/`.
    pub fn from_dir(dir: &Path) -> Result<Self, ContentError> {
        let dialog = read(dir, "dialog.json")?;
        let music = read(dir, "music.json")?;
        let cameras = read(dir, "cameras.json")?;
        let sfx = read(dir, "sfx.json")?;
        let scenes = read(dir, "scenes.json")?;
        let videos = read(dir, "videos.json")?;
        let zones = read(dir, "zones.json")?;
        let presets = read(dir, "presets.json")?;

        let mut clips = Vec::new();
        let clips_dir = dir.join("clips");
        if clips_dir.is_dir() {
            let entries = fs::read_dir(&clips_dir).map_err(|source| ContentError::Io {
                name: clips_dir.display().to_string(),
                source,
            })?;
            for entry in entries {
                let entry = entry.map_err(|source| ContentError::Io {
                    name: clips_dir.display().to_string(),
                    source,
                })?;
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("json") {
                    continue;
                }
                let stem = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("unnamed")
                    .to_string();
                let json = fs::read_to_string(&path).map_err(|source| ContentError::Io {
                    name: path.display().to_string(),
                    source,
                })?;
                clips.push((format!("clips/{stem}"), json));
            }
        }
        let clip_refs: Vec<(&str, &str)> = clips
            .iter()
            .map(|(name, json)| (name.as_str(), json.as_str()))
            .collect();

        Self::from_sources(&Sources {
            dialog: &dialog,
            music: &music,
            cameras: &cameras,
            sfx: &sfx,
            scenes: &scenes,
            videos: &videos,
            zones: &zones,
            presets: &presets,
            clips: &clip_refs,
        })
    }

    fn from_sources(sources: &Sources<'_>) -> Result<Self, ContentError> {
        let book = RuleBook::from_json(
            sources.dialog,
            sources.music,
            sources.cameras,
            sources.sfx,
            sources.scenes,
            sources.videos,
        )?;
        let zones: Vec<ZoneDef> =
            serde_json::from_str(sources.zones).map_err(|source| ContentError::Parse {
                name: "zones.json".to_string(),
                source,
            })?;
        let presets =
            PresetBook::from_json(sources.presets).map_err(|source| ContentError::Parse {
                name: "presets.json".to_string(),
                source,
            })?;
        let mut clips = Vec::with_capacity(sources.clips.len());
        for (name, json) in sources.clips {
            clips.push(CameraClip::from_json(name, json)?);
        }
        log::info!(
            "content: {} zones, {} presets, {} clips",
            zones.len(),
            presets.names().count(),
            clips.len()
        );
        Ok(Self {
            book,
            zones,
            presets,
            clips,
        })
    }
}

fn read(dir: &Path, name: &str) -> Result<String, ContentError> {
    fs::read_to_string(dir.join(name)).map_err(|source| ContentError::Io {
        name: name.to_string(),
        source,
    })
}
