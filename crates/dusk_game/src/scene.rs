//! Scene and video reconciliation
//!
//! The scenes and videos tables are multi-select: whatever matches the
//! current state should be up, everything else down. The director diffs
//! the matched set against what it already activated and issues only the
//! load/unload calls that changed. Play-once content is marked when it
//! deactivates, so it never comes back up.

use std::collections::HashMap;

use dusk_core::SceneOps;
use dusk_rules::{PlayedSet, RuleBook};
use dusk_state::GameState;

#[derive(Debug)]
struct ActiveScene {
    asset: String,
    once: bool,
}

#[derive(Debug)]
struct ActiveVideo {
    once: bool,
}

#[derive(Debug, Default)]
pub struct SceneDirector {
    scenes: HashMap<String, ActiveScene>,
    videos: HashMap<String, ActiveVideo>,
    scenes_played: PlayedSet,
    videos_played: PlayedSet,
}

impl SceneDirector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_scene_active(&self, id: &str) -> bool {
        self.scenes.contains_key(id)
    }

    pub fn is_video_active(&self, id: &str) -> bool {
        self.videos.contains_key(id)
    }

    /// Bring content in line with the state: load newly matched scenes,
    /// unload dropped ones, same for videos.
    pub fn reconcile(&mut self, state: &GameState, book: &RuleBook, ops: &mut dyn SceneOps) {
        let wanted = book.scenes.select_all(state, &self.scenes_played);
        for rule in &wanted {
            if self.scenes.contains_key(&rule.id) {
                continue;
            }
            log::info!("scene `{}` up ({})", rule.id, rule.asset);
            ops.load(&rule.asset);
            if let Some(animation) = &rule.animation {
                ops.play_animation(&rule.asset, animation);
            }
            self.scenes.insert(
                rule.id.clone(),
                ActiveScene {
                    asset: rule.asset.clone(),
                    once: rule.once,
                },
            );
        }
        let keep: Vec<&str> = wanted.iter().map(|r| r.id.as_str()).collect();
        let played = &mut self.scenes_played;
        self.scenes.retain(|id, scene| {
            if keep.contains(&id.as_str()) {
                return true;
            }
            log::info!("scene `{id}` down");
            ops.unload(&scene.asset);
            if scene.once {
                played.mark(id);
            }
            false
        });

        let wanted = book.videos.select_all(state, &self.videos_played);
        for rule in &wanted {
            if self.videos.contains_key(&rule.id) {
                continue;
            }
            log::info!("video `{}` playing ({})", rule.id, rule.source);
            ops.play_video(&rule.id, &rule.source, rule.surface.as_deref(), rule.looping);
            self.videos
                .insert(rule.id.clone(), ActiveVideo { once: rule.once });
        }
        let keep: Vec<&str> = wanted.iter().map(|r| r.id.as_str()).collect();
        let played = &mut self.videos_played;
        self.videos.retain(|id, video| {
            if keep.contains(&id.as_str()) {
                return true;
            }
            log::info!("video `{id}` stopped");
            ops.stop_video(id);
            if video.once {
                played.mark(id);
            }
            false
        });
    }
}
