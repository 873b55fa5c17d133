//! Actions a trigger zone can request
//!
//! Zones never touch the world themselves. They emit `TriggerAction`s and
//! the game layer dispatches them, so zone data stays pure description.

use dusk_anim::look_at::LookAtSpec;
use dusk_state::value::StatePatch;
use serde::{Deserialize, Serialize};

/// One thing to do when a zone fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriggerAction {
    /// Merge a patch into the game state.
    SetState { set: StatePatch },
    /// Turn the camera towards a point of interest.
    LookAt {
        #[serde(flatten)]
        spec: LookAtSpec,
    },
    /// Start a camera animation by rule id.
    CameraAnim { id: String },
    /// Queue a dialog line by rule id.
    Dialog { id: String },
    /// Fire a sound effect by rule id.
    PlaySfx { id: String },
    /// Stop a looping sound effect by rule id.
    StopSfx { id: String },
    /// Switch to a music cue by rule id. Holds until the next transition
    /// reselects the table.
    Music { id: String },
    /// Forward an opaque event to the UI layer.
    Ui { event: String },
    /// Anything the embedding application handles itself.
    Custom { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use dusk_state::value::StateValue;

    #[test]
    fn set_state_action_parses() {
        let action: TriggerAction = serde_json::from_str(
            r#"{ "type": "set_state", "set": { "current_state": "ANSWERED_PHONE" } }"#,
        )
        .unwrap();
        match action {
            TriggerAction::SetState { set } => {
                assert_eq!(
                    set.get("current_state"),
                    Some(&StateValue::Text("ANSWERED_PHONE".into()))
                );
            }
            other => panic!("parsed as {other:?}"),
        }
    }

    #[test]
    fn look_at_action_flattens_the_spec() {
        let action: TriggerAction = serde_json::from_str(
            r#"{ "type": "look_at", "target": [1, 2, 3], "duration": 0.9 }"#,
        )
        .unwrap();
        match action {
            TriggerAction::LookAt { spec } => {
                assert_eq!(spec.target, [1.0, 2.0, 3.0]);
                assert_eq!(spec.duration, 0.9);
            }
            other => panic!("parsed as {other:?}"),
        }
    }

    #[test]
    fn music_action_parses() {
        let action: TriggerAction =
            serde_json::from_str(r#"{ "type": "music", "id": "night-bed" }"#).unwrap();
        assert_eq!(action, TriggerAction::Music { id: "night-bed".into() });
    }

    #[test]
    fn custom_action_round_trips() {
        let action = TriggerAction::Custom {
            name: "open_credits".into(),
        };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"type":"custom","name":"open_credits"}"#);
    }
}
