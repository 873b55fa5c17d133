//! Trigger zone definitions and runtime instances

use dusk_core::BodyId;
use dusk_state::criteria::Criteria;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::actions::TriggerAction;
use crate::volume::{VolumePose, VolumeShape};

/// An authored zone, as it appears in the zones table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneDef {
    pub id: String,
    #[serde(flatten)]
    pub shape: VolumeShape,
    pub position: [f32; 3],
    /// Radians around +Y.
    #[serde(default)]
    pub yaw: f32,
    /// Gate; a zone with no criteria is always armed.
    #[serde(default)]
    pub criteria: Option<Criteria>,
    /// Fire the enter actions once, then retire the zone.
    #[serde(default)]
    pub once: bool,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub enter: Vec<TriggerAction>,
    #[serde(default)]
    pub exit: Vec<TriggerAction>,
}

fn default_enabled() -> bool {
    true
}

impl ZoneDef {
    pub fn pose(&self) -> VolumePose {
        VolumePose::new(Vec3::from(self.position), self.yaw)
    }
}

/// A zone being watched. `inside` survives frames where the criteria fail,
/// so re-arming a zone around a standing player does not re-fire it.
#[derive(Debug, Clone)]
pub struct TriggerZone {
    pub def: ZoneDef,
    /// Physics sensor backing this zone, when one was spawned for it.
    pub body: Option<BodyId>,
    pub inside: bool,
    pub consumed: bool,
}

impl TriggerZone {
    pub fn new(def: ZoneDef) -> Self {
        Self {
            def,
            body: None,
            inside: false,
            consumed: false,
        }
    }

    pub fn with_body(mut self, body: BodyId) -> Self {
        self.body = Some(body);
        self
    }

    pub fn id(&self) -> &str {
        &self.def.id
    }
}
