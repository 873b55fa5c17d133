//! Edge-triggered overlap watching
//!
//! The monitor is the one place where geometry becomes story: a player
//! capsule crossing into an armed zone emits the zone's enter actions,
//! leaving emits its exit actions, and everything downstream is driven by
//! the caller dispatching those actions.

use dusk_core::BodyTransforms;
use dusk_state::state::GameState;

use crate::actions::TriggerAction;
use crate::volume::{overlaps, PlayerCollider};
use crate::zone::{TriggerZone, ZoneDef};

/// Seconds a consumed once-zone lingers before teardown, so actions fired
/// from its enter edge finish dispatching first.
const REMOVAL_GRACE: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneEventKind {
    Enter,
    Exit,
}

/// One fired edge, carrying the actions the zone wants run.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneEvent {
    pub zone: String,
    pub kind: ZoneEventKind,
    pub actions: Vec<TriggerAction>,
}

/// Watches a set of zones against the player collider.
///
/// Zones whose criteria fail are skipped whole: their `inside` flag is
/// frozen, so a zone disarming around a standing player neither exits nor
/// re-enters when it arms again.
#[derive(Debug, Default)]
pub struct ZoneMonitor {
    zones: Vec<TriggerZone>,
    /// Consumed zones counting down to removal.
    removals: Vec<(String, f32)>,
    grace: f32,
}

impl ZoneMonitor {
    pub fn new() -> Self {
        Self {
            zones: Vec::new(),
            removals: Vec::new(),
            grace: REMOVAL_GRACE,
        }
    }

    pub fn from_defs(defs: impl IntoIterator<Item = ZoneDef>) -> Self {
        let mut monitor = Self::new();
        for def in defs {
            monitor.add(TriggerZone::new(def));
        }
        monitor
    }

    pub fn with_grace(mut self, seconds: f32) -> Self {
        self.grace = seconds;
        self
    }

    pub fn add(&mut self, zone: TriggerZone) {
        if self.zones.iter().any(|z| z.id() == zone.id()) {
            log::warn!("trigger zone '{}' already registered, ignoring", zone.id());
            return;
        }
        self.zones.push(zone);
    }

    pub fn zone(&self, id: &str) -> Option<&TriggerZone> {
        self.zones.iter().find(|z| z.id() == id)
    }

    /// Flip a zone's enabled flag. Returns false for unknown ids.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> bool {
        match self.zones.iter_mut().find(|z| z.id() == id) {
            Some(zone) => {
                zone.def.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Advance removal timers and test every live zone against the player.
    /// Enter edges on `once` zones consume the zone and queue its teardown;
    /// the zone's sensor body is removed from the world when the grace
    /// expires.
    pub fn update(
        &mut self,
        dt: f32,
        player: &PlayerCollider,
        state: &GameState,
        mut bodies: Option<&mut dyn BodyTransforms>,
    ) -> Vec<ZoneEvent> {
        self.tick_removals(dt, bodies.as_deref_mut());

        let mut events = Vec::new();
        for zone in &mut self.zones {
            if !zone.def.enabled || zone.consumed {
                continue;
            }
            let armed = zone
                .def
                .criteria
                .as_ref()
                .map(|c| c.matches(state))
                .unwrap_or(true);
            if !armed {
                continue;
            }

            let hit = overlaps(&zone.def.shape, &zone.def.pose(), player);
            if hit && !zone.inside {
                zone.inside = true;
                log::debug!("zone '{}' entered", zone.id());
                events.push(ZoneEvent {
                    zone: zone.def.id.clone(),
                    kind: ZoneEventKind::Enter,
                    actions: zone.def.enter.clone(),
                });
                if zone.def.once {
                    zone.consumed = true;
                    self.removals.push((zone.def.id.clone(), self.grace));
                }
            } else if !hit && zone.inside {
                zone.inside = false;
                log::debug!("zone '{}' exited", zone.id());
                events.push(ZoneEvent {
                    zone: zone.def.id.clone(),
                    kind: ZoneEventKind::Exit,
                    actions: zone.def.exit.clone(),
                });
            }
        }
        events
    }

    fn tick_removals(&mut self, dt: f32, mut bodies: Option<&mut (dyn BodyTransforms + '_)>) {
        let mut expired = Vec::new();
        self.removals.retain_mut(|(id, remaining)| {
            *remaining -= dt;
            if *remaining <= 0.0 {
                expired.push(std::mem::take(id));
                false
            } else {
                true
            }
        });
        for id in expired {
            if let Some(index) = self.zones.iter().position(|z| z.id() == id) {
                let zone = self.zones.remove(index);
                if let (Some(body), Some(bodies)) = (zone.body, bodies.as_deref_mut()) {
                    bodies.remove(body);
                }
                log::debug!("zone '{}' removed after once-fire", id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dusk_core::BodyId;
    use dusk_state::value::StatePatch;
    use glam::{Quat, Vec3};

    fn booth_def(once: bool) -> ZoneDef {
        serde_json::from_str(&format!(
            r#"{{
                "id": "booth",
                "shape": "sphere",
                "radius": 1.0,
                "position": [0, 1, 0],
                "once": {once},
                "enter": [{{ "type": "dialog", "id": "hello" }}],
                "exit": [{{ "type": "ui", "event": "left" }}]
            }}"#
        ))
        .unwrap()
    }

    fn inside_player() -> PlayerCollider {
        PlayerCollider::new(Vec3::new(0.0, 1.0, 0.0))
    }

    fn outside_player() -> PlayerCollider {
        PlayerCollider::new(Vec3::new(10.0, 1.0, 0.0))
    }

    #[test]
    fn enter_fires_once_per_overlap_period() {
        let mut monitor = ZoneMonitor::from_defs([booth_def(false)]);
        let state = GameState::new();

        let events = monitor.update(0.016, &inside_player(), &state, None);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, ZoneEventKind::Enter);
        assert_eq!(events[0].actions.len(), 1);

        // Still inside: no edge, no event.
        for _ in 0..10 {
            assert!(monitor.update(0.016, &inside_player(), &state, None).is_empty());
        }

        let events = monitor.update(0.016, &outside_player(), &state, None);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, ZoneEventKind::Exit);

        // Re-entering fires again.
        let events = monitor.update(0.016, &inside_player(), &state, None);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, ZoneEventKind::Enter);
    }

    #[test]
    fn criteria_freeze_the_zone_without_exiting() {
        let mut def = booth_def(false);
        def.criteria =
            Some(serde_json::from_str(r#"{ "current_state": "RINGING" }"#).unwrap());
        let mut monitor = ZoneMonitor::from_defs([def]);

        let mut state = GameState::new();
        // Unarmed: standing inside does nothing.
        assert!(monitor.update(0.016, &inside_player(), &state, None).is_empty());

        // Arming while the player is inside fires the enter edge.
        state.merge(&StatePatch::new().with("current_state", "RINGING"));
        let events = monitor.update(0.016, &inside_player(), &state, None);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, ZoneEventKind::Enter);

        // Disarming while inside does not exit...
        state.merge(&StatePatch::new().with("current_state", "DONE"));
        assert!(monitor.update(0.016, &inside_player(), &state, None).is_empty());

        // ...and re-arming does not re-enter.
        state.merge(&StatePatch::new().with("current_state", "RINGING"));
        assert!(monitor.update(0.016, &inside_player(), &state, None).is_empty());
    }

    #[test]
    fn once_zone_consumes_and_never_exits() {
        let mut monitor = ZoneMonitor::from_defs([booth_def(true)]);
        let state = GameState::new();

        let events = monitor.update(0.016, &inside_player(), &state, None);
        assert_eq!(events.len(), 1);

        // Walking out emits nothing; the zone is spent.
        assert!(monitor.update(0.016, &outside_player(), &state, None).is_empty());
        assert!(monitor.update(0.016, &inside_player(), &state, None).is_empty());
    }

    #[test]
    fn once_zone_is_torn_down_after_the_grace() {
        struct RemovalLog {
            removed: Vec<BodyId>,
        }
        impl BodyTransforms for RemovalLog {
            fn translation(&self, _body: BodyId) -> Option<Vec3> {
                None
            }
            fn rotation(&self, _body: BodyId) -> Option<Quat> {
                None
            }
            fn set_translation(&mut self, _body: BodyId, _translation: Vec3) {}
            fn set_rotation(&mut self, _body: BodyId, _rotation: Quat) {}
            fn wake(&mut self, _body: BodyId) {}
            fn remove(&mut self, body: BodyId) {
                self.removed.push(body);
            }
            fn ground_height_at(&self, _point: Vec3) -> Option<f32> {
                None
            }
        }

        let mut monitor = ZoneMonitor::new().with_grace(0.1);
        monitor.add(TriggerZone::new(booth_def(true)).with_body(BodyId::new(7)));
        let state = GameState::new();
        let mut world = RemovalLog { removed: Vec::new() };

        monitor.update(0.016, &inside_player(), &state, Some(&mut world));
        assert_eq!(monitor.len(), 1);
        assert!(world.removed.is_empty());

        // Grace expires on a later frame; zone and body go together.
        monitor.update(0.2, &outside_player(), &state, Some(&mut world));
        assert_eq!(monitor.len(), 0);
        assert_eq!(world.removed, vec![BodyId::new(7)]);
    }

    #[test]
    fn disabled_zones_are_ignored() {
        let mut monitor = ZoneMonitor::from_defs([booth_def(false)]);
        let state = GameState::new();
        assert!(monitor.set_enabled("booth", false));

        assert!(monitor.update(0.016, &inside_player(), &state, None).is_empty());

        assert!(monitor.set_enabled("booth", true));
        assert_eq!(monitor.update(0.016, &inside_player(), &state, None).len(), 1);
    }

    #[test]
    fn duplicate_zone_ids_are_rejected() {
        let mut monitor = ZoneMonitor::from_defs([booth_def(false)]);
        monitor.add(TriggerZone::new(booth_def(true)));
        assert_eq!(monitor.len(), 1);
        // The original (repeatable) definition survives.
        assert!(!monitor.zone("booth").unwrap().def.once);
    }
}
