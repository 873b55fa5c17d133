//! Phone cord follow
//!
//! The handset cord is a chain of simulated segment bodies plus an anchor
//! body at the handset end. The simulation stays host-side; this clock
//! only eases the anchor to the hand when the handset is picked up, pins
//! it there while held, and keeps the chain awake so it never freezes
//! mid-drape. The renderer skins a tube along [`CordFollow::polyline`].

use dusk_core::{BodyId, BodyTransforms};
use glam::Vec3;

use crate::easing::Easing;

#[derive(Debug, Clone, Copy)]
struct Ease {
    from: Vec3,
    to: Vec3,
    duration: f32,
    elapsed: f32,
}

/// Drives the anchor end of one cord.
#[derive(Debug)]
pub struct CordFollow {
    anchor: BodyId,
    segments: Vec<BodyId>,
    hold: Option<Vec3>,
    ease: Option<Ease>,
}

impl CordFollow {
    pub fn new(anchor: BodyId, segments: Vec<BodyId>) -> Self {
        Self {
            anchor,
            segments,
            hold: None,
            ease: None,
        }
    }

    /// Anchor is being driven (easing in or pinned).
    pub fn is_attached(&self) -> bool {
        self.hold.is_some() || self.ease.is_some()
    }

    /// Ease the anchor from wherever it is to `target`, then pin it.
    pub fn attach(&mut self, target: Vec3, duration: f32, bodies: &dyn BodyTransforms) {
        let from = bodies.translation(self.anchor).unwrap_or(target);
        self.hold = None;
        if duration <= 0.0 {
            self.hold = Some(target);
            self.ease = None;
            return;
        }
        self.ease = Some(Ease {
            from,
            to: target,
            duration,
            elapsed: 0.0,
        });
    }

    /// Retarget while attached (the handset moves with the hand). Ignored
    /// when the cord is free.
    pub fn move_to(&mut self, target: Vec3) {
        if let Some(ease) = &mut self.ease {
            ease.to = target;
        } else if self.hold.is_some() {
            self.hold = Some(target);
        }
    }

    /// Let the cord fall free again.
    pub fn release(&mut self) {
        self.hold = None;
        self.ease = None;
    }

    pub fn update(&mut self, dt: f32, bodies: &mut dyn BodyTransforms) {
        if let Some(ease) = &mut self.ease {
            ease.elapsed += dt;
            let t = if ease.duration > 0.0 {
                (ease.elapsed / ease.duration).min(1.0)
            } else {
                1.0
            };
            let position = ease.from.lerp(ease.to, Easing::QuadOut.apply(t));
            bodies.set_translation(self.anchor, position);
            bodies.wake(self.anchor);
            if t >= 1.0 {
                self.hold = Some(ease.to);
                self.ease = None;
            }
        } else if let Some(hold) = self.hold {
            bodies.set_translation(self.anchor, hold);
            bodies.wake(self.anchor);
        } else {
            // Free cord: fully simulated, nothing to drive.
            return;
        }
        for &segment in &self.segments {
            bodies.wake(segment);
        }
    }

    /// Points for the renderer, anchor first. Bodies the host no longer
    /// knows are skipped.
    pub fn polyline(&self, bodies: &dyn BodyTransforms) -> Vec<Vec3> {
        std::iter::once(self.anchor)
            .chain(self.segments.iter().copied())
            .filter_map(|body| bodies.translation(body))
            .collect()
    }
}
