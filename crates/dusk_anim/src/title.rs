//! Title sequence choreography
//!
//! The title is a row of shader-driven elements that gather out of a
//! dispersed cloud, hold, and scatter again, one element staggered after
//! the next. The sequence owns no geometry: each frame it writes a
//! `dispersion` scalar and a stable `drift` direction per element through
//! the uniform port and the title shader does the rest.
//!
//! Element phase is a pure function of elapsed time, so the sequence only
//! runs forward; seeking backwards is not supported.

use dusk_core::ShaderUniforms;
use glam::Vec3;

use crate::easing::Easing;
use crate::rng::scatter_f32;

#[derive(Debug, Clone, Copy)]
pub struct TitleConfig {
    /// Number of title elements the shader exposes.
    pub elements: u32,
    /// Per-element start offset, seconds.
    pub stagger: f32,
    /// Gather length, seconds.
    pub intro: f32,
    /// Fully-assembled hold, seconds.
    pub hold: f32,
    /// Scatter length, seconds.
    pub outro: f32,
    /// World-space drift distance at full dispersion.
    pub drift_scale: f32,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            elements: 8,
            stagger: 0.35,
            intro: 1.4,
            hold: 2.4,
            outro: 1.1,
            drift_scale: 1.0,
        }
    }
}

/// The running title sequence.
#[derive(Debug)]
pub struct TitleSequence {
    config: TitleConfig,
    elapsed: f32,
    active: bool,
}

impl TitleSequence {
    pub fn new(config: TitleConfig) -> Self {
        Self {
            config,
            elapsed: 0.0,
            active: false,
        }
    }

    pub fn start(&mut self) {
        if self.config.elements == 0 {
            log::warn!("title: no elements configured, skipping");
            return;
        }
        log::info!("title: sequence started ({:.1}s)", self.total());
        self.elapsed = 0.0;
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn total(&self) -> f32 {
        let last_start = self.config.stagger * self.config.elements.saturating_sub(1) as f32;
        last_start + self.config.intro + self.config.hold + self.config.outro
    }

    /// Advance and write uniforms. Returns `true` exactly once, on the
    /// frame the sequence completes.
    pub fn update(&mut self, dt: f32, uniforms: &mut dyn ShaderUniforms) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed += dt;

        for index in 0..self.config.elements {
            let local = self.elapsed - self.config.stagger * index as f32;
            let dispersion = element_dispersion(&self.config, local);
            uniforms.set_float(index, "dispersion", dispersion);
            uniforms.set_vec3(index, "drift", drift(index) * self.config.drift_scale);
        }

        if self.elapsed >= self.total() {
            log::info!("title: sequence finished");
            self.active = false;
            return true;
        }
        false
    }
}

/// Dispersion for one element at its local time: 1 is fully scattered,
/// 0 fully assembled.
fn element_dispersion(config: &TitleConfig, local: f32) -> f32 {
    if local <= 0.0 {
        return 1.0;
    }
    if local < config.intro {
        return 1.0 - Easing::CubicOut.apply(local / config.intro);
    }
    let after_hold = local - config.intro - config.hold;
    if after_hold <= 0.0 {
        return 0.0;
    }
    if config.outro <= 0.0 {
        return 1.0;
    }
    Easing::QuadIn.apply(after_hold / config.outro)
}

/// Stable per-element drift direction; elements keep their direction
/// across frames and runs.
fn drift(index: u32) -> Vec3 {
    let yaw = scatter_f32(index) * std::f32::consts::TAU;
    let lift = scatter_f32(index.wrapping_add(0x517C_C1B7)) * 2.0 - 1.0;
    Vec3::new(yaw.cos(), lift, yaw.sin()).normalize()
}
