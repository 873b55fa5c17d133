//! Idle glances
//!
//! When the player stands still long enough, the camera drifts a small
//! random amount off axis and drifts back, as if the character's attention
//! wandered. The offset is additive on top of the player's own yaw/pitch;
//! input during a glance cross-fades the offset out instead of snapping.

use crate::easing::Easing;
use crate::rng::Rng;

#[derive(Debug, Clone, Copy)]
pub struct GlanceConfig {
    /// Seconds of stillness before a glance may begin.
    pub idle_after: f32,
    /// Chance per second of starting once idle.
    pub chance_per_second: f32,
    /// Largest offsets, radians.
    pub max_yaw: f32,
    pub max_pitch: f32,
    /// Glance length bounds, seconds.
    pub min_duration: f32,
    pub max_duration: f32,
    /// Cross-fade out when interrupted, seconds.
    pub fade_out: f32,
}

impl Default for GlanceConfig {
    fn default() -> Self {
        Self {
            idle_after: 6.0,
            chance_per_second: 0.35,
            max_yaw: 0.35,
            max_pitch: 0.15,
            min_duration: 1.6,
            max_duration: 3.2,
            fade_out: 0.25,
        }
    }
}

/// Additive camera offset, radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlanceOffset {
    pub yaw: f32,
    pub pitch: f32,
}

impl GlanceOffset {
    pub const ZERO: Self = Self {
        yaw: 0.0,
        pitch: 0.0,
    };

    pub fn is_zero(&self) -> bool {
        self.yaw == 0.0 && self.pitch == 0.0
    }
}

#[derive(Debug)]
enum State {
    Resting,
    Glancing {
        yaw: f32,
        pitch: f32,
        duration: f32,
        elapsed: f32,
    },
    Fading {
        yaw: f32,
        pitch: f32,
        elapsed: f32,
    },
}

/// The idle glance clock. Deterministic for a given seed and input stream.
#[derive(Debug)]
pub struct IdleGlance {
    config: GlanceConfig,
    rng: Rng,
    idle_time: f32,
    state: State,
}

impl IdleGlance {
    pub fn new(config: GlanceConfig, seed: u64) -> Self {
        Self {
            config,
            rng: Rng::new(seed),
            idle_time: 0.0,
            state: State::Resting,
        }
    }

    pub fn is_glancing(&self) -> bool {
        !matches!(self.state, State::Resting)
    }

    /// Advance the clock. `moving` is player input this frame; `suppressed`
    /// covers cutscenes and look-ats, which also interrupt.
    pub fn update(&mut self, dt: f32, moving: bool, suppressed: bool) -> GlanceOffset {
        let interrupted = moving || suppressed;
        match &mut self.state {
            State::Resting => {
                if interrupted {
                    self.idle_time = 0.0;
                } else {
                    self.idle_time += dt;
                    if self.idle_time >= self.config.idle_after
                        && self.rng.chance(self.config.chance_per_second * dt)
                    {
                        self.begin_glance();
                    }
                }
                GlanceOffset::ZERO
            }
            State::Glancing {
                yaw,
                pitch,
                duration,
                elapsed,
            } => {
                *elapsed += dt;
                let t = (*elapsed / *duration).min(1.0);
                // A bell envelope: out and back within one glance.
                let envelope = (std::f32::consts::PI * t).sin();
                let offset = GlanceOffset {
                    yaw: *yaw * envelope,
                    pitch: *pitch * envelope,
                };
                if interrupted {
                    self.state = State::Fading {
                        yaw: offset.yaw,
                        pitch: offset.pitch,
                        elapsed: 0.0,
                    };
                    self.idle_time = 0.0;
                    return offset;
                }
                if t >= 1.0 {
                    self.state = State::Resting;
                    self.idle_time = 0.0;
                    return GlanceOffset::ZERO;
                }
                offset
            }
            State::Fading { yaw, pitch, elapsed } => {
                *elapsed += dt;
                let t = if self.config.fade_out > 0.0 {
                    (*elapsed / self.config.fade_out).min(1.0)
                } else {
                    1.0
                };
                let remaining = 1.0 - Easing::QuadOut.apply(t);
                let offset = GlanceOffset {
                    yaw: *yaw * remaining,
                    pitch: *pitch * remaining,
                };
                if t >= 1.0 {
                    self.state = State::Resting;
                    self.idle_time = 0.0;
                    return GlanceOffset::ZERO;
                }
                offset
            }
        }
    }

    fn begin_glance(&mut self) {
        let yaw = self
            .rng
            .range_f32(-self.config.max_yaw, self.config.max_yaw);
        let pitch = self
            .rng
            .range_f32(-self.config.max_pitch, self.config.max_pitch);
        let duration = self
            .rng
            .range_f32(self.config.min_duration, self.config.max_duration);
        log::debug!("glance: yaw {yaw:.2} pitch {pitch:.2} over {duration:.2}s");
        self.state = State::Glancing {
            yaw,
            pitch,
            duration,
            elapsed: 0.0,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eager_config() -> GlanceConfig {
        GlanceConfig {
            idle_after: 1.0,
            chance_per_second: 1000.0,
            ..GlanceConfig::default()
        }
    }

    /// Step until a glance starts; panics if it never does.
    fn run_until_glancing(glance: &mut IdleGlance) {
        for _ in 0..200 {
            glance.update(0.1, false, false);
            if glance.is_glancing() {
                return;
            }
        }
        panic!("glance never started");
    }

    #[test]
    fn needs_stillness_before_starting() {
        let mut glance = IdleGlance::new(eager_config(), 7);
        // Constant movement keeps the clock at zero.
        for _ in 0..100 {
            let offset = glance.update(0.1, true, false);
            assert!(offset.is_zero());
        }
        assert!(!glance.is_glancing());
    }

    #[test]
    fn glances_stay_within_configured_bounds() {
        let mut glance = IdleGlance::new(eager_config(), 11);
        run_until_glancing(&mut glance);
        let config = eager_config();
        for _ in 0..100 {
            let offset = glance.update(0.05, false, false);
            assert!(offset.yaw.abs() <= config.max_yaw + 1e-6);
            assert!(offset.pitch.abs() <= config.max_pitch + 1e-6);
        }
    }

    #[test]
    fn glance_returns_to_zero_on_its_own() {
        let mut glance = IdleGlance::new(eager_config(), 3);
        run_until_glancing(&mut glance);
        // The longest glance is 3.2s; it must end within these steps and
        // land on exactly zero the frame it does.
        for _ in 0..200 {
            let offset = glance.update(0.05, false, false);
            if !glance.is_glancing() {
                assert!(offset.is_zero());
                return;
            }
        }
        panic!("glance never ended");
    }

    #[test]
    fn input_fades_the_offset_out() {
        let mut glance = IdleGlance::new(eager_config(), 5);
        run_until_glancing(&mut glance);
        let mid = glance.update(0.4, false, false);
        assert!(!mid.is_zero());

        // First moving frame keeps continuity, then the fade shrinks it.
        let first = glance.update(0.016, true, false);
        let mut prev = first.yaw.abs() + first.pitch.abs();
        loop {
            let offset = glance.update(0.05, true, false);
            let size = offset.yaw.abs() + offset.pitch.abs();
            assert!(size <= prev + 1e-6);
            prev = size;
            if offset.is_zero() {
                break;
            }
        }
        assert!(!glance.is_glancing());
    }

    #[test]
    fn same_seed_same_glances() {
        let mut a = IdleGlance::new(eager_config(), 42);
        let mut b = IdleGlance::new(eager_config(), 42);
        for _ in 0..400 {
            assert_eq!(a.update(0.05, false, false), b.update(0.05, false, false));
        }
    }

    #[test]
    fn suppression_blocks_like_movement() {
        let mut glance = IdleGlance::new(eager_config(), 9);
        for _ in 0..100 {
            glance.update(0.1, false, true);
        }
        assert!(!glance.is_glancing());
    }
}
