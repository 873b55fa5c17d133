//! Walking headbob
//!
//! A phase accumulator tied to ground speed: height bobs at twice the
//! stride frequency, roll sways at the stride frequency. The whole effect
//! is weighted in and out over a short window so starting and stopping
//! never pops.

#[derive(Debug, Clone, Copy)]
pub struct HeadbobConfig {
    /// Stride length used to turn speed into cadence, meters.
    pub stride: f32,
    /// Peak vertical offset, meters.
    pub height: f32,
    /// Peak roll, radians.
    pub roll: f32,
    /// Seconds to blend the effect in or out.
    pub blend: f32,
    /// Speeds below this count as standing still.
    pub min_speed: f32,
}

impl Default for HeadbobConfig {
    fn default() -> Self {
        Self {
            stride: 1.9,
            height: 0.035,
            roll: 0.012,
            blend: 0.3,
            min_speed: 0.1,
        }
    }
}

/// Additive camera offset for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BobOffset {
    /// Vertical, meters.
    pub height: f32,
    /// Roll, radians.
    pub roll: f32,
}

#[derive(Debug)]
pub struct Headbob {
    config: HeadbobConfig,
    phase: f32,
    weight: f32,
}

impl Headbob {
    pub fn new(config: HeadbobConfig) -> Self {
        Self {
            config,
            phase: 0.0,
            weight: 0.0,
        }
    }

    /// Advance with the player's current ground speed in m/s.
    pub fn update(&mut self, dt: f32, speed: f32) -> BobOffset {
        let moving = speed > self.config.min_speed;
        let target = if moving { 1.0 } else { 0.0 };
        let rate = if self.config.blend > 0.0 {
            dt / self.config.blend
        } else {
            1.0
        };
        self.weight = if self.weight < target {
            (self.weight + rate).min(target)
        } else {
            (self.weight - rate).max(target)
        };

        if moving {
            self.phase += dt * (speed / self.config.stride) * std::f32::consts::TAU;
        }
        if self.weight <= 0.0 {
            self.phase = 0.0;
            return BobOffset::default();
        }
        BobOffset {
            height: self.config.height * self.weight * (self.phase * 2.0).sin(),
            roll: self.config.roll * self.weight * self.phase.sin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn still_camera_stays_level() {
        let mut bob = Headbob::new(HeadbobConfig::default());
        for _ in 0..60 {
            assert_eq!(bob.update(0.016, 0.0), BobOffset::default());
        }
    }

    #[test]
    fn walking_oscillates_within_bounds() {
        let config = HeadbobConfig::default();
        let mut bob = Headbob::new(config);
        let mut peak: f32 = 0.0;
        for _ in 0..300 {
            let offset = bob.update(0.016, 1.6);
            assert!(offset.height.abs() <= config.height + 1e-6);
            assert!(offset.roll.abs() <= config.roll + 1e-6);
            peak = peak.max(offset.height.abs());
        }
        // The bob actually moves once blended in.
        assert!(peak > config.height * 0.5);
    }

    #[test]
    fn stopping_blends_out_and_resets_phase() {
        let config = HeadbobConfig::default();
        let mut bob = Headbob::new(config);
        for _ in 0..120 {
            bob.update(0.016, 1.6);
        }
        let mut frames_to_settle = 0;
        loop {
            let offset = bob.update(0.016, 0.0);
            frames_to_settle += 1;
            if offset == BobOffset::default() {
                break;
            }
            assert!(frames_to_settle < 60, "headbob never settled");
        }
        // Settled close to the configured blend window.
        assert!(frames_to_settle <= (config.blend / 0.016) as usize + 2);
    }
}
