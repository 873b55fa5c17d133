//! Easing curves used by the animation clocks

/// The curves the clocks actually use; `apply` maps normalized time in
/// `[0, 1]` to an eased value in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Slow start.
    QuadIn,
    /// Slow end; settle-up and cord eases.
    QuadOut,
    /// Slow start and end; look-at turns and glances.
    QuadInOut,
    /// Stronger slow end; title dispersion.
    CubicOut,
    SineInOut,
}

impl Easing {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::SineInOut => -((std::f32::consts::PI * t).cos() - 1.0) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicOut,
        Easing::SineInOut,
    ];

    #[test]
    fn endpoints_are_exact() {
        for easing in ALL {
            assert_relative_eq!(easing.apply(0.0), 0.0);
            assert_relative_eq!(easing.apply(1.0), 1.0);
        }
    }

    #[test]
    fn input_is_clamped() {
        for easing in ALL {
            assert_relative_eq!(easing.apply(-3.0), 0.0);
            assert_relative_eq!(easing.apply(42.0), 1.0);
        }
    }

    #[test]
    fn quad_in_out_is_symmetric_around_the_midpoint() {
        assert_relative_eq!(Easing::QuadInOut.apply(0.5), 0.5);
        assert_relative_eq!(
            Easing::QuadInOut.apply(0.25),
            1.0 - Easing::QuadInOut.apply(0.75),
            epsilon = 1e-6
        );
    }

    #[test]
    fn curves_are_monotonic() {
        for easing in ALL {
            let mut last = 0.0;
            for i in 1..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!(v >= last - 1e-6, "{easing:?} dipped at step {i}");
                last = v;
            }
        }
    }
}
