//! Composite curvature: a smooth sweep from one bend to another with a
//! late hook curling further toward the second side.

use crate::animation::ease_in_out_cubic;

/// Exponent of the hook term; above 1 so the hook starts with zero slope
const HOOK_EXPONENT: f64 = 1.8;

/// Hook shaping for [`composite_bend`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hook {
    /// Fraction of `|left_bend|` added at p = 1
    pub strength: f64,
    /// Progress at which the hook starts, in [0, 1)
    pub start: f64,
}

impl Default for Hook {
    fn default() -> Self {
        Self {
            strength: 0.8,
            start: 0.7,
        }
    }
}

/// Signed horizontal tip deviation at progress `p`.
///
/// `p` is expected to be already eased by the caller. At p = 0 the result is
/// `right_bend`, at p = 1 it is `left_bend` plus the full hook.
pub fn composite_bend(p: f64, right_bend: f64, left_bend: f64, hook: Hook) -> f64 {
    let s = ease_in_out_cubic(p);
    let mut bend = right_bend * (1.0 - s) + left_bend * s;

    if p > hook.start && hook.start < 1.0 {
        let t = (p - hook.start) / (1.0 - hook.start);
        bend += -left_bend.abs() * hook.strength * t.powf(HOOK_EXPONENT);
    }

    bend
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let hook = Hook::default();
        assert_eq!(composite_bend(0.0, 1.0, -25.0, hook), 1.0);
        assert!((composite_bend(1.0, 1.0, -25.0, hook) - (-45.0)).abs() < 1e-12);
    }

    #[test]
    fn test_no_hook_before_start() {
        let hook = Hook { strength: 3.0, start: 0.7 };
        let no_hook = Hook { strength: 0.0, start: 0.7 };
        for i in 0..=70 {
            let p = i as f64 / 100.0;
            assert_eq!(
                composite_bend(p, 1.0, -25.0, hook),
                composite_bend(p, 1.0, -25.0, no_hook)
            );
        }
    }

    #[test]
    fn test_continuous_at_hook_start() {
        for &strength in &[0.0, 0.8, 2.5] {
            for &start in &[0.1, 0.5, 0.7, 0.95] {
                let hook = Hook { strength, start };
                let eps = 1e-9;
                let below = composite_bend(start - eps, 1.0, -25.0, hook);
                let above = composite_bend(start + eps, 1.0, -25.0, hook);
                assert!(
                    (below - above).abs() < 1e-6,
                    "jump at start={} strength={}: {} vs {}",
                    start, strength, below, above
                );
            }
        }
    }

    #[test]
    fn test_hook_slope_vanishes_at_start() {
        let hook = Hook { strength: 0.8, start: 0.7 };
        let h = 1e-7;
        let with = |p| composite_bend(p, 1.0, -25.0, hook);
        let without = |p| composite_bend(p, 1.0, -25.0, Hook { strength: 0.0, start: 0.7 });
        let hook_slope = ((with(0.7 + h) - without(0.7 + h)) - (with(0.7) - without(0.7))) / h;
        assert!(hook_slope.abs() < 1e-3);
    }

    #[test]
    fn test_hook_curls_toward_left_side() {
        let hook = Hook::default();
        let plain = Hook { strength: 0.0, start: 0.7 };
        let p = 0.9;
        assert!(composite_bend(p, 1.0, -25.0, hook) < composite_bend(p, 1.0, -25.0, plain));
    }
}
