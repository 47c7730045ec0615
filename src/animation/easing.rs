//! Easing functions for smooth animations

/// `1 - (1 - t)^3`
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// `4t^3` below the midpoint, `1 - (-2t + 2)^3 / 2` above it
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
