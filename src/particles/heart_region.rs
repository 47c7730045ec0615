//! Uniform sampling inside an implicit heart-shaped region
//!
//! A candidate offset `(x, y)` from the centre is mapped to
//! `nx = x / r * x_scale`, `ny = -y / r * y_scale + y_offset` and accepted
//! when `nx^2 + (ny - sqrt|nx|)^2 <= 1`.

use rand::Rng;
use serde::Deserialize;
use crate::math::Vec2;

/// Proportions of the heart region and its sampling box
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeartRegionShape {
    /// Sampling box width in radii
    pub box_width: f64,
    /// Sampling box height in radii
    pub box_height: f64,
    pub x_scale: f64,
    pub y_scale: f64,
    pub y_offset: f64,
    /// Rejection attempts before falling back to the centre
    pub max_attempts: u32,
}

impl Default for HeartRegionShape {
    fn default() -> Self {
        Self {
            box_width: 2.2,
            box_height: 2.5,
            x_scale: 1.2,
            y_scale: 1.5,
            y_offset: 0.3,
            max_attempts: 10_000,
        }
    }
}

impl HeartRegionShape {
    /// Whether `offset` from the centre lies inside the heart of `radius`
    pub fn contains(&self, offset: Vec2, radius: f64) -> bool {
        let nx = offset.x / radius * self.x_scale;
        let ny = -(offset.y / radius) * self.y_scale + self.y_offset;
        nx * nx + (ny - nx.abs().sqrt()).powi(2) <= 1.0
    }

    /// Rejection-sample a point inside the heart centred on `center`.
    ///
    /// Returns `center` itself if no candidate is accepted within
    /// `max_attempts`, or if `radius` is not a positive finite number.
    pub fn sample<R: Rng + ?Sized>(&self, center: Vec2, radius: f64, rng: &mut R) -> Vec2 {
        if !(radius > 0.0 && radius.is_finite()) {
            return center;
        }

        for _ in 0..self.max_attempts {
            let offset = Vec2::new(
                (rng.gen::<f64>() - 0.5) * self.box_width * radius,
                (rng.gen::<f64>() - 0.5) * self.box_height * radius,
            );
            if self.contains(offset, radius) {
                return center + offset;
            }
        }

        log::warn!(
            "heart sampler gave up after {} attempts; using centre",
            self.max_attempts
        );
        center
    }
}
