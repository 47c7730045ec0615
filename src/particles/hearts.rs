//! Heart particles: generated once per run, grown in a staggered wave

use rand::Rng;
use serde::Deserialize;
use crate::animation::ease_out_cubic;
use crate::math::Vec2;
use super::heart_region::HeartRegionShape;

/// Appearance and timing of the heart particles
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeartStyle {
    pub count: usize,
    pub min_size: f64,
    pub max_size: f64,
    pub palette: Vec<String>,
    /// Spawn offsets are drawn from [0, max_spawn_delay) of bloom progress
    pub max_spawn_delay: f64,
    /// Share of bloom progress a heart takes to reach full size
    pub grow_window: f64,
    pub region: HeartRegionShape,
}

impl Default for HeartStyle {
    fn default() -> Self {
        Self {
            count: 3000,
            min_size: 5.0,
            max_size: 15.0,
            palette: [
                "#e63946", "#f4a261", "#e9c46a", "#f78cbf",
                "#f25287", "#ffccd5", "#ef476f", "#ffd166",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            max_spawn_delay: 0.8,
            grow_window: 0.6,
            region: HeartRegionShape::default(),
        }
    }
}

/// A single heart decoration
#[derive(Debug, Clone, PartialEq)]
pub struct HeartParticle {
    pub position: Vec2,
    /// Full-grown size
    pub size: f64,
    pub color: String,
    /// Bloom progress at which this heart starts growing
    pub spawn_time: f64,
}

/// All hearts of one run, generated once up front
#[derive(Debug, Clone, Default)]
pub struct ParticleSet {
    particles: Vec<HeartParticle>,
    grow_window: f64,
}

impl ParticleSet {
    /// Scatter `style.count` hearts inside the heart region at `center`
    pub fn generate<R: Rng + ?Sized>(
        center: Vec2,
        radius: f64,
        style: &HeartStyle,
        rng: &mut R,
    ) -> Self {
        let mut particles = Vec::with_capacity(style.count);

        for _ in 0..style.count {
            let position = style.region.sample(center, radius, rng);
            let size = style.min_size + rng.gen::<f64>() * (style.max_size - style.min_size);
            let color = if style.palette.is_empty() {
                String::new()
            } else {
                style.palette[rng.gen_range(0..style.palette.len())].clone()
            };
            let spawn_time = rng.gen::<f64>() * style.max_spawn_delay;

            particles.push(HeartParticle {
                position,
                size,
                color,
                spawn_time,
            });
        }

        Self {
            particles,
            grow_window: style.grow_window,
        }
    }

    /// Current size of `heart` at raw bloom progress `bloom_p`
    pub fn bloom_size(&self, heart: &HeartParticle, bloom_p: f64) -> f64 {
        let age = (bloom_p - heart.spawn_time).max(0.0);
        let t = if self.grow_window > 0.0 {
            (age / self.grow_window).min(1.0)
        } else if age > 0.0 {
            1.0
        } else {
            0.0
        };
        heart.size * ease_out_cubic(t)
    }

    /// Hearts that are visible at `bloom_p`, with their current size
    pub fn blooming(&self, bloom_p: f64) -> impl Iterator<Item = (&HeartParticle, f64)> + '_ {
        self.particles.iter().filter_map(move |heart| {
            let size = self.bloom_size(heart, bloom_p);
            (size > 0.0).then_some((heart, size))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeartParticle> {
        self.particles.iter()
    }

    pub fn count(&self) -> usize {
        self.particles.len()
    }
}
