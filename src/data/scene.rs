//! Size-derived values for one run
//!
//! Everything here is recomputed from scratch whenever the surface changes
//! size; nothing is carried over between runs.

use crate::growth::{branch_shape, BranchParameters, BranchRoot, Hook, ThinBranchSpec};
use crate::math::Vec2;
use crate::particles::HeartStyle;
use super::config::{GroundConfig, ShowConfig, TimingConfig};
use super::layout::LayoutClass;

/// Smallest surface extent the geometry is derived from, in CSS px
const MIN_EXTENT: f64 = 1.0;
const MIN_HEART_RADIUS: f64 = 1.0;
const MIN_TWIG_LENGTH: f64 = 1.0;

/// Fully resolved parameters of one run
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub layout: LayoutClass,
    pub root: BranchRoot,
    pub trunk: BranchParameters,
    pub twigs: Vec<ThinBranchSpec>,
    pub heart_center: Vec2,
    pub heart_radius: f64,
    pub hearts: HeartStyle,
    /// Horizontal slide after the bloom; `None` when the layout has no slide
    pub translate_offset: Option<f64>,
    pub timing: TimingConfig,
    pub ground: GroundConfig,
}

fn floor_extent(value: f64, name: &str) -> f64 {
    if value.is_finite() && value >= MIN_EXTENT {
        value
    } else {
        log::warn!("degenerate surface {} {}; using {}", name, value, MIN_EXTENT);
        MIN_EXTENT
    }
}

impl Scene {
    /// Derive a scene for a `width` x `height` CSS-pixel surface
    pub fn derive(width: f64, height: f64, layout: LayoutClass, config: &ShowConfig) -> Scene {
        let width = floor_extent(width, "width");
        let height = floor_extent(height, "height");
        let preset = config.layouts.preset(layout);
        let smallest = width.min(height);

        let root = BranchRoot {
            center_x: width / 2.0,
            ground_y: height - config.ground.inset,
        };

        let tc = &config.trunk;
        let trunk = BranchParameters {
            base_width: tc.base_width_min.max(smallest * tc.base_width_ratio),
            top_height: tc.top_height_min.max(smallest * preset.height_multiplier),
            right_bend: tc.right_bend,
            left_bend: tc.left_bend,
            end_thicken: tc.end_thicken.max(1.0),
            fill_color: tc.color.clone(),
            hook: Hook {
                strength: tc.hook_strength,
                start: tc.hook_start,
            },
        };

        let twigs = config
            .twigs
            .iter()
            .map(|twig| ThinBranchSpec {
                length: (smallest * twig.length_ratio * preset.height_multiplier)
                    .round()
                    .max(MIN_TWIG_LENGTH),
                base_bend: twig.base_bend,
                base_thickness: twig.base_thickness,
                color: twig.color.clone(),
                start_progress: twig.start_progress,
                anchor_progress: twig.anchor_progress,
                side: twig.side,
                lateral_offset: twig.lateral_offset,
                offset_axis: twig.offset_axis(),
            })
            .collect();

        // Hearts are placed against the fully grown branch
        let grown = branch_shape(root, 1.0, &trunk);
        let bloom = &config.hearts;
        let heart_radius = (trunk.top_height * 0.5)
            .min(width / 2.0 * bloom.width_fraction)
            .max(MIN_HEART_RADIUS);
        let heart_center = Vec2::new(
            root.center_x + grown.bend * bloom.center_bend_factor + bloom.center_x_offset,
            root.ground_y - trunk.top_height * 0.5 - heart_radius * 0.2,
        );

        let translate_offset = preset.translate_fraction.map(|fraction| width * fraction);

        Scene {
            width,
            height,
            layout,
            root,
            trunk,
            twigs,
            heart_center,
            heart_radius,
            hearts: bloom.style.clone(),
            translate_offset,
            timing: config.timing,
            ground: config.ground.clone(),
        }
    }

    /// Ground line endpoints
    pub fn ground_line(&self) -> (Vec2, Vec2) {
        (
            Vec2::new(0.0, self.root.ground_y),
            Vec2::new(self.width, self.root.ground_y),
        )
    }
}
