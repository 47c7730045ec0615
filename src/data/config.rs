//! Show configuration loaded from YAML

use serde::Deserialize;
use crate::growth::{OffsetAxis, Side};
use crate::particles::HeartStyle;
use super::layout::LayoutClass;

/// Main branch tunables; size-derived values scale with the smaller surface side
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrunkConfig {
    pub base_width_min: f64,
    pub base_width_ratio: f64,
    pub top_height_min: f64,
    pub right_bend: f64,
    pub left_bend: f64,
    pub end_thicken: f64,
    pub color: String,
    pub hook_strength: f64,
    pub hook_start: f64,
}

impl Default for TrunkConfig {
    fn default() -> Self {
        Self {
            base_width_min: 16.0,
            base_width_ratio: 0.08,
            top_height_min: 150.0,
            right_bend: 1.0,
            left_bend: -25.0,
            end_thicken: 2.5,
            color: "#14b79b".to_string(),
            hook_strength: 0.8,
            hook_start: 0.7,
        }
    }
}

/// One thin branch; length is `smallest side * length_ratio * height multiplier`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TwigConfig {
    pub length_ratio: f64,
    pub base_bend: f64,
    pub base_thickness: f64,
    #[serde(default = "default_twig_color")]
    pub color: String,
    pub start_progress: f64,
    pub anchor_progress: f64,
    pub side: Side,
    #[serde(default)]
    pub lateral_offset: f64,
    /// Defaults to tangent on the left side, horizontal on the right
    #[serde(default)]
    pub offset_axis: Option<OffsetAxis>,
}

fn default_twig_color() -> String {
    "#14b79b".to_string()
}

impl TwigConfig {
    fn stock(
        length_ratio: f64,
        base_bend: f64,
        base_thickness: f64,
        start_progress: f64,
        anchor_progress: f64,
        side: Side,
        lateral_offset: f64,
    ) -> Self {
        Self {
            length_ratio,
            base_bend,
            base_thickness,
            color: default_twig_color(),
            start_progress,
            anchor_progress,
            side,
            lateral_offset,
            offset_axis: None,
        }
    }

    pub fn offset_axis(&self) -> OffsetAxis {
        self.offset_axis.unwrap_or(match self.side {
            Side::Left => OffsetAxis::Tangent,
            Side::Right => OffsetAxis::Horizontal,
        })
    }
}

fn stock_twigs() -> Vec<TwigConfig> {
    vec![
        TwigConfig::stock(0.20, -65.0, 3.0, 0.45, 0.45, Side::Left, -30.0),
        TwigConfig::stock(0.18, -35.0, 2.5, 0.30, 0.30, Side::Left, -25.0),
        TwigConfig::stock(0.19, 20.0, 2.7, 0.25, 0.33, Side::Right, -5.0),
        TwigConfig::stock(0.17, 40.0, 2.3, 0.45, 0.45, Side::Right, -10.0),
    ]
}

/// Where the heart sits relative to the grown branch
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BloomConfig {
    #[serde(flatten)]
    pub style: HeartStyle,
    /// Share of the final tip bend that shifts the heart sideways
    pub center_bend_factor: f64,
    pub center_x_offset: f64,
    /// Cap on the heart radius as a share of half the surface width
    pub width_fraction: f64,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            style: HeartStyle::default(),
            center_bend_factor: 0.7,
            center_x_offset: 20.0,
            width_fraction: 0.9,
        }
    }
}

/// Phase durations in seconds
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub growth_seconds: f64,
    pub bloom_seconds: f64,
    pub translate_seconds: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            growth_seconds: 3.0,
            bloom_seconds: 2.0,
            translate_seconds: 1.5,
        }
    }
}

/// Per-layout scaling
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LayoutPreset {
    pub height_multiplier: f64,
    /// Final sideways slide as a share of surface width; `None` skips the slide
    #[serde(default)]
    pub translate_fraction: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutsConfig {
    pub portrait: LayoutPreset,
    pub compact_landscape: LayoutPreset,
    pub landscape: LayoutPreset,
    /// Landscape surfaces narrower than this (CSS px) count as compact
    pub compact_width: f64,
}

impl Default for LayoutsConfig {
    fn default() -> Self {
        Self {
            portrait: LayoutPreset { height_multiplier: 0.6, translate_fraction: None },
            compact_landscape: LayoutPreset { height_multiplier: 0.65, translate_fraction: Some(0.30) },
            landscape: LayoutPreset { height_multiplier: 0.8, translate_fraction: Some(0.25) },
            compact_width: 900.0,
        }
    }
}

impl LayoutsConfig {
    pub fn preset(&self, layout: LayoutClass) -> LayoutPreset {
        match layout {
            LayoutClass::Portrait => self.portrait,
            LayoutClass::CompactLandscape => self.compact_landscape,
            LayoutClass::Landscape => self.landscape,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Distance of the ground line above the bottom edge
    pub inset: f64,
    pub color: String,
    pub line_width: f64,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            inset: 4.0,
            color: "#111".to_string(),
            line_width: 2.0,
        }
    }
}

/// Complete show configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShowConfig {
    pub trunk: TrunkConfig,
    pub twigs: Vec<TwigConfig>,
    pub hearts: BloomConfig,
    pub timing: TimingConfig,
    pub layouts: LayoutsConfig,
    pub ground: GroundConfig,
    /// Fixed RNG seed for reproducible heart placement
    pub seed: Option<u64>,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            trunk: TrunkConfig::default(),
            twigs: stock_twigs(),
            hearts: BloomConfig::default(),
            timing: TimingConfig::default(),
            layouts: LayoutsConfig::default(),
            ground: GroundConfig::default(),
            seed: None,
        }
    }
}

impl ShowConfig {
    /// Parse from YAML string; missing fields take the stock values
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let config: ShowConfig = serde_yaml::from_str(yaml)
            .map_err(|e| format!("YAML parse error: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the geometry cannot honour
    pub fn validate(&self) -> Result<(), String> {
        let trunk = &self.trunk;
        if !(trunk.base_width_min > 0.0) {
            return Err(format!("trunk.base_width_min must be positive, got {}", trunk.base_width_min));
        }
        if !(trunk.top_height_min > 0.0) {
            return Err(format!("trunk.top_height_min must be positive, got {}", trunk.top_height_min));
        }
        if !(trunk.end_thicken >= 1.0) {
            return Err(format!("trunk.end_thicken must be at least 1, got {}", trunk.end_thicken));
        }
        if !(0.0..1.0).contains(&trunk.hook_start) {
            return Err(format!("trunk.hook_start must be in [0, 1), got {}", trunk.hook_start));
        }

        for (i, twig) in self.twigs.iter().enumerate() {
            if !(0.0..1.0).contains(&twig.start_progress) {
                return Err(format!(
                    "twigs[{}].start_progress must be in [0, 1), got {}",
                    i, twig.start_progress
                ));
            }
            if !(0.0..=1.0).contains(&twig.anchor_progress) {
                return Err(format!(
                    "twigs[{}].anchor_progress must be in [0, 1], got {}",
                    i, twig.anchor_progress
                ));
            }
            if !(twig.length_ratio >= 0.0) || !(twig.base_thickness >= 0.0) {
                return Err(format!("twigs[{}] length and thickness must not be negative", i));
            }
        }

        let style = &self.hearts.style;
        if style.min_size > style.max_size {
            return Err(format!(
                "hearts.min_size ({}) exceeds hearts.max_size ({})",
                style.min_size, style.max_size
            ));
        }
        if style.count > 0 && style.palette.is_empty() {
            return Err("hearts.palette must not be empty".to_string());
        }
        if !(style.grow_window >= 0.0) || !(style.max_spawn_delay >= 0.0) {
            return Err("hearts.grow_window and hearts.max_spawn_delay must not be negative".to_string());
        }

        let timing = &self.timing;
        for (name, value) in [
            ("growth_seconds", timing.growth_seconds),
            ("bloom_seconds", timing.bloom_seconds),
            ("translate_seconds", timing.translate_seconds),
        ] {
            if !(value >= 0.0) {
                return Err(format!("timing.{} must not be negative, got {}", name, value));
            }
        }

        Ok(())
    }
}
