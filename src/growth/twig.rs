//! Thin tapering offshoots anchored on the main branch outline

use serde::Deserialize;
use crate::animation::ease_out_cubic;
use crate::math::Vec2;
use super::surface::{sample_surface, Side};
use super::trunk::{BranchParameters, BranchRoot};

/// Radians per unit of `base_bend`
const BEND_TO_RADIANS: f64 = 0.015;
/// Scale from the configured thickness to drawn base width
const THICKNESS_MULTIPLIER: f64 = 5.0;
/// Minimum tip half-width
const MIN_TIP_HALF_WIDTH: f64 = 0.6;
/// Relative progress beyond which the tip gets a rounded cap
const CAP_THRESHOLD: f64 = 0.95;
const CAP_SCALE: f64 = 1.2;
const MIN_CAP_RADIUS: f64 = 1.0;

/// How the lateral offset moves the sampled anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetAxis {
    /// Along the outline tangent at the sampled point
    Tangent,
    /// Straight along the x axis
    Horizontal,
}

/// Static description of one thin branch
#[derive(Debug, Clone, PartialEq)]
pub struct ThinBranchSpec {
    pub length: f64,
    /// Fixed angular deviation; converted to radians by a small constant
    pub base_bend: f64,
    pub base_thickness: f64,
    pub color: String,
    /// Raw growth progress at which this branch starts, in [0, 1)
    pub start_progress: f64,
    /// Raw progress along the main branch used to find the anchor, in [0, 1]
    pub anchor_progress: f64,
    pub side: Side,
    pub lateral_offset: f64,
    pub offset_axis: OffsetAxis,
}

impl ThinBranchSpec {
    /// Progress local to this branch; zero or less means not started
    pub fn relative_progress(&self, global_p: f64) -> f64 {
        let span = 1.0 - self.start_progress;
        if span <= 0.0 {
            return 0.0;
        }
        ((global_p - self.start_progress) / span).max(0.0)
    }

    /// Direction of growth in radians clockwise from screen-up
    pub fn angle(&self) -> f64 {
        self.base_bend * BEND_TO_RADIANS
    }

    /// Half-width at the base of the ribbon
    pub fn base_half_width(&self) -> f64 {
        self.base_thickness * THICKNESS_MULTIPLIER * 0.5
    }

    /// Half-width at the tip; longer branches taper proportionally thinner
    pub fn tip_half_width(&self) -> f64 {
        let taper = (0.45 - self.length * 0.002).max(0.03);
        (self.base_half_width() * taper).max(MIN_TIP_HALF_WIDTH)
    }
}

/// Anchoring lifecycle of one thin branch
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ThinBranchState {
    #[default]
    Unanchored,
    Anchored { anchor: Vec2 },
}

impl ThinBranchState {
    pub fn anchor(&self) -> Option<Vec2> {
        match *self {
            ThinBranchState::Unanchored => None,
            ThinBranchState::Anchored { anchor } => Some(anchor),
        }
    }

    pub fn is_anchored(&self) -> bool {
        matches!(self, ThinBranchState::Anchored { .. })
    }

    /// Anchor the branch the first time raw progress reaches its start.
    ///
    /// Samples the main branch outline once; later calls return the pinned
    /// anchor regardless of `global_p`. Returns `None` while not started.
    pub fn advance(
        &mut self,
        spec: &ThinBranchSpec,
        global_p: f64,
        root: BranchRoot,
        trunk: &BranchParameters,
    ) -> Option<Vec2> {
        match *self {
            ThinBranchState::Anchored { anchor } => Some(anchor),
            ThinBranchState::Unanchored if global_p >= spec.start_progress => {
                let anchor = locate_anchor(spec, root, trunk);
                log::debug!(
                    "thin branch anchored on {:?} side at ({:.1}, {:.1})",
                    spec.side, anchor.x, anchor.y
                );
                *self = ThinBranchState::Anchored { anchor };
                Some(anchor)
            }
            ThinBranchState::Unanchored => None,
        }
    }
}

/// Anchor position for `spec` on the main branch outline
pub fn locate_anchor(spec: &ThinBranchSpec, root: BranchRoot, trunk: &BranchParameters) -> Vec2 {
    let sample = sample_surface(root, spec.anchor_progress, spec.side, trunk);
    match spec.offset_axis {
        OffsetAxis::Tangent => sample.position + sample.tangent.scale(spec.lateral_offset),
        OffsetAxis::Horizontal => sample.position + Vec2::new(spec.lateral_offset, 0.0),
    }
}

/// Ribbon outline of a thin branch at one progress value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThinBranchGeometry {
    pub start: Vec2,
    pub end: Vec2,
    /// Unit normal used to offset both ribbon edges
    pub normal: Vec2,
    pub cp1: Vec2,
    pub cp2: Vec2,
    pub base_half_width: f64,
    pub tip_half_width: f64,
    /// Radius of the rounded tip cap, once nearly grown
    pub cap_radius: Option<f64>,
}

impl ThinBranchGeometry {
    /// Edge points `(start, cp1, cp2, end)` offset to one side of the ribbon.
    ///
    /// `sign` is `1.0` for the normal side and `-1.0` for the opposite one.
    pub fn edge(&self, sign: f64) -> [Vec2; 4] {
        let n = self.normal.scale(sign);
        let hw = self.base_half_width;
        [
            self.start + n.scale(hw),
            self.cp1 + Vec2::new(n.x * hw * 0.7, n.y * hw * 0.4),
            self.cp2 + Vec2::new(n.x * hw * 0.25, n.y * hw * 0.12),
            self.end + n.scale(self.tip_half_width),
        ]
    }
}

/// Thin branch geometry grown from `anchor` at raw global progress `global_p`.
///
/// Eases the relative progress itself; returns `None` before the branch starts.
pub fn thin_branch_shape(anchor: Vec2, global_p: f64, spec: &ThinBranchSpec) -> Option<ThinBranchGeometry> {
    let relative = spec.relative_progress(global_p);
    if relative <= 0.0 {
        return None;
    }

    let pe = ease_out_cubic(relative);
    let length = spec.length * pe;
    let angle = spec.angle();

    let end = anchor + Vec2::from_heading(angle).scale(length);
    let cp1 = anchor + Vec2::from_heading(angle * 0.4).scale(length * 0.3);
    let cp2 = anchor + Vec2::from_heading(angle * 0.8).scale(length * 0.7);

    let tip_half_width = spec.tip_half_width();
    let cap_radius = (relative > CAP_THRESHOLD)
        .then(|| (tip_half_width * CAP_SCALE).max(MIN_CAP_RADIUS));

    Some(ThinBranchGeometry {
        start: anchor,
        end,
        normal: Vec2::new(angle.cos(), angle.sin()),
        cp1,
        cp2,
        base_half_width: spec.base_half_width(),
        tip_half_width,
        cap_radius,
    })
}
