//! Main branch silhouette as a closed-form function of growth progress.

use crate::animation::ease_out_cubic;
use crate::math::{CubicBezier, Vec2};
use super::bend::{composite_bend, Hook};

/// Growth fraction after which thickening and sag begin
const LATE_GROWTH: f64 = 0.5;
/// Share of the extra thickness that widens the base
const BASE_WIDENING: f64 = 0.8;
/// Vertical droop at full sag, as a fraction of top height
const SAG_DROP: f64 = 0.08;
/// Lateral droop at full sag, as a fraction of |bend|
const SAG_LEAN: f64 = 0.5;
const SAG_EXPONENT: f64 = 0.8;

/// Static shape parameters of the main branch for one run
#[derive(Debug, Clone, PartialEq)]
pub struct BranchParameters {
    pub base_width: f64,
    pub top_height: f64,
    pub right_bend: f64,
    pub left_bend: f64,
    /// Thickness multiplier reached at full growth (>= 1)
    pub end_thicken: f64,
    pub fill_color: String,
    pub hook: Hook,
}

/// Where the branch stands on the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchRoot {
    pub center_x: f64,
    pub ground_y: f64,
}

/// Silhouette of the main branch at one progress value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchGeometry {
    /// Eased progress that drove this shape
    pub pe: f64,
    pub height: f64,
    pub half_base: f64,
    pub thickness_factor: f64,
    pub base_left: Vec2,
    pub base_right: Vec2,
    pub bend: f64,
    pub sag: Vec2,
    pub tip: Vec2,
    /// Left side: first and second inner control points going base → tip
    pub left_cp1: Vec2,
    pub left_cp2: Vec2,
    /// Right side: first and second inner control points going tip → base
    pub right_cp1: Vec2,
    pub right_cp2: Vec2,
}

impl BranchGeometry {
    /// Left edge from the left base corner up to the tip
    pub fn left_edge(&self) -> CubicBezier {
        CubicBezier::new(self.base_left, self.left_cp1, self.left_cp2, self.tip)
    }

    /// Right edge from the tip down to the right base corner
    pub fn right_edge(&self) -> CubicBezier {
        CubicBezier::new(self.tip, self.right_cp1, self.right_cp2, self.base_right)
    }

    /// Right edge traversed upward, base → tip
    pub fn right_edge_upward(&self) -> CubicBezier {
        CubicBezier::new(self.base_right, self.right_cp2, self.right_cp1, self.tip)
    }
}

/// Thickness multiplier at eased progress `pe`; flat until late growth
pub fn thickness_factor(pe: f64, end_thicken: f64) -> f64 {
    let ramp = if pe > LATE_GROWTH {
        ease_out_cubic((pe - LATE_GROWTH) / (1.0 - LATE_GROWTH))
    } else {
        0.0
    };
    1.0 + (end_thicken - 1.0) * ramp
}

/// Gravity droop `(sag_x, sag_y)` for eased progress and current bend
pub fn sag(pe: f64, top_height: f64, bend: f64) -> Vec2 {
    let factor = if pe > LATE_GROWTH {
        ((pe - LATE_GROWTH) / (1.0 - LATE_GROWTH)).powf(SAG_EXPONENT)
    } else {
        0.0
    };
    Vec2::new(
        -bend.abs() * SAG_LEAN * factor,
        top_height * SAG_DROP * factor,
    )
}

/// Compute the branch silhouette at raw growth progress `p` in [0, 1].
///
/// The model eases `p` itself. Output depends only on the arguments.
pub fn branch_shape(root: BranchRoot, p: f64, params: &BranchParameters) -> BranchGeometry {
    let BranchRoot { center_x, ground_y } = root;
    let pe = ease_out_cubic(p);

    let thickness = thickness_factor(pe, params.end_thicken);
    let height = params.top_height * pe;
    let half_base = params.base_width * (1.0 + (thickness - 1.0) * BASE_WIDENING) / 2.0;

    let base_left = Vec2::new(center_x - half_base, ground_y);
    let base_right = Vec2::new(center_x + half_base, ground_y);

    let bend = composite_bend(pe, params.right_bend, params.left_bend, params.hook);
    let sag = sag(pe, params.top_height, bend);

    let tip = Vec2::new(
        center_x + bend * pe + sag.x,
        ground_y - height + sag.y,
    );

    let extra = thickness - 1.0;
    let left_cp1 = Vec2::new(
        base_left.x + half_base * 0.15 + bend * 0.05,
        ground_y - height * 0.08 + sag.y * 0.1,
    );
    let left_cp2 = Vec2::new(
        center_x - half_base * 0.25 + bend * 0.15 + half_base * 0.15 * extra,
        ground_y - height * 0.5 + sag.y * 0.4,
    );
    let right_cp1 = Vec2::new(
        center_x + half_base * 0.25 + bend * 0.05 + sag.x * 0.05 + half_base * 0.08 * extra,
        ground_y - height * 0.48 + sag.y * 0.3,
    );
    let right_cp2 = Vec2::new(
        base_right.x - half_base * 0.15 + bend * 0.02,
        ground_y - height * 0.1 + sag.y * 0.05,
    );

    BranchGeometry {
        pe,
        height,
        half_base,
        thickness_factor: thickness,
        base_left,
        base_right,
        bend,
        sag,
        tip,
        left_cp1,
        left_cp2,
        right_cp1,
        right_cp2,
    }
}
