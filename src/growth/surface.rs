//! Point and local frame on the main branch outline

use serde::Deserialize;
use crate::math::Vec2;
use super::trunk::{branch_shape, BranchParameters, BranchRoot};

/// Side of the main branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// Position on the branch outline with its unit tangent and outward normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    pub position: Vec2,
    pub tangent: Vec2,
    pub normal: Vec2,
}

/// Sample the outline of the branch grown to raw progress `p`.
///
/// The side's edge curve is evaluated at the eased progress, so lower
/// progress values land lower on a shorter branch. The normal is flipped
/// when needed so it points away from the branch centreline.
pub fn sample_surface(
    root: BranchRoot,
    p: f64,
    side: Side,
    params: &BranchParameters,
) -> SurfaceSample {
    let shape = branch_shape(root, p, params);
    let t = shape.pe;

    let edge = match side {
        Side::Left => shape.left_edge(),
        Side::Right => shape.right_edge_upward(),
    };

    let position = edge.point(t);
    let tangent = edge.tangent(t);
    let mut normal = tangent.perpendicular();

    let points_inward = match side {
        Side::Left => normal.x > 0.0,
        Side::Right => normal.x < 0.0,
    };
    if points_inward {
        normal = -normal;
    }

    SurfaceSample {
        position,
        tangent,
        normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::Hook;

    fn params() -> BranchParameters {
        BranchParameters {
            base_width: 24.0,
            top_height: 300.0,
            right_bend: 1.0,
            left_bend: -25.0,
            end_thicken: 2.5,
            fill_color: "#14b79b".to_string(),
            hook: Hook::default(),
        }
    }

    const ROOT: BranchRoot = BranchRoot { center_x: 400.0, ground_y: 596.0 };

    #[test]
    fn test_frame_is_orthonormal() {
        for side in [Side::Left, Side::Right] {
            for &p in &[0.1, 0.3, 0.45, 0.9] {
                let s = sample_surface(ROOT, p, side, &params());
                assert!((s.tangent.length() - 1.0).abs() < 1e-9);
                assert!((s.normal.length() - 1.0).abs() < 1e-9);
                assert!(s.tangent.dot(&s.normal).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_normals_point_outward() {
        for &p in &[0.25, 0.33, 0.45] {
            let left = sample_surface(ROOT, p, Side::Left, &params());
            let right = sample_surface(ROOT, p, Side::Right, &params());
            assert!(left.normal.x <= 0.0);
            assert!(right.normal.x >= 0.0);
        }
    }

    #[test]
    fn test_samples_lie_above_ground_and_left_of_right() {
        let left = sample_surface(ROOT, 0.45, Side::Left, &params());
        let right = sample_surface(ROOT, 0.45, Side::Right, &params());
        assert!(left.position.y < ROOT.ground_y);
        assert!(right.position.y < ROOT.ground_y);
        assert!(left.position.x < right.position.x);
    }

    #[test]
    fn test_zero_progress_falls_back_to_finite_frame() {
        // Every control point collapses onto the base corners at p = 0
        let s = sample_surface(ROOT, 0.0, Side::Left, &params());
        assert!(s.position.is_finite());
        assert!(s.tangent.is_finite());
        assert!(s.normal.is_finite());
    }
}
