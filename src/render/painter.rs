//! Turns branch and heart geometry into filled outlines

use crate::data::Scene;
use crate::growth::{BranchGeometry, ThinBranchGeometry};
use crate::math::Vec2;
use super::surface::{Layer, Path, Surface};

/// Trunk outline: left edge up to the tip, right edge back down, closed
pub fn trunk_path(shape: &BranchGeometry) -> Path {
    Path::new()
        .move_to(shape.base_left)
        .cubic_to(shape.left_cp1, shape.left_cp2, shape.tip)
        .cubic_to(shape.right_cp1, shape.right_cp2, shape.base_right)
        .close()
}

/// Thin branch ribbon: out along one side, across the tip, back along the other
pub fn twig_path(shape: &ThinBranchGeometry) -> Path {
    let [a0, a1, a2, a3] = shape.edge(1.0);
    let [b0, b1, b2, b3] = shape.edge(-1.0);
    Path::new()
        .move_to(a0)
        .cubic_to(a1, a2, a3)
        .line_to(b3)
        .cubic_to(b2, b1, b0)
        .close()
}

/// Heart glyph of `size` centred near `at`
pub fn heart_path(at: Vec2, size: f64) -> Path {
    let s = size * 0.1;
    let Vec2 { x, y } = at;
    Path::new()
        .move_to(Vec2::new(x, y - 3.0 * s))
        .cubic_to(
            Vec2::new(x - 5.0 * s, y - 10.0 * s),
            Vec2::new(x - 12.0 * s, y - 5.0 * s),
            Vec2::new(x, y + 8.0 * s),
        )
        .cubic_to(
            Vec2::new(x + 12.0 * s, y - 5.0 * s),
            Vec2::new(x + 5.0 * s, y - 10.0 * s),
            Vec2::new(x, y - 3.0 * s),
        )
        .close()
}

/// Clear the surface and draw the ground line
pub fn paint_backdrop(surface: &mut dyn Surface, scene: &Scene) {
    surface.clear(scene.width, scene.height);
    let (from, to) = scene.ground_line();
    surface.stroke_line(Layer::Ground, from, to, &scene.ground.color, scene.ground.line_width);
}

pub fn paint_trunk(surface: &mut dyn Surface, shape: &BranchGeometry, color: &str) {
    surface.fill_path(Layer::Trunk, &trunk_path(shape), color);
}

pub fn paint_twig(surface: &mut dyn Surface, shape: &ThinBranchGeometry, color: &str) {
    surface.fill_path(Layer::Twig, &twig_path(shape), color);
    if let Some(radius) = shape.cap_radius {
        surface.fill_circle(Layer::Twig, shape.end, radius, color);
    }
}

pub fn paint_heart(surface: &mut dyn Surface, at: Vec2, size: f64, color: &str) {
    if size > 0.0 {
        surface.fill_path(Layer::Heart, &heart_path(at, size), color);
    }
}
