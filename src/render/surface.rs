//! Drawing seam: the `Surface` trait and the `Path` outline builder

use crate::math::Vec2;

/// What a draw call belongs to; backends may ignore it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Ground,
    Trunk,
    Twig,
    Heart,
}

/// One outline instruction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Vec2),
    LineTo(Vec2),
    CubicTo(Vec2, Vec2, Vec2),
    Close,
}

/// Closed outline built from line and cubic segments
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    pub segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, p: Vec2) -> Self {
        self.segments.push(PathSegment::MoveTo(p));
        self
    }

    pub fn line_to(mut self, p: Vec2) -> Self {
        self.segments.push(PathSegment::LineTo(p));
        self
    }

    pub fn cubic_to(mut self, c1: Vec2, c2: Vec2, end: Vec2) -> Self {
        self.segments.push(PathSegment::CubicTo(c1, c2, end));
        self
    }

    pub fn close(mut self) -> Self {
        self.segments.push(PathSegment::Close);
        self
    }

    /// Starting point of the outline
    pub fn start(&self) -> Option<Vec2> {
        self.segments.iter().find_map(|s| match *s {
            PathSegment::MoveTo(p) => Some(p),
            _ => None,
        })
    }

    pub fn is_finite(&self) -> bool {
        self.segments.iter().all(|s| match *s {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => p.is_finite(),
            PathSegment::CubicTo(a, b, c) => a.is_finite() && b.is_finite() && c.is_finite(),
            PathSegment::Close => true,
        })
    }
}

/// Drawing target for one frame.
///
/// Coordinates are CSS pixels; any device-pixel scaling is the backend's job.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn fill_path(&mut self, layer: Layer, path: &Path, color: &str);
    fn fill_circle(&mut self, layer: Layer, center: Vec2, radius: f64, color: &str);
    fn stroke_line(&mut self, layer: Layer, from: Vec2, to: Vec2, color: &str, width: f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_order() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, 4.0);
        let path = Path::new().move_to(a).cubic_to(a, b, b).line_to(a).close();
        assert_eq!(
            path.segments,
            vec![
                PathSegment::MoveTo(a),
                PathSegment::CubicTo(a, b, b),
                PathSegment::LineTo(a),
                PathSegment::Close,
            ]
        );
        assert_eq!(path.start(), Some(a));
        assert!(path.is_finite());
    }

    #[test]
    fn test_empty_path_has_no_start() {
        assert_eq!(Path::new().start(), None);
        assert!(!Path::new().move_to(Vec2::new(f64::NAN, 0.0)).is_finite());
    }
}
