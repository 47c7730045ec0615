use super::Vec2;

/// Cubic Bezier segment defined by four control points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    pub p3: Vec2,
}

impl CubicBezier {
    pub const fn new(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Bernstein-weighted position at `t` in [0, 1]
    pub fn point(&self, t: f64) -> Vec2 {
        let u = 1.0 - t;
        let tt = t * t;
        let uu = u * u;
        let uuu = uu * u;
        let ttt = tt * t;

        self.p0.scale(uuu)
            + self.p1.scale(3.0 * uu * t)
            + self.p2.scale(3.0 * u * tt)
            + self.p3.scale(ttt)
    }

    /// Analytic first derivative at `t` (not normalized)
    pub fn derivative(&self, t: f64) -> Vec2 {
        let u = 1.0 - t;
        let a = (self.p1 - self.p0).scale(u * u);
        let b = (self.p2 - self.p1).scale(2.0 * u * t);
        let c = (self.p3 - self.p2).scale(t * t);
        (a + b + c).scale(3.0)
    }

    /// Unit tangent at `t`. A degenerate derivative yields the zero vector.
    pub fn tangent(&self, t: f64) -> Vec2 {
        self.derivative(t).normalize()
    }
}
