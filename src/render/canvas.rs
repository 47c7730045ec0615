use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use crate::math::Vec2;
use super::surface::{Layer, Path, PathSegment, Surface};

/// [`Surface`] backed by a canvas 2D context
pub struct Canvas2dSurface {
    pub ctx: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Grab the 2D context of `canvas`
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| format!("Failed to get 2D context: {:?}", e))?
            .ok_or("Canvas has no 2D context")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Context is not a CanvasRenderingContext2d".to_string())?;
        Ok(Self::new(ctx))
    }

    /// Size the backing store for `dpr` and draw in CSS pixels from now on
    pub fn fit(&self, canvas: &HtmlCanvasElement, css_width: f64, css_height: f64, dpr: f64) -> Result<(), String> {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        canvas.set_width((css_width.max(0.0) * dpr).round() as u32);
        canvas.set_height((css_height.max(0.0) * dpr).round() as u32);
        self.ctx
            .set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
            .map_err(|e| format!("Failed to set transform: {:?}", e))
    }

    fn trace(&self, path: &Path) {
        let ctx = &self.ctx;
        ctx.begin_path();
        for segment in &path.segments {
            match *segment {
                PathSegment::MoveTo(p) => ctx.move_to(p.x, p.y),
                PathSegment::LineTo(p) => ctx.line_to(p.x, p.y),
                PathSegment::CubicTo(c1, c2, p) => {
                    ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y)
                }
                PathSegment::Close => ctx.close_path(),
            }
        }
    }
}

impl Surface for Canvas2dSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        if let Err(e) = self.ctx.translate(dx, dy) {
            log::error!("canvas translate failed: {:?}", e);
        }
    }

    fn fill_path(&mut self, _layer: Layer, path: &Path, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.trace(path);
        self.ctx.fill();
    }

    fn fill_circle(&mut self, _layer: Layer, center: Vec2, radius: f64, color: &str) {
        let ctx = &self.ctx;
        ctx.begin_path();
        if let Err(e) = ctx.arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU) {
            log::error!("canvas arc failed: {:?}", e);
            return;
        }
        ctx.set_fill_style_str(color);
        ctx.fill();
    }

    fn stroke_line(&mut self, _layer: Layer, from: Vec2, to: Vec2, color: &str, width: f64) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(width);
        ctx.stroke();
    }
}
