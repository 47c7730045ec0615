use crate::math::Vec2;
use super::surface::{Layer, Path, Surface};

/// One call made against a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    Save,
    Restore,
    Translate { dx: f64, dy: f64 },
    Fill { layer: Layer, path: Path, color: String },
    Circle { layer: Layer, center: Vec2, radius: f64, color: String },
    Line { layer: Layer, from: Vec2, to: Vec2, color: String, width: f64 },
}

/// In-memory surface that keeps every draw call, for headless runs and tests
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the log, leaving the surface empty
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of fills, circles and lines on `layer`
    pub fn count_layer(&self, layer: Layer) -> usize {
        self.commands
            .iter()
            .filter(|c| match c {
                DrawCommand::Fill { layer: l, .. }
                | DrawCommand::Circle { layer: l, .. }
                | DrawCommand::Line { layer: l, .. } => *l == layer,
                _ => false,
            })
            .count()
    }

    /// Start points of every heart outline, in draw order
    pub fn heart_starts(&self) -> Vec<Vec2> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Fill { layer: Layer::Heart, path, .. } => path.start(),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.commands.push(DrawCommand::Translate { dx, dy });
    }

    fn fill_path(&mut self, layer: Layer, path: &Path, color: &str) {
        self.commands.push(DrawCommand::Fill {
            layer,
            path: path.clone(),
            color: color.to_string(),
        });
    }

    fn fill_circle(&mut self, layer: Layer, center: Vec2, radius: f64, color: &str) {
        self.commands.push(DrawCommand::Circle {
            layer,
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn stroke_line(&mut self, layer: Layer, from: Vec2, to: Vec2, color: &str, width: f64) {
        self.commands.push(DrawCommand::Line {
            layer,
            from,
            to,
            color: color.to_string(),
            width,
        });
    }
}
