pub mod surface;
pub mod painter;
pub mod canvas;
pub mod recording;

pub use surface::{Layer, Path, PathSegment, Surface};
pub use canvas::Canvas2dSurface;
pub use recording::{DrawCommand, RecordingSurface};
