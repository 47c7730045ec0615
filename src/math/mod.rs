pub mod vec2;
pub mod bezier;

pub use vec2::Vec2;
pub use bezier::CubicBezier;
