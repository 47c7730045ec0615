pub mod heart_region;
pub mod hearts;

pub use heart_region::HeartRegionShape;
pub use hearts::{HeartParticle, HeartStyle, ParticleSet};
