pub mod config;
pub mod layout;
pub mod scene;

pub use config::{
    BloomConfig, GroundConfig, LayoutPreset, LayoutsConfig, ShowConfig, TimingConfig,
    TrunkConfig, TwigConfig,
};
pub use layout::LayoutClass;
pub use scene::Scene;
