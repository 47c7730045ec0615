use serde::Deserialize;

/// Surface shape class chosen by the host page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutClass {
    /// Taller than wide; the show ends after the bloom
    Portrait,
    /// Wide but narrow in absolute terms (phones held sideways)
    CompactLandscape,
    Landscape,
}

impl LayoutClass {
    /// Classify a surface by its CSS-pixel size
    pub fn classify(width: f64, height: f64, compact_width: f64) -> LayoutClass {
        if height > width {
            LayoutClass::Portrait
        } else if width < compact_width {
            LayoutClass::CompactLandscape
        } else {
            LayoutClass::Landscape
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutClass::Portrait => "portrait",
            LayoutClass::CompactLandscape => "compact_landscape",
            LayoutClass::Landscape => "landscape",
        }
    }
}
