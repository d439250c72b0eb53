pub mod cache;
pub mod loader;
pub mod source;

use crate::core::geo::TileCoord;
use crate::map::style::MapStyle;

// Re-exports for convenience
pub use cache::TileCache;
pub use loader::TileLoader;
pub use source::{TemplateSource, TileSource};

/// A tile of one particular base style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub style: MapStyle,
    pub coord: TileCoord,
}

impl TileKey {
    pub fn new(style: MapStyle, coord: TileCoord) -> Self {
        Self { style, coord }
    }
}
