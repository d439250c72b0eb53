use crate::core::config::TileConfig;
use crate::core::geo::TileCoord;
use crate::map::style::MapStyle;

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;
}

/// URL template with `{z}`, `{x}` and `{y}` placeholders
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSource {
    template: String,
}

impl TemplateSource {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn for_style(style: MapStyle, tiles: &TileConfig) -> Self {
        Self::new(style.url_template(tiles))
    }
}

impl TileSource for TemplateSource {
    fn url(&self, coord: TileCoord) -> String {
        self.template
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
    }
}
