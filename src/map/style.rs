use crate::core::config::TileConfig;
use serde::{Deserialize, Serialize};

/// Base map imagery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MapStyle {
    #[default]
    Standard,
    Satellite,
}

impl MapStyle {
    pub fn toggled(self) -> Self {
        match self {
            Self::Standard => Self::Satellite,
            Self::Satellite => Self::Standard,
        }
    }

    /// Label for the toggle button: names the current style
    pub fn icon(self) -> &'static str {
        match self {
            Self::Standard => "🗺",
            Self::Satellite => "🌐",
        }
    }

    pub fn url_template(self, tiles: &TileConfig) -> &str {
        match self {
            Self::Standard => &tiles.standard_url,
            Self::Satellite => &tiles.satellite_url,
        }
    }

    pub fn attribution(self) -> &'static str {
        match self {
            Self::Standard => "© OpenStreetMap contributors",
            Self::Satellite => "Imagery © Esri",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_an_involution() {
        assert_eq!(MapStyle::default(), MapStyle::Standard);
        assert_eq!(MapStyle::Standard.toggled(), MapStyle::Satellite);
        assert_eq!(MapStyle::Standard.toggled().toggled(), MapStyle::Standard);
    }

    #[test]
    fn test_url_template_per_style() {
        let tiles = TileConfig::default();
        assert!(MapStyle::Standard.url_template(&tiles).contains("openstreetmap"));
        assert!(MapStyle::Satellite.url_template(&tiles).contains("World_Imagery"));
    }
}
