//! Application configuration
//!
//! Everything here has a sensible default so the app runs with no file at
//! all. A JSON file named by the `QIBLA_CONFIG` environment variable can
//! override any subset of fields.

use crate::core::constants::{
    DEFAULT_MAX_SUGGESTIONS, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_PATH_SEGMENT_KM,
    DEFAULT_ZOOM, KAABA, PATH_STROKE_RGBA, PATH_STROKE_WIDTH,
};
use crate::core::geo::LatLng;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming an optional JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "QIBLA_CONFIG";

const USER_AGENT: &str = concat!("qibla/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QiblaConfig {
    /// Map center before the user has panned or placed a marker
    pub initial_center: LatLng,
    pub initial_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// End point of every path
    pub destination: LatLng,
    pub search: SearchConfig,
    pub tiles: TileConfig,
    pub path: PathConfig,
}

impl Default for QiblaConfig {
    fn default() -> Self {
        Self {
            initial_center: LatLng::default(),
            initial_zoom: DEFAULT_ZOOM,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            destination: KAABA,
            search: SearchConfig::default(),
            tiles: TileConfig::default(),
            path: PathConfig::default(),
        }
    }
}

/// Places service settings
///
/// The default endpoint is the public OpenStreetMap Nominatim instance,
/// whose usage policy allows at most one request per second and forbids
/// search-as-you-type clients. It is only suitable for light personal use;
/// point `endpoint` at a self-hosted or commercial Nominatim-compatible
/// service for anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL of a Nominatim-compatible API
    pub endpoint: String,
    pub user_agent: String,
    pub max_suggestions: usize,
    pub request_timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: USER_AGENT.to_string(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            request_timeout_ms: 10_000,
        }
    }
}

/// Raster tile settings. URL templates use `{z}`, `{x}` and `{y}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    pub standard_url: String,
    pub satellite_url: String,
    pub user_agent: String,
    /// Maximum number of decoded-ready tile payloads kept in memory
    pub cache_size: usize,
    pub max_attempts: usize,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            standard_url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            satellite_url:
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
                    .to_string(),
            user_agent: USER_AGENT.to_string(),
            cache_size: 512,
            max_attempts: 2,
        }
    }
}

/// Look of the great-circle overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Spacing of the densified great-circle points, in kilometres
    pub segment_km: f64,
    pub stroke_width: f32,
    pub stroke_rgba: [u8; 4],
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            segment_km: DEFAULT_PATH_SEGMENT_KM,
            stroke_width: PATH_STROKE_WIDTH,
            stroke_rgba: PATH_STROKE_RGBA,
        }
    }
}

impl QiblaConfig {
    /// Loads a configuration from a JSON file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file named by `QIBLA_CONFIG`, or the defaults when it is unset
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                log::info!("loading configuration from {:?}", path);
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.initial_center.is_valid() {
            return Err(Error::InvalidCoordinates(format!(
                "initial_center {}",
                self.initial_center
            )));
        }
        if !self.destination.is_valid() {
            return Err(Error::InvalidCoordinates(format!(
                "destination {}",
                self.destination
            )));
        }
        if self.min_zoom < 0.0 || self.min_zoom > self.max_zoom {
            return Err(Error::Config(format!(
                "zoom limits {}..{} are inverted or negative",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.path.segment_km <= 0.0 {
            return Err(Error::Config("path.segment_km must be positive".to_string()));
        }
        for template in [&self.tiles.standard_url, &self.tiles.satellite_url] {
            if !(template.contains("{z}") && template.contains("{x}") && template.contains("{y}")) {
                return Err(Error::Config(format!(
                    "tile URL template {template:?} needs {{z}}, {{x}} and {{y}}"
                )));
            }
        }
        if self.search.max_suggestions == 0 {
            return Err(Error::Config("search.max_suggestions must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = QiblaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.destination, KAABA);
        assert_eq!(config.path.stroke_width, 2.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: QiblaConfig =
            serde_json::from_str(r#"{ "initial_zoom": 5.0, "search": { "max_suggestions": 3 } }"#)
                .unwrap();

        assert_eq!(config.initial_zoom, 5.0);
        assert_eq!(config.search.max_suggestions, 3);
        assert_eq!(config.search.endpoint, SearchConfig::default().endpoint);
        assert_eq!(config.tiles, TileConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = QiblaConfig::default();
        config.destination = LatLng::new(100.0, 0.0);
        assert!(matches!(config.validate(), Err(Error::InvalidCoordinates(_))));

        let mut config = QiblaConfig::default();
        config.tiles.standard_url = "https://example.com/tile.png".to_string();
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = QiblaConfig::default();
        config.min_zoom = 10.0;
        config.max_zoom = 2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("qibla-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "destination": { "lat": 1.5, "lng": 2.5 } }"#).unwrap();

        let config = QiblaConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.destination, LatLng::new(1.5, 2.5));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = QiblaConfig::load("/nonexistent/qibla.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
