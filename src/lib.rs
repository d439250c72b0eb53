//! # Qibla
//!
//! A single-screen map application for finding the Qibla: mark a point on
//! the map (or find it by searching for a place) and see the great-circle
//! path from there to the Kaaba.
//!
//! The state logic ([`state`], [`screen`], [`map::binding`]) is independent
//! of any window or network; the egui surface ([`map::view`], [`ui`]) and
//! the HTTP places client ([`search::nominatim`]) plug in through traits.

pub mod background;
pub mod core;
pub mod geodesic;
pub mod map;
pub mod prelude;
pub mod runtime;
pub mod screen;
pub mod search;
pub mod state;
pub mod tiles;
#[cfg(feature = "egui")]
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    config::QiblaConfig,
    geo::{LatLng, Point, TileCoord},
    viewport::Viewport,
};

pub use geodesic::{GeodesicPath, PathStyle};
pub use map::{
    binding::{MapBinding, MapSurface},
    style::MapStyle,
};
pub use screen::Screen;
pub use search::{Place, Suggestion};
pub use state::{camera::CameraCommand, marker::Marker, Mode, ScreenState};
#[cfg(feature = "egui")]
pub use ui::{QiblaApp, UiAction};

/// Installs the env_logger backend, defaulting to `info` when `RUST_LOG` is unset.
/// Safe to call more than once.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum QiblaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

/// Error type alias for convenience
pub type Error = QiblaError;
