//! Prelude module for common qibla types and traits
//!
//! `use qibla::prelude::*;` brings in the state model, the service traits and
//! the map surface seam.

pub use crate::core::{
    config::{PathConfig, QiblaConfig, SearchConfig, TileConfig},
    constants::KAABA,
    geo::{LatLng, Point, TileCoord},
    viewport::Viewport,
};

pub use crate::geodesic::{GeodesicPath, PathStyle};

pub use crate::map::{
    binding::{MapBinding, MapSurface, SyncReport},
    style::MapStyle,
};

pub use crate::runtime::{AsyncHandle, AsyncSpawner};

pub use crate::screen::Screen;

pub use crate::search::{
    AutocompleteService, NominatimClient, Place, PlaceLookupService, Suggestion,
};

pub use crate::state::{camera::CameraCommand, marker::Marker, Mode, ScreenState};

#[cfg(feature = "egui")]
pub use crate::{map::view::MapView, ui::QiblaApp};

pub use crate::{Error, QiblaError, Result};
