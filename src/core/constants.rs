//! Engine-wide constants. Anything a user may want to change lives in
//! [`crate::core::config::QiblaConfig`] instead; these are the defaults it falls back to.

use crate::core::geo::LatLng;

/// Latitude of the Kaaba, the fixed end of every path.
pub const KAABA_LAT: f64 = 21.42251;

/// Longitude of the Kaaba.
pub const KAABA_LNG: f64 = 39.82619;

/// The fixed destination coordinate.
pub const KAABA: LatLng = LatLng {
    lat: KAABA_LAT,
    lng: KAABA_LNG,
};

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Default spacing between densified great-circle points, in kilometres.
pub const DEFAULT_PATH_SEGMENT_KM: f64 = 50.0;

/// Stroke width of the path overlay in points.
pub const PATH_STROKE_WIDTH: f32 = 2.0;

/// Stroke color of the path overlay (opaque blue).
pub const PATH_STROKE_RGBA: [u8; 4] = [0, 0, 255, 255];

pub const DEFAULT_MIN_ZOOM: f64 = 1.0;
pub const DEFAULT_MAX_ZOOM: f64 = 18.0;
pub const DEFAULT_ZOOM: f64 = 2.0;

/// Programmatic +/- zoom step for the zoom buttons.
pub const DEFAULT_ZOOM_DELTA: f64 = 1.0;

/// Maximum number of suggestions requested from the places service.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 8;
