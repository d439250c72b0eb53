use serde::{Deserialize, Serialize};

/// Web Mercator projection constants
const MAX_LATITUDE: f64 = 85.0511287798;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Wraps longitude to [-180, 180] range
    pub fn wrap_lng(lng: f64) -> f64 {
        let wrapped = lng % 360.0;
        if wrapped > 180.0 {
            wrapped - 360.0
        } else if wrapped < -180.0 {
            wrapped + 360.0
        } else {
            wrapped
        }
    }

    /// Clamps latitude to the range Web Mercator can display
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Returns a copy with the longitude wrapped and latitude clamped for display
    pub fn normalized(&self) -> Self {
        Self::new(Self::clamp_lat(self.lat), Self::wrap_lng(self.lng))
    }

    /// `geo` uses x = longitude, y = latitude
    pub fn to_geo_point(&self) -> geo::Point<f64> {
        geo::Point::new(self.lng, self.lat)
    }

    pub fn from_geo_point(point: geo::Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }

    /// Approximate equality, used when comparing centers coming back from the map surface
    pub fn approx_eq(&self, other: &LatLng, epsilon: f64) -> bool {
        (self.lat - other.lat).abs() <= epsilon && (self.lng - other.lng).abs() <= epsilon
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a tile coordinate in the slippy map tile system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Number of tiles along one axis at this zoom
    pub fn tiles_per_axis(zoom: u8) -> u32 {
        1u32 << zoom
    }

    /// Checks if the tile is valid for the given zoom level
    pub fn is_valid(&self) -> bool {
        let max_coord = Self::tiles_per_axis(self.z);
        self.x < max_coord && self.y < max_coord
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(21.42251, 39.82619);
        assert_eq!(coord.lat, 21.42251);
        assert_eq!(coord.lng, 39.82619);
        assert!(coord.is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
    }

    #[test]
    fn test_wrap_and_clamp() {
        assert_eq!(LatLng::wrap_lng(190.0), -170.0);
        assert_eq!(LatLng::wrap_lng(-190.0), 170.0);
        assert_eq!(LatLng::clamp_lat(89.0), MAX_LATITUDE);

        let normalized = LatLng::new(-89.0, 540.0).normalized();
        assert_eq!(normalized.lat, -MAX_LATITUDE);
        assert_eq!(normalized.lng, 180.0);
    }

    #[test]
    fn test_geo_point_axis_order() {
        let mecca = LatLng::new(21.42251, 39.82619);
        let point = mecca.to_geo_point();
        assert_eq!(point.x(), 39.82619);
        assert_eq!(point.y(), 21.42251);
        assert_eq!(LatLng::from_geo_point(point), mecca);
    }

    #[test]
    fn test_tile_coord_bounds() {
        assert_eq!(TileCoord::tiles_per_axis(0), 1);
        assert_eq!(TileCoord::tiles_per_axis(3), 8);
        assert!(TileCoord::new(7, 7, 3).is_valid());
        assert!(!TileCoord::new(8, 0, 3).is_valid());
        assert!(!TileCoord::new(0, 1, 0).is_valid());
    }
}
