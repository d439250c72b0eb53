use crate::core::constants::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, TILE_SIZE};
use crate::core::geo::{LatLng, Point, TileCoord};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
}

/// Inclusive range of tiles covering a viewport at one integer zoom level.
/// `min_x`/`max_x` may run outside `[0, 2^z)` when the view crosses the
/// antimeridian; callers wrap them with [`TileRange::wrap_x`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    pub zoom: u8,
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl TileRange {
    pub fn wrap_x(&self, x: i64) -> u32 {
        let n = TileCoord::tiles_per_axis(self.zoom) as i64;
        x.rem_euclid(n) as u32
    }
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        let mut viewport = Self {
            center: LatLng::default(),
            zoom: zoom.clamp(DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM),
            size,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        };
        viewport.set_center(center);
        viewport
    }

    /// Sets the center of the viewport, wrapping longitude and clamping latitude
    pub fn set_center(&mut self, center: LatLng) {
        self.center = center.normalized();
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Sets the zoom limits
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    /// Width of the whole world in pixels at the given zoom
    pub fn world_size(zoom: f64) -> f64 {
        TILE_SIZE as f64 * 2_f64.powf(zoom)
    }

    /// Projects a LatLng to world pixel coordinates (Web Mercator, EPSG:3857).
    /// Longitudes outside [-180, 180] project linearly past the world edge,
    /// which keeps unwrapped polylines continuous.
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let scale = Self::world_size(zoom.unwrap_or(self.zoom));
        let lat_rad = LatLng::clamp_lat(lat_lng.lat).to_radians();

        let x = (lat_lng.lng + 180.0) / 360.0 * scale;
        let y = (1.0 - (PI / 4.0 + lat_rad / 2.0).tan().ln() / PI) / 2.0 * scale;

        Point::new(x, y)
    }

    /// Unprojects world pixel coordinates back to LatLng
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let scale = Self::world_size(zoom.unwrap_or(self.zoom));

        let lng = pixel.x / scale * 360.0 - 180.0;
        let n = PI * (1.0 - 2.0 * pixel.y / scale);
        let lat = n.sinh().atan().to_degrees();

        LatLng::new(lat, lng)
    }

    /// Converts a geographical coordinate to container pixel coordinates
    /// (origin at the top-left corner of the viewport)
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let origin = self.top_left_world();
        self.project(lat_lng, None).subtract(&origin)
    }

    /// Converts container pixel coordinates back to geographical coordinates
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let world = pixel.add(&self.top_left_world());
        self.unproject(&world, None)
    }

    /// World pixel coordinate of the viewport's top-left corner
    fn top_left_world(&self) -> Point {
        self.project(&self.center, None)
            .subtract(&self.size.multiply(0.5))
    }

    /// Pans the viewport by a drag delta in pixels. Dragging right moves the
    /// center west, the way a hand-dragged map moves.
    pub fn pan(&mut self, delta: Point) {
        let center_px = self.project(&self.center, None);
        let new_center = self.unproject(&center_px.subtract(&delta), None);
        self.set_center(new_center);
    }

    /// Zooms to a level keeping `focus_point` (container pixels) stationary
    pub fn zoom_to(&mut self, zoom: f64, focus_point: Option<Point>) {
        let new_zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < 0.001 {
            return;
        }

        match focus_point {
            Some(focus_screen) => {
                let focus_latlng = self.pixel_to_lat_lng(&focus_screen);
                self.zoom = new_zoom;
                let drifted = self.lat_lng_to_pixel(&focus_latlng);
                self.pan(focus_screen.subtract(&drifted));
            }
            None => self.zoom = new_zoom,
        }
    }

    /// Integer zoom level used to pick raster tiles
    pub fn tile_zoom(&self) -> u8 {
        self.zoom.round().clamp(0.0, 22.0) as u8
    }

    /// Tiles needed to cover the viewport at [`Viewport::tile_zoom`]
    pub fn visible_tiles(&self) -> TileRange {
        let zoom = self.tile_zoom();
        let top_left = self.top_left_world();
        let tile_span = TILE_SIZE as f64 * 2_f64.powf(self.zoom - zoom as f64);
        let n = TileCoord::tiles_per_axis(zoom) as i64;

        TileRange {
            zoom,
            min_x: (top_left.x / tile_span).floor() as i64,
            max_x: ((top_left.x + self.size.x) / tile_span).floor() as i64,
            min_y: ((top_left.y / tile_span).floor() as i64).max(0),
            max_y: (((top_left.y + self.size.y) / tile_span).floor() as i64).min(n - 1),
        }
    }

    /// Screen rectangle (min, max in container pixels) of a tile; `x` is the
    /// unwrapped column so copies of the world line up side by side
    pub fn tile_screen_bounds(&self, zoom: u8, x: i64, y: i64) -> (Point, Point) {
        let tile_span = TILE_SIZE as f64 * 2_f64.powf(self.zoom - zoom as f64);
        let top_left = self.top_left_world();
        let min = Point::new(x as f64 * tile_span, y as f64 * tile_span).subtract(&top_left);
        let max = Point::new(min.x + tile_span, min.y + tile_span);
        (min, max)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), DEFAULT_MIN_ZOOM, Point::new(800.0, 600.0))
    }
}
