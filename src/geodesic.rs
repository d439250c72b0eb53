//! Great-circle path from the marker to the destination
//!
//! The curve itself comes from `geo`'s haversine helpers; this module only
//! densifies it for drawing and keeps longitudes continuous so the line does
//! not jump across the map when it crosses the antimeridian.

use crate::core::config::PathConfig;
use crate::core::constants::{DEFAULT_PATH_SEGMENT_KM, PATH_STROKE_RGBA, PATH_STROKE_WIDTH};
use crate::core::geo::LatLng;
use geo::{HaversineBearing, HaversineDistance, HaversineIntermediate};

/// A geodesic line between two coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct GeodesicPath {
    start: LatLng,
    end: LatLng,
    points: Vec<LatLng>,
}

impl GeodesicPath {
    pub fn new(start: LatLng, end: LatLng) -> Self {
        Self::with_segment_km(start, end, DEFAULT_PATH_SEGMENT_KM)
    }

    /// Builds the path with intermediate points at most `segment_km` apart
    pub fn with_segment_km(start: LatLng, end: LatLng, segment_km: f64) -> Self {
        let from = start.to_geo_point();
        let to = end.to_geo_point();
        let filled = from.haversine_intermediate_fill(&to, segment_km.max(1.0) * 1000.0, true);

        // Antipodal endpoints have no unique great circle; fall back to the chord
        let points = if filled.iter().any(|p| !p.x().is_finite() || !p.y().is_finite()) {
            log::debug!("great circle {} -> {} is undefined, drawing endpoints only", start, end);
            vec![start, end]
        } else {
            filled.into_iter().map(LatLng::from_geo_point).collect()
        };

        Self {
            start,
            end,
            points: unwrap_longitudes(points),
        }
    }

    pub fn start(&self) -> LatLng {
        self.start
    }

    pub fn end(&self) -> LatLng {
        self.end
    }

    /// The two control coordinates the path was built from
    pub fn endpoints(&self) -> [LatLng; 2] {
        [self.start, self.end]
    }

    /// Densified points, first == start, last == end (modulo a 360° longitude shift)
    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    /// Great-circle distance in kilometres
    pub fn distance_km(&self) -> f64 {
        self.start.to_geo_point().haversine_distance(&self.end.to_geo_point()) / 1000.0
    }

    /// Initial bearing from the start toward the end, degrees clockwise from north in [0, 360)
    pub fn initial_bearing(&self) -> f64 {
        let bearing = self
            .start
            .to_geo_point()
            .haversine_bearing(self.end.to_geo_point());
        bearing.rem_euclid(360.0)
    }
}

/// Shifts each longitude by whole turns so neighbours never differ by more than 180°
fn unwrap_longitudes(points: Vec<LatLng>) -> Vec<LatLng> {
    let mut out: Vec<LatLng> = Vec::with_capacity(points.len());
    for point in points {
        let lng = match out.last() {
            Some(prev) => {
                let mut lng = point.lng;
                while lng - prev.lng > 180.0 {
                    lng -= 360.0;
                }
                while lng - prev.lng < -180.0 {
                    lng += 360.0;
                }
                lng
            }
            None => point.lng,
        };
        out.push(LatLng::new(point.lat, lng));
    }
    out
}

/// Fixed look of the path overlay: always a solid line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStyle {
    pub stroke_rgba: [u8; 4],
    pub stroke_width: f32,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            stroke_rgba: PATH_STROKE_RGBA,
            stroke_width: PATH_STROKE_WIDTH,
        }
    }
}

impl From<&PathConfig> for PathStyle {
    fn from(config: &PathConfig) -> Self {
        Self {
            stroke_rgba: config.stroke_rgba,
            stroke_width: config.stroke_width,
        }
    }
}
