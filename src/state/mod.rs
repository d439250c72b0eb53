//! State owned by the screen
//!
//! `ScreenState` is plain data plus the transitions the screen's buttons and
//! search results trigger. It knows nothing about widgets or services, so
//! every flow can be exercised in tests by calling these methods directly.

pub mod camera;
pub mod marker;

use crate::core::config::QiblaConfig;
use crate::core::geo::LatLng;
use crate::geodesic::{GeodesicPath, PathStyle};
use crate::map::style::MapStyle;
use crate::search::Place;
use camera::{CameraCommand, CameraQueue};
use marker::Marker;

/// Derived from marker presence; there is no way back to `Browsing`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    Located,
}

#[derive(Debug, Clone)]
pub struct ScreenState {
    center: LatLng,
    zoom: f64,
    marker: Option<Marker>,
    path: Option<GeodesicPath>,
    style: MapStyle,
    search_text: String,
    camera: CameraQueue,
    destination: LatLng,
    segment_km: f64,
    path_style: PathStyle,
}

impl ScreenState {
    pub fn new(config: &QiblaConfig) -> Self {
        Self {
            center: config.initial_center.normalized(),
            zoom: config.initial_zoom,
            marker: None,
            path: None,
            style: MapStyle::default(),
            search_text: String::new(),
            camera: CameraQueue::new(),
            destination: config.destination,
            segment_km: config.path.segment_km,
            path_style: PathStyle::from(&config.path),
        }
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    /// Zoom the map should open at; the live zoom belongs to the map surface
    pub fn initial_zoom(&self) -> f64 {
        self.zoom
    }

    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }

    pub fn path(&self) -> Option<&GeodesicPath> {
        self.path.as_ref()
    }

    pub fn path_style(&self) -> PathStyle {
        self.path_style
    }

    pub fn style(&self) -> MapStyle {
        self.style
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn destination(&self) -> LatLng {
        self.destination
    }

    pub fn mode(&self) -> Mode {
        if self.marker.is_some() {
            Mode::Located
        } else {
            Mode::Browsing
        }
    }

    /// True while a recenter is queued and not yet honored by a map sync
    pub fn recenter_pending(&self) -> bool {
        !self.camera.is_empty()
    }

    pub(crate) fn take_camera_commands(&mut self) -> Vec<CameraCommand> {
        self.camera.drain()
    }

    /// "Set Location": drop the marker at the current visual center
    pub fn set_location(&mut self) {
        let coordinate = self.center;
        log::info!("marker set at map center {}", coordinate);
        self.place_marker(Marker::new(coordinate));
    }

    /// A search result resolved: move marker and center there
    pub fn apply_place(&mut self, place: &Place) {
        log::info!("marker set at {} ({})", place.coordinate, place.name);
        self.center = place.coordinate;
        self.place_marker(Marker::new(place.coordinate).with_title(place.name.clone()));
    }

    fn place_marker(&mut self, marker: Marker) {
        let coordinate = marker.coordinate();
        self.path = Some(GeodesicPath::with_segment_km(
            coordinate,
            self.destination,
            self.segment_km,
        ));
        self.marker = Some(marker);
        self.camera.push(CameraCommand::CenterOn(coordinate));
    }

    /// Last write wins: user panning and recenters both land here
    pub fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }

    /// Returns whether the text actually changed
    pub fn set_search_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.search_text {
            return false;
        }
        self.search_text = text;
        true
    }

    pub fn clear_search(&mut self) {
        self.search_text.clear();
    }

    /// The suggestion list is only shown while there is search text
    pub fn suggestions_visible(&self) -> bool {
        !self.search_text.is_empty()
    }

    pub fn toggle_style(&mut self) -> MapStyle {
        self.style = self.style.toggled();
        log::debug!("map style now {:?}", self.style);
        self.style
    }

    /// Bearing from the marker to the destination, if a marker is set
    pub fn qibla_bearing(&self) -> Option<f64> {
        self.path.as_ref().map(GeodesicPath::initial_bearing)
    }

    pub fn distance_km(&self) -> Option<f64> {
        self.path.as_ref().map(GeodesicPath::distance_km)
    }
}

impl Default for ScreenState {
    fn default() -> Self {
        Self::new(&QiblaConfig::default())
    }
}
