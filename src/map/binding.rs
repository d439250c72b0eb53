//! Two-way adapter between [`ScreenState`] and a live map surface
//!
//! State flows into the surface on every [`MapBinding::sync`]; the only
//! thing flowing back is the visible center, either after a queued recenter
//! or when the user drags the map ([`MapBinding::user_moved`]).

use crate::core::geo::LatLng;
use crate::geodesic::{GeodesicPath, PathStyle};
use crate::map::style::MapStyle;
use crate::state::camera::CameraCommand;
use crate::state::marker::Marker;
use crate::state::ScreenState;

/// What the binding needs from an interactive map widget
pub trait MapSurface {
    fn set_style(&mut self, style: MapStyle);

    /// Removes every marker and overlay
    fn clear_overlays(&mut self);

    fn add_marker(&mut self, marker: &Marker);

    fn add_path(&mut self, path: &GeodesicPath, style: PathStyle);

    fn set_center(&mut self, center: LatLng);

    fn center(&self) -> LatLng;
}

/// Outcome of one sync pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SyncReport {
    /// Where the surface was recentered, if a command was honored
    pub recentered: Option<LatLng>,
    /// Commands drained without effect because no marker was present
    pub dropped_commands: usize,
}

#[derive(Debug, Default)]
pub struct MapBinding {
    passes: u64,
}

impl MapBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sync passes run so far
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Pushes the state into the surface. Overlays are rebuilt from scratch,
    /// and pending camera commands are consumed so each one applies once.
    pub fn sync(&mut self, state: &mut ScreenState, surface: &mut dyn MapSurface) -> SyncReport {
        self.passes += 1;
        let mut report = SyncReport::default();

        surface.set_style(state.style());
        surface.clear_overlays();

        let has_marker = match state.marker() {
            Some(marker) => {
                surface.add_marker(marker);
                true
            }
            None => false,
        };
        if let Some(path) = state.path() {
            surface.add_path(path, state.path_style());
        }

        for command in state.take_camera_commands() {
            match command {
                CameraCommand::CenterOn(target) if has_marker => {
                    surface.set_center(target);
                    report.recentered = Some(target);
                }
                CameraCommand::CenterOn(_) => report.dropped_commands += 1,
            }
        }

        if let Some(target) = report.recentered {
            log::debug!("sync #{}: recentered on {}", self.passes, target);
            state.set_center(surface.center());
        }

        report
    }

    /// The user panned or zoomed the surface: its center overwrites the state's
    pub fn user_moved(&self, state: &mut ScreenState, center: LatLng) {
        state.set_center(center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeSurface {
        style: Option<MapStyle>,
        markers: Vec<LatLng>,
        paths: usize,
        center: LatLng,
        set_center_calls: usize,
        clears: usize,
    }

    impl MapSurface for FakeSurface {
        fn set_style(&mut self, style: MapStyle) {
            self.style = Some(style);
        }

        fn clear_overlays(&mut self) {
            self.markers.clear();
            self.paths = 0;
            self.clears += 1;
        }

        fn add_marker(&mut self, marker: &Marker) {
            self.markers.push(marker.coordinate());
        }

        fn add_path(&mut self, _path: &GeodesicPath, _style: PathStyle) {
            self.paths += 1;
        }

        fn set_center(&mut self, center: LatLng) {
            self.center = center;
            self.set_center_calls += 1;
        }

        fn center(&self) -> LatLng {
            self.center
        }
    }

    #[test]
    fn test_sync_without_marker_only_sets_style() {
        let mut state = ScreenState::default();
        let mut surface = FakeSurface::default();
        let mut binding = MapBinding::new();

        let report = binding.sync(&mut state, &mut surface);

        assert_eq!(report, SyncReport::default());
        assert_eq!(surface.style, Some(MapStyle::Standard));
        assert!(surface.markers.is_empty());
        assert_eq!(surface.paths, 0);
        assert_eq!(surface.set_center_calls, 0);
    }

    #[test]
    fn test_recenter_happens_once() {
        let mut state = ScreenState::default();
        let target = LatLng::new(33.5, 73.0);
        state.set_center(target);
        state.set_location();

        let mut surface = FakeSurface::default();
        let mut binding = MapBinding::new();

        let first = binding.sync(&mut state, &mut surface);
        assert_eq!(first.recentered, Some(target));
        assert!(!state.recenter_pending());

        for _ in 0..3 {
            let report = binding.sync(&mut state, &mut surface);
            assert_eq!(report.recentered, None);
        }
        assert_eq!(surface.set_center_calls, 1);
        assert_eq!(binding.passes(), 4);
    }

    #[test]
    fn test_overlays_rebuilt_not_accumulated() {
        let mut state = ScreenState::default();
        state.set_location();
        let mut surface = FakeSurface::default();
        let mut binding = MapBinding::new();

        binding.sync(&mut state, &mut surface);
        binding.sync(&mut state, &mut surface);

        assert_eq!(surface.clears, 2);
        assert_eq!(surface.markers.len(), 1);
        assert_eq!(surface.paths, 1);
    }

    #[test]
    fn test_user_pan_is_not_fought_after_recenter() {
        let mut state = ScreenState::default();
        state.set_location();
        let mut surface = FakeSurface::default();
        let mut binding = MapBinding::new();
        binding.sync(&mut state, &mut surface);

        let panned = LatLng::new(-10.0, 20.0);
        surface.center = panned;
        binding.user_moved(&mut state, panned);
        binding.sync(&mut state, &mut surface);

        assert_eq!(surface.center, panned);
        assert_eq!(state.center(), panned);
    }

    #[test]
    fn test_style_follows_state() {
        let mut state = ScreenState::default();
        let mut surface = FakeSurface::default();
        let mut binding = MapBinding::new();

        state.toggle_style();
        binding.sync(&mut state, &mut surface);
        assert_eq!(surface.style, Some(MapStyle::Satellite));
    }
}
