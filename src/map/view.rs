//! Interactive egui map surface
//!
//! Paints raster tiles, the marker, the great-circle path and a crosshair at
//! the visual center. Drag pans, scroll zooms around the pointer and
//! double-click zooms in. Any user-driven move is reported back through
//! [`MapViewResponse::moved_to`].

use crate::core::config::QiblaConfig;
use crate::core::constants::DEFAULT_ZOOM_DELTA;
use crate::core::geo::{LatLng, Point};
use crate::core::viewport::Viewport;
use crate::geodesic::{GeodesicPath, PathStyle};
use crate::map::binding::MapSurface;
use crate::map::style::MapStyle;
use crate::map::tile_layer::TileLayer;
use crate::runtime::AsyncSpawner;
use crate::state::marker::Marker;
use egui::{Align2, Color32, FontId, Pos2, Rect, Response, Sense, Shape, Stroke, Ui, Vec2};
use std::sync::Arc;

const SCROLL_ZOOM_SENSITIVITY: f64 = 0.002;

/// Horizontal world copies drawn for overlays so they stay visible near the antimeridian
const WORLD_COPIES: [f64; 3] = [-360.0, 0.0, 360.0];

pub struct MapViewResponse {
    pub response: Response,
    /// New center when the user panned or zoomed this frame
    pub moved_to: Option<LatLng>,
}

pub struct MapView {
    viewport: Viewport,
    style: MapStyle,
    marker: Option<Marker>,
    path: Option<(Vec<LatLng>, PathStyle)>,
    tiles: TileLayer,
    show_attribution: bool,
}

impl MapView {
    pub fn new(config: &QiblaConfig, spawner: Option<Arc<dyn AsyncSpawner>>) -> Self {
        let mut viewport = Viewport::new(
            config.initial_center,
            config.initial_zoom,
            Point::new(800.0, 600.0),
        );
        viewport.set_zoom_limits(config.min_zoom, config.max_zoom);

        Self {
            viewport,
            style: MapStyle::default(),
            marker: None,
            path: None,
            tiles: TileLayer::new(&config.tiles, spawner),
            show_attribution: true,
        }
    }

    pub fn set_repaint_context(&mut self, ctx: &egui::Context) {
        self.tiles.set_repaint_context(ctx);
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn zoom_by(&mut self, delta: f64) -> LatLng {
        self.viewport.zoom_to(self.viewport.zoom + delta, None);
        self.viewport.center
    }

    pub fn show(&mut self, ui: &mut Ui) -> MapViewResponse {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.viewport
            .set_size(Point::new(rect.width() as f64, rect.height() as f64));

        let moved = self.handle_input(ui, rect, &response);

        let painter = ui.painter_at(rect);
        if self.tiles.paint(&painter, rect, &self.viewport, self.style) {
            ui.ctx().request_repaint();
        }
        self.paint_path(&painter, rect);
        self.paint_marker(&painter, rect);
        paint_crosshair(&painter, rect.center());
        if self.show_attribution {
            painter.text(
                rect.left_bottom() + Vec2::new(6.0, -6.0),
                Align2::LEFT_BOTTOM,
                self.style.attribution(),
                FontId::proportional(10.0),
                Color32::from_gray(90),
            );
        }

        MapViewResponse {
            response,
            moved_to: moved.then_some(self.viewport.center),
        }
    }

    fn handle_input(&mut self, ui: &Ui, rect: Rect, response: &Response) -> bool {
        let mut moved = false;

        if response.dragged() {
            let delta = response.drag_delta();
            if delta.length_sq() > 0.0 {
                self.viewport.pan(Point::new(delta.x as f64, delta.y as f64));
                moved = true;
            }
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll.abs() > 0.1 {
                let focus = response
                    .hover_pos()
                    .map(|pos| to_container(rect, pos));
                let before = self.viewport.zoom;
                self.viewport
                    .zoom_to(before + scroll as f64 * SCROLL_ZOOM_SENSITIVITY, focus);
                moved |= (self.viewport.zoom - before).abs() > f64::EPSILON;
            }
        }

        if response.double_clicked() {
            let focus = response
                .interact_pointer_pos()
                .map(|pos| to_container(rect, pos));
            self.viewport
                .zoom_to(self.viewport.zoom + DEFAULT_ZOOM_DELTA, focus);
            moved = true;
        }

        moved
    }

    fn to_screen(&self, rect: Rect, lat_lng: &LatLng, lng_shift: f64) -> Pos2 {
        let shifted = LatLng::new(lat_lng.lat, lat_lng.lng + lng_shift);
        let pixel = self.viewport.lat_lng_to_pixel(&shifted);
        Pos2::new(rect.min.x + pixel.x as f32, rect.min.y + pixel.y as f32)
    }

    fn paint_path(&self, painter: &egui::Painter, rect: Rect) {
        let Some((points, style)) = &self.path else {
            return;
        };
        let [r, g, b, a] = style.stroke_rgba;
        let stroke = Stroke::new(style.stroke_width, Color32::from_rgba_unmultiplied(r, g, b, a));

        for shift in WORLD_COPIES {
            let screen: Vec<Pos2> = points
                .iter()
                .map(|p| self.to_screen(rect, p, shift))
                .collect();
            painter.add(Shape::line(screen, stroke));
        }
    }

    fn paint_marker(&self, painter: &egui::Painter, rect: Rect) {
        let Some(marker) = &self.marker else {
            return;
        };
        let red = Color32::from_rgb(220, 40, 40);

        for shift in WORLD_COPIES {
            let tip = self.to_screen(rect, &marker.coordinate(), shift);
            if !rect.expand(40.0).contains(tip) {
                continue;
            }
            let head = tip - Vec2::new(0.0, 22.0);
            painter.line_segment([tip, head], Stroke::new(2.0, red));
            painter.circle_filled(head, 8.0, red);
            painter.circle_filled(head, 3.0, Color32::WHITE);
            if let Some(title) = marker.title() {
                painter.text(
                    head - Vec2::new(0.0, 12.0),
                    Align2::CENTER_BOTTOM,
                    title,
                    FontId::proportional(13.0),
                    Color32::BLACK,
                );
            }
        }
    }
}

fn to_container(rect: Rect, pos: Pos2) -> Point {
    Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64)
}

fn paint_crosshair(painter: &egui::Painter, center: Pos2) {
    let color = Color32::from_rgba_unmultiplied(0, 0, 0, 128);
    let stroke = Stroke::new(1.5, color);
    painter.circle_stroke(center, 10.0, stroke);
    for (from, to) in [
        (Vec2::new(-16.0, 0.0), Vec2::new(-6.0, 0.0)),
        (Vec2::new(6.0, 0.0), Vec2::new(16.0, 0.0)),
        (Vec2::new(0.0, -16.0), Vec2::new(0.0, -6.0)),
        (Vec2::new(0.0, 6.0), Vec2::new(0.0, 16.0)),
    ] {
        painter.line_segment([center + from, center + to], stroke);
    }
}

impl MapSurface for MapView {
    fn set_style(&mut self, style: MapStyle) {
        self.style = style;
    }

    fn clear_overlays(&mut self) {
        self.marker = None;
        self.path = None;
    }

    fn add_marker(&mut self, marker: &Marker) {
        self.marker = Some(marker.clone());
    }

    fn add_path(&mut self, path: &GeodesicPath, style: PathStyle) {
        self.path = Some((path.points().to_vec(), style));
    }

    fn set_center(&mut self, center: LatLng) {
        self.viewport.set_center(center);
    }

    fn center(&self) -> LatLng {
        self.viewport.center
    }
}
