use crate::map::style::MapStyle;
use crate::ui::UiAction;
use egui::{Align2, Color32, Context, Id, RichText, Vec2};

const SET_LOCATION_GREEN: Color32 = Color32::from_rgb(52, 168, 83);

/// Floating "Set Location" button at the bottom center
pub fn set_location_button(ctx: &Context, actions: &mut Vec<UiAction>) {
    egui::Area::new(Id::new("qibla_set_location"))
        .anchor(Align2::CENTER_BOTTOM, Vec2::new(0.0, -32.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            let button = egui::Button::new(
                RichText::new("Set Location").color(Color32::WHITE).size(16.0),
            )
            .fill(SET_LOCATION_GREEN)
            .rounding(33.0)
            .min_size(Vec2::new(160.0, 44.0));

            if ui.add(button).clicked() {
                actions.push(UiAction::SetLocation);
            }
        });
}

/// Icon button flipping between standard and satellite imagery
pub fn style_toggle(ui: &mut egui::Ui, style: MapStyle, actions: &mut Vec<UiAction>) {
    let hover = match style {
        MapStyle::Standard => "Switch to satellite",
        MapStyle::Satellite => "Switch to standard map",
    };
    if ui
        .add(egui::Button::new(RichText::new(style.icon()).size(18.0)))
        .on_hover_text(hover)
        .clicked()
    {
        actions.push(UiAction::ToggleStyle);
    }
}

pub fn zoom_buttons(ctx: &Context, actions: &mut Vec<UiAction>) {
    egui::Area::new(Id::new("qibla_zoom"))
        .anchor(Align2::RIGHT_CENTER, Vec2::new(-12.0, 0.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.vertical(|ui| {
                if ui.add(zoom_button("+")).clicked() {
                    actions.push(UiAction::ZoomIn);
                }
                if ui.add(zoom_button("−")).clicked() {
                    actions.push(UiAction::ZoomOut);
                }
            });
        });
}

fn zoom_button(label: &str) -> egui::Button<'static> {
    egui::Button::new(RichText::new(label).size(18.0)).min_size(Vec2::splat(32.0))
}

/// Bearing and distance to the destination once a marker is set, plus the last service error
pub fn info_panel(
    ctx: &Context,
    bearing: Option<f64>,
    distance_km: Option<f64>,
    error: Option<&str>,
) {
    if bearing.is_none() && error.is_none() {
        return;
    }

    egui::Area::new(Id::new("qibla_info"))
        .anchor(Align2::LEFT_BOTTOM, Vec2::new(12.0, -90.0))
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                if let (Some(bearing), Some(distance)) = (bearing, distance_km) {
                    ui.label(RichText::new(format!("Qibla {:.1}° from north", bearing)).strong());
                    ui.label(format!("{:.0} km to the Kaaba", distance));
                }
                if let Some(error) = error {
                    ui.label(RichText::new(error).small().color(Color32::from_rgb(180, 40, 40)));
                }
            });
        });
}
