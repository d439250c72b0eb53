use crate::map::style::MapStyle;
use crate::search::Suggestion;
use crate::ui::{controls, UiAction};
use egui::{Align2, Color32, Context, Id, RichText, Sense, Vec2};

const PANEL_WIDTH: f32 = 360.0;

/// Search field, style toggle and, while there is text, the suggestion list
pub fn search_panel(
    ctx: &Context,
    buffer: &mut String,
    suggestions: &[Suggestion],
    style: MapStyle,
    busy: bool,
    actions: &mut Vec<UiAction>,
) {
    egui::Area::new(Id::new("qibla_search"))
        .anchor(Align2::CENTER_TOP, Vec2::new(0.0, 12.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.set_width(PANEL_WIDTH);
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    let edit = egui::TextEdit::singleline(buffer)
                        .hint_text("Search")
                        .desired_width(PANEL_WIDTH - 64.0);
                    if ui.add(edit).changed() {
                        actions.push(UiAction::SearchChanged(buffer.clone()));
                    }
                    if busy {
                        ui.spinner();
                    }
                    controls::style_toggle(ui, style, actions);
                });

                if buffer.is_empty() || suggestions.is_empty() {
                    return;
                }

                ui.separator();
                egui::ScrollArea::vertical().max_height(280.0).show(ui, |ui| {
                    for (index, suggestion) in suggestions.iter().enumerate() {
                        let row = ui
                            .vertical(|ui| {
                                ui.label(&suggestion.title);
                                if !suggestion.subtitle.is_empty() {
                                    let subtitle = RichText::new(&suggestion.subtitle)
                                        .small()
                                        .color(Color32::GRAY);
                                    ui.label(subtitle);
                                }
                            })
                            .response
                            .interact(Sense::click());

                        if row.hovered() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        }
                        if row.clicked() {
                            actions.push(UiAction::SelectSuggestion(index));
                        }
                        ui.add_space(4.0);
                    }
                });
            });
        });
}
