use crate::core::config::QiblaConfig;
use crate::core::constants::DEFAULT_ZOOM_DELTA;
use crate::map::binding::MapBinding;
use crate::map::view::MapView;
use crate::runtime::AsyncSpawner;
use crate::screen::Screen;
use crate::search::{AutocompleteService, PlaceLookupService};
use crate::ui::{controls, search, UiAction};
use std::sync::Arc;

/// The whole application: one map screen with floating controls
pub struct QiblaApp {
    screen: Screen,
    map_view: MapView,
    binding: MapBinding,
    search_buffer: String,
}

impl QiblaApp {
    pub fn new(
        config: &QiblaConfig,
        autocomplete: Arc<dyn AutocompleteService>,
        lookup: Arc<dyn PlaceLookupService>,
        spawner: Arc<dyn AsyncSpawner>,
    ) -> Self {
        let mut screen = Screen::new(config, autocomplete, lookup, spawner.clone());
        let mut map_view = MapView::new(config, Some(spawner));
        let mut binding = MapBinding::new();
        binding.sync(screen.state_mut(), &mut map_view);

        Self {
            screen,
            map_view,
            binding,
            search_buffer: String::new(),
        }
    }

    /// Wires background completions to egui repaints
    pub fn install(&mut self, ctx: &egui::Context) {
        let repaint = ctx.clone();
        self.screen
            .set_notifier(Arc::new(move || repaint.request_repaint()));
        self.map_view.set_repaint_context(ctx);
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn map_view(&self) -> &MapView {
        &self.map_view
    }

    /// Applies one user action to the screen, then resyncs the map
    pub fn apply(&mut self, action: UiAction) {
        log::debug!("ui action {:?}", action);
        match action {
            UiAction::SetLocation => self.screen.set_location(),
            UiAction::ToggleStyle => self.screen.toggle_style(),
            UiAction::SearchChanged(text) => self.screen.search_changed(&text),
            UiAction::SelectSuggestion(index) => {
                if self.screen.select_suggestion(index) {
                    self.search_buffer.clear();
                }
            }
            UiAction::ZoomIn => self.zoom_by(DEFAULT_ZOOM_DELTA),
            UiAction::ZoomOut => self.zoom_by(-DEFAULT_ZOOM_DELTA),
        }
        self.binding.sync(self.screen.state_mut(), &mut self.map_view);
    }

    fn zoom_by(&mut self, delta: f64) {
        let center = self.map_view.zoom_by(delta);
        self.binding.user_moved(self.screen.state_mut(), center);
    }
}

impl eframe::App for QiblaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.screen.poll() {
            self.binding.sync(self.screen.state_mut(), &mut self.map_view);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let response = self.map_view.show(ui);
                if let Some(center) = response.moved_to {
                    self.binding.user_moved(self.screen.state_mut(), center);
                }
            });

        let mut actions = Vec::new();
        let state = self.screen.state();
        search::search_panel(
            ctx,
            &mut self.search_buffer,
            self.screen.visible_suggestions(),
            state.style(),
            self.screen.is_busy(),
            &mut actions,
        );
        controls::zoom_buttons(ctx, &mut actions);
        controls::info_panel(
            ctx,
            state.qibla_bearing(),
            state.distance_km(),
            self.screen.last_error(),
        );
        controls::set_location_button(ctx, &mut actions);

        for action in actions {
            self.apply(action);
        }
    }
}
