//! egui front end: the single application screen
//!
//! Widgets never mutate state directly. Each frame they return
//! [`UiAction`]s which [`app::QiblaApp::apply`] feeds to the [`crate::Screen`].

pub mod app;
pub mod controls;
pub mod search;

pub use app::QiblaApp;

/// Something the user did this frame
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    SetLocation,
    ToggleStyle,
    SearchChanged(String),
    SelectSuggestion(usize),
    ZoomIn,
    ZoomOut,
}
