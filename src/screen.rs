//! The screen controller
//!
//! Owns [`ScreenState`] together with the two async collaborators and turns
//! user actions into state transitions. Rendering lives elsewhere: the egui
//! front end calls these methods from its update loop and syncs the map via
//! [`crate::map::binding::MapBinding`].

use crate::background::Notifier;
use crate::core::config::QiblaConfig;
use crate::runtime::AsyncSpawner;
use crate::search::completer::SearchCompleter;
use crate::search::resolver::{PlaceResolver, Resolution};
use crate::search::{AutocompleteService, PlaceLookupService, Suggestion};
use crate::state::ScreenState;
use std::sync::Arc;

pub struct Screen {
    state: ScreenState,
    completer: SearchCompleter,
    resolver: PlaceResolver,
    /// Newest service failure from either collaborator
    last_error: Option<String>,
}

impl Screen {
    pub fn new(
        config: &QiblaConfig,
        autocomplete: Arc<dyn AutocompleteService>,
        lookup: Arc<dyn PlaceLookupService>,
        spawner: Arc<dyn AsyncSpawner>,
    ) -> Self {
        Self {
            state: ScreenState::new(config),
            completer: SearchCompleter::new(autocomplete, spawner.clone()),
            resolver: PlaceResolver::new(lookup, spawner),
            last_error: None,
        }
    }

    /// Called from the worker whenever a search or lookup result is ready
    pub fn set_notifier(&mut self, notifier: Notifier) {
        self.completer.set_notifier(notifier.clone());
        self.resolver.set_notifier(notifier);
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ScreenState {
        &mut self.state
    }

    /// "Set Location" button
    pub fn set_location(&mut self) {
        self.last_error = None;
        self.state.set_location();
    }

    /// Style toggle button
    pub fn toggle_style(&mut self) {
        self.state.toggle_style();
    }

    /// The search field changed
    pub fn search_changed(&mut self, text: &str) {
        if self.state.set_search_text(text) {
            self.completer.search(text);
        }
    }

    /// Suggestions to show; always empty while the search field is empty
    pub fn visible_suggestions(&self) -> &[Suggestion] {
        if self.state.suggestions_visible() {
            self.completer.suggestions()
        } else {
            &[]
        }
    }

    /// The user picked a suggestion: resolve it and clear the search field.
    /// The marker moves only when the lookup succeeds.
    pub fn select_suggestion(&mut self, index: usize) -> bool {
        let Some(suggestion) = self.visible_suggestions().get(index).cloned() else {
            log::debug!("ignoring selection of missing suggestion {}", index);
            return false;
        };

        log::info!("resolving suggestion {:?}", suggestion.title);
        self.last_error = None;
        self.resolver.resolve(suggestion);
        self.state.clear_search();
        self.completer.search("");
        true
    }

    /// Applies any finished search or lookup. Returns whether state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = self.completer.poll();
        if changed {
            self.last_error = self.completer.last_error().map(str::to_owned);
        }

        match self.resolver.poll() {
            Some(Resolution::Found(place)) => {
                self.state.apply_place(&place);
                self.last_error = None;
                changed = true;
            }
            Some(Resolution::NotFound) => {
                log::debug!("place lookup matched nothing");
                changed |= self.last_error.take().is_some();
            }
            Some(Resolution::Failed(message)) => {
                log::warn!("place lookup failed: {}", message);
                self.last_error = Some(message);
                changed = true;
            }
            None => {}
        }

        changed
    }

    /// Most recent service failure, for a status line. Cleared by the next
    /// successful answer or by a new marker.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.completer.is_searching() || self.resolver.is_resolving()
    }
}
