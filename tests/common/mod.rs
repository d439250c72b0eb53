//! In-memory stand-ins for the places service and the map widget

#![allow(dead_code)]

use async_trait::async_trait;
use qibla::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Autocomplete with a canned answer and delay per query
#[derive(Default)]
pub struct ScriptedAutocomplete {
    answers: HashMap<String, (Duration, Result<Vec<Suggestion>>)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedAutocomplete {
    pub fn answer(mut self, query: &str, delay_ms: u64, suggestions: Vec<Suggestion>) -> Self {
        self.answers
            .insert(query.to_string(), (Duration::from_millis(delay_ms), Ok(suggestions)));
        self
    }

    pub fn fail(mut self, query: &str, message: &str) -> Self {
        self.answers.insert(
            query.to_string(),
            (Duration::ZERO, Err(QiblaError::Service(message.to_string()))),
        );
        self
    }
}

#[async_trait]
impl AutocompleteService for ScriptedAutocomplete {
    async fn complete(&self, query: &str) -> Result<Vec<Suggestion>> {
        self.calls.lock().unwrap().push(query.to_string());
        let (delay, answer) = match self.answers.get(query) {
            Some((delay, Ok(suggestions))) => (*delay, Ok(suggestions.clone())),
            Some((delay, Err(e))) => (*delay, Err(QiblaError::Service(e.to_string()))),
            None => (Duration::ZERO, Ok(Vec::new())),
        };
        tokio::time::sleep(delay).await;
        answer
    }
}

pub enum LookupAnswer {
    Found(Place),
    NotFound,
    Fails(String),
}

/// Lookup keyed by suggestion title
#[derive(Default)]
pub struct ScriptedLookup {
    answers: HashMap<String, (Duration, LookupAnswer)>,
}

impl ScriptedLookup {
    pub fn with(self, title: &str, answer: LookupAnswer) -> Self {
        self.with_delay(title, 0, answer)
    }

    pub fn with_delay(mut self, title: &str, delay_ms: u64, answer: LookupAnswer) -> Self {
        self.answers
            .insert(title.to_string(), (Duration::from_millis(delay_ms), answer));
        self
    }
}

#[async_trait]
impl PlaceLookupService for ScriptedLookup {
    async fn lookup(&self, suggestion: &Suggestion) -> Result<Option<Place>> {
        let Some((delay, answer)) = self.answers.get(&suggestion.title) else {
            return Ok(None);
        };
        tokio::time::sleep(*delay).await;
        match answer {
            LookupAnswer::Found(place) => Ok(Some(place.clone())),
            LookupAnswer::NotFound => Ok(None),
            LookupAnswer::Fails(message) => Err(QiblaError::Service(message.clone())),
        }
    }
}

/// Map surface that records what the binding pushed into it
#[derive(Default)]
pub struct RecordingSurface {
    pub style: Option<MapStyle>,
    pub markers: Vec<Marker>,
    pub paths: Vec<(GeodesicPath, PathStyle)>,
    pub center: LatLng,
    pub recenters: Vec<LatLng>,
}

impl MapSurface for RecordingSurface {
    fn set_style(&mut self, style: MapStyle) {
        self.style = Some(style);
    }

    fn clear_overlays(&mut self) {
        self.markers.clear();
        self.paths.clear();
    }

    fn add_marker(&mut self, marker: &Marker) {
        self.markers.push(marker.clone());
    }

    fn add_path(&mut self, path: &GeodesicPath, style: PathStyle) {
        self.paths.push((path.clone(), style));
    }

    fn set_center(&mut self, center: LatLng) {
        self.center = center;
        self.recenters.push(center);
    }

    fn center(&self) -> LatLng {
        self.center
    }
}

pub fn screen(
    config: &QiblaConfig,
    autocomplete: ScriptedAutocomplete,
    lookup: ScriptedLookup,
) -> Screen {
    shared_screen(config, Arc::new(autocomplete), lookup)
}

/// Like [`screen`], keeping a handle on the autocomplete to inspect its calls
pub fn shared_screen(
    config: &QiblaConfig,
    autocomplete: Arc<ScriptedAutocomplete>,
    lookup: ScriptedLookup,
) -> Screen {
    let spawner = qibla::runtime::current_spawner().unwrap();
    Screen::new(config, autocomplete, Arc::new(lookup), spawner)
}

/// Polls the screen until `done` holds, failing the test after two seconds
pub async fn poll_until(screen: &mut Screen, mut done: impl FnMut(&Screen) -> bool) {
    for _ in 0..200 {
        screen.poll();
        if done(screen) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}

/// Lets every spawned task finish, then applies whatever arrived
pub async fn settle(screen: &mut Screen) {
    for _ in 0..20 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        screen.poll();
    }
}

pub fn mecca() -> Place {
    Place::new("Mecca", LatLng::new(21.4225, 39.8262))
}

pub fn medina() -> Place {
    Place::new("Medina", LatLng::new(24.4672, 39.6024))
}

impl ScriptedAutocomplete {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}
