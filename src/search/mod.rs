//! Place search: autocomplete suggestions and resolving one to a coordinate

pub mod completer;
pub mod nominatim;
pub mod resolver;

use crate::core::geo::LatLng;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use completer::SearchCompleter;
pub use nominatim::NominatimClient;
pub use resolver::PlaceResolver;

/// An autocomplete candidate, not yet resolved to a coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub subtitle: String,
}

impl Suggestion {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }

    /// Free-text form used when looking the suggestion up again
    pub fn query(&self) -> String {
        if self.subtitle.is_empty() {
            self.title.clone()
        } else {
            format!("{}, {}", self.title, self.subtitle)
        }
    }
}

/// A suggestion resolved to a coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub coordinate: LatLng,
}

impl Place {
    pub fn new(name: impl Into<String>, coordinate: LatLng) -> Self {
        Self {
            name: name.into(),
            coordinate,
        }
    }
}

/// Turns a text fragment into an ordered list of suggestions
#[async_trait]
pub trait AutocompleteService: Send + Sync {
    async fn complete(&self, query: &str) -> Result<Vec<Suggestion>>;
}

/// Resolves a previously returned suggestion to at most one place
#[async_trait]
pub trait PlaceLookupService: Send + Sync {
    async fn lookup(&self, suggestion: &Suggestion) -> Result<Option<Place>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_query_joins_subtitle() {
        assert_eq!(
            Suggestion::new("Mecca", "Makkah Province, Saudi Arabia").query(),
            "Mecca, Makkah Province, Saudi Arabia"
        );
        assert_eq!(Suggestion::new("Mecca", "").query(), "Mecca");
    }
}
