//! HTTP places service speaking the Nominatim `/search` API

use crate::core::config::SearchConfig;
use crate::core::geo::LatLng;
use crate::search::{AutocompleteService, Place, PlaceLookupService, Suggestion};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// One hit of a `format=jsonv2` search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub name: Option<String>,
    pub display_name: String,
    pub lat: String,
    pub lon: String,
}

impl SearchHit {
    /// Title is the place's own name, subtitle the rest of its display name
    pub fn to_suggestion(&self) -> Suggestion {
        let title = match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self
                .display_name
                .split(',')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string(),
        };

        let subtitle = self
            .display_name
            .strip_prefix(title.as_str())
            .filter(|rest| rest.is_empty() || rest.starts_with(','))
            .map(|rest| rest.trim_start_matches(',').trim())
            .unwrap_or(self.display_name.as_str())
            .to_string();

        Suggestion::new(title, subtitle)
    }

    pub fn to_place(&self) -> Result<Place> {
        let lat = parse_degrees(&self.lat, "lat")?;
        let lng = parse_degrees(&self.lon, "lon")?;
        let coordinate = LatLng::new(lat, lng);
        if !coordinate.is_valid() {
            return Err(Error::InvalidCoordinates(coordinate.to_string()));
        }
        let name = self.to_suggestion().title;
        Ok(Place::new(name, coordinate))
    }
}

fn parse_degrees(raw: &str, field: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| Error::Decode(format!("{field} {raw:?}: {e}")))
}

pub fn parse_search_response(body: &str) -> Result<Vec<SearchHit>> {
    Ok(serde_json::from_str(body)?)
}

/// Nominatim-compatible client used for both autocomplete and lookup
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    endpoint: String,
    max_suggestions: usize,
}

impl NominatimClient {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            max_suggestions: config.max_suggestions,
        })
    }

    pub fn search_url(&self) -> String {
        format!("{}/search", self.endpoint)
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let response = self
            .http
            .get(self.search_url())
            .query(&[("q", query), ("format", "jsonv2")])
            .query(&[("limit", limit)])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        parse_search_response(&body)
    }
}

#[async_trait]
impl AutocompleteService for NominatimClient {
    async fn complete(&self, query: &str) -> Result<Vec<Suggestion>> {
        let hits = self.search(query, self.max_suggestions).await?;
        Ok(hits.iter().map(SearchHit::to_suggestion).collect())
    }
}

#[async_trait]
impl PlaceLookupService for NominatimClient {
    async fn lookup(&self, suggestion: &Suggestion) -> Result<Option<Place>> {
        let hits = self.search(&suggestion.query(), 1).await?;
        match hits.first() {
            Some(hit) => {
                let place = hit.to_place()?;
                log::info!("resolved {:?} to {}", suggestion.title, place.coordinate);
                Ok(Some(place))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MECCA_RESPONSE: &str = r#"[
        {
            "place_id": 123,
            "lat": "21.4224779",
            "lon": "39.8251832",
            "category": "place",
            "type": "city",
            "name": "Mecca",
            "display_name": "Mecca, Makkah Region, Saudi Arabia"
        },
        {
            "place_id": 456,
            "lat": "32.0",
            "lon": "-116.0",
            "display_name": "Mecca, Riverside County, California, United States"
        }
    ]"#;

    #[test]
    fn test_parse_hits_into_suggestions() {
        let hits = parse_search_response(MECCA_RESPONSE).unwrap();
        let suggestions: Vec<_> = hits.iter().map(SearchHit::to_suggestion).collect();

        assert_eq!(
            suggestions,
            vec![
                Suggestion::new("Mecca", "Makkah Region, Saudi Arabia"),
                Suggestion::new("Mecca", "Riverside County, California, United States"),
            ]
        );
    }

    #[test]
    fn test_hit_to_place() {
        let hits = parse_search_response(MECCA_RESPONSE).unwrap();
        let place = hits[0].to_place().unwrap();

        assert_eq!(place.name, "Mecca");
        assert_eq!(place.coordinate, LatLng::new(21.4224779, 39.8251832));
    }

    #[test]
    fn test_name_not_prefix_of_display_name() {
        let hit = SearchHit {
            name: Some("Masjid al-Haram".to_string()),
            display_name: "Al Haram, Mecca, Saudi Arabia".to_string(),
            lat: "21.4225".to_string(),
            lon: "39.8262".to_string(),
        };
        let suggestion = hit.to_suggestion();
        assert_eq!(suggestion.title, "Masjid al-Haram");
        assert_eq!(suggestion.subtitle, "Al Haram, Mecca, Saudi Arabia");
    }

    #[test]
    fn test_bad_coordinates_are_errors() {
        let hit = SearchHit {
            name: None,
            display_name: "Nowhere".to_string(),
            lat: "north".to_string(),
            lon: "0".to_string(),
        };
        assert!(matches!(hit.to_place(), Err(Error::Decode(_))));

        let hit = SearchHit {
            lat: "95.0".to_string(),
            ..hit
        };
        assert!(matches!(hit.to_place(), Err(Error::InvalidCoordinates(_))));
    }

    #[test]
    fn test_malformed_body_is_serialization_error() {
        assert!(matches!(
            parse_search_response("<html>rate limited</html>"),
            Err(Error::Serialization(_))
        ));
        assert!(parse_search_response("[]").unwrap().is_empty());
    }

    #[test]
    fn test_endpoint_trailing_slash_is_trimmed() {
        let config = SearchConfig {
            endpoint: "https://places.example.org/".to_string(),
            ..SearchConfig::default()
        };
        let client = NominatimClient::new(&config).unwrap();
        assert_eq!(client.search_url(), "https://places.example.org/search");
    }
}
