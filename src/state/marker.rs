use crate::core::geo::LatLng;

/// The single point annotation on the map
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    coordinate: LatLng,
    title: Option<String>,
}

impl Marker {
    pub fn new(coordinate: LatLng) -> Self {
        Self {
            coordinate,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn coordinate(&self) -> LatLng {
        self.coordinate
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}
