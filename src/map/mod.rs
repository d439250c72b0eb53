pub mod binding;
pub mod style;
#[cfg(feature = "egui")]
pub mod tile_layer;
#[cfg(feature = "egui")]
pub mod view;

pub use binding::{MapBinding, MapSurface, SyncReport};
pub use style::MapStyle;
#[cfg(feature = "egui")]
pub use view::{MapView, MapViewResponse};
