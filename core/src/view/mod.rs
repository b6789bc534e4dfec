//! The three view variants. Each composes the shared projections and the
//! selection panel and is driven through the `Resizable`, `Clickable`,
//! `Tickable` and `Lifecycle` traits.

pub mod bullseye;
pub mod composite;
pub mod map_source;
pub mod viewer;

pub use bullseye::BullseyeView;
pub use composite::{CompositeMapView, LayerVisibility};
pub use map_source::{MapSource, NO_DATA_IMAGE};
pub use viewer::{ViewerZoom, ZoomableMapViewer, VIEWER_ZOOM_FACTOR};
