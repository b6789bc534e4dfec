//! Geometry and view models for the tactical map, the bullseye selection
//! disc and the zoomable map viewer.
//!
//! Views consume simulator telemetry through [`sim::TelemetrySource`] and
//! emit a backend-neutral [`render::Scene`] that a host canvas paints.

pub mod actions;
pub mod catalog;
pub mod config;
pub mod math;
pub mod navpoints;
pub mod prelude;
pub mod render;
pub mod selection;
pub mod sim;
pub mod telemetry;
pub mod view;

pub use actions::{ActionId, ActionTarget, ActionValue};
pub use config::ViewConfig;
pub use prelude::{
    ClickOutcome, Clickable, Lifecycle, MapError, MapResult, Renderable, Resizable, TickOutcome,
    Tickable,
};
pub use view::{BullseyeView, CompositeMapView, ZoomableMapViewer};
