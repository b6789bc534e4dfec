use serde::{Deserialize, Serialize};

use crate::math::{BearingRange, Point};
use crate::render::Scene;
use crate::sim::TelemetrySource;

/// Error type for the configuration paths (catalog fields, actions).
/// Runtime view paths never fail; they degrade to defaults instead.
#[derive(thiserror::Error, Debug)]
pub enum MapError {
    #[error("user map slot {0} out of range (0..{1})")]
    SlotOutOfRange(usize, usize),
    #[error("unknown catalog field: {0}")]
    UnknownField(String),
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("action {action} expects a {expected} value")]
    ActionValueKind {
        action: &'static str,
        expected: &'static str,
    },
    #[error("action {0} is not supported by this view")]
    UnsupportedAction(&'static str),
    #[error("catalog serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type MapResult<T> = Result<T, MapError>;

/// What a tick changed, so the host knows whether to repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickOutcome {
    pub redraw: bool,
    pub map_image_changed: bool,
    pub nav_points_updated: bool,
    pub flight_ended: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    PanelHidden,
    NoTelemetry,
    Busy,
    OutsideDisc,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ClickOutcome {
    Ignored(IgnoreReason),
    /// An existing designation at `index` was hit and removed.
    Removed { index: usize },
    /// A new designation was inserted at index 0.
    Designated(BearingRange),
    /// The click resolved beyond the acceptance range and was dropped.
    OutOfRange(BearingRange),
    ZoomedIn,
    ZoomedOut,
    Dismissed,
}

pub trait Resizable {
    fn resize(&mut self, width: f64, height: f64);
}

pub trait Clickable {
    fn on_mouse_down(&mut self, point: Point) -> ClickOutcome;
}

pub trait Tickable {
    fn tick(&mut self, telemetry: &dyn TelemetrySource) -> TickOutcome;
}

/// Explicit lifecycle driven by the host scheduler.
pub trait Lifecycle {
    fn init(&mut self);
    fn teardown(&mut self);
}

pub trait Renderable {
    fn scene(&self) -> Scene;
}
