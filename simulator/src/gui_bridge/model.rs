use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tacmapcore::render::Scene;
use tacmapcore::selection::SelectionSummary;
use tacmapcore::telemetry::ViewMetrics;
use tacmapcore::{ActionValue, TickOutcome};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignationSummary {
    pub name: String,
    pub label: String,
    pub bearing_deg: f64,
    pub distance_nm: f64,
}

/// Everything the visualizer needs to paint one frame.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VisualizationModel {
    pub tick: usize,
    pub status: String,
    pub in_flight: bool,
    pub map_image: Option<String>,
    pub scene: Scene,
    pub bullseye_scene: Scene,
    pub viewer_scene: Scene,
    pub summary: SelectionSummary,
    pub designations: Vec<DesignationSummary>,
    pub actions: BTreeMap<String, ActionValue>,
    pub last_outcome: TickOutcome,
    pub metrics: ViewMetrics,
}

/// Body of `POST /click`, in composite-view pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickRequest {
    pub x: f64,
    pub y: f64,
}

/// Body of `POST /resize`, the host window's drawable size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeRequest {
    pub width: f64,
    pub height: f64,
}

/// Body of `POST /action`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub action: String,
    pub value: ActionValue,
}
