use serde::{Deserialize, Serialize};

use crate::actions::{ActionId, ActionTarget, ActionValue};
use crate::catalog::{MapAsset, MapCatalog};
use crate::config::ViewConfig;
use crate::math::{
    AspectRatios, Ellipse, MapProjection, MapScale, Point, Rect, RotationMode, RotationState,
};
use crate::math::projection::REFERENCE_VIEW_PX;
use crate::navpoints::NavPointSet;
use crate::prelude::{
    ClickOutcome, Clickable, IgnoreReason, Lifecycle, MapResult, Renderable, Resizable,
    TickOutcome, Tickable,
};
use crate::render::{
    render_nav_points, DrawCommand, IconKind, Layer, OverlayStyle, Scene, StrokeStyle,
};
use crate::selection::{DesignationList, SelectionPanel, SelectionSummary};
use crate::sim::{keys, OwnshipState, TelemetrySource};
use crate::telemetry::{LogManager, MetricsRecorder, ViewMetrics};
use crate::view::map_source::{MapSource, NO_DATA_IMAGE};

const RANGE_RINGS: u32 = 3;

/// Map-level layer toggles. Target, selection-panel and ring toggles live on
/// the selection panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayerVisibility {
    pub bullseye: bool,
    pub threats: bool,
    pub waypoints: bool,
}

/// Scrolling tape map with range rings, overlays and the bullseye selection
/// panel on top.
#[derive(Debug)]
pub struct CompositeMapView {
    config: ViewConfig,
    source: MapSource,
    aspect: AspectRatios,
    scale: MapScale,
    rotation_mode: RotationMode,
    rotation: RotationState,
    ownship: OwnshipState,
    in_flight: bool,
    nav_points: NavPointSet,
    layers: LayerVisibility,
    selection: SelectionPanel,
    map: MapProjection,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl CompositeMapView {
    pub fn new(config: ViewConfig, catalog: MapCatalog) -> Self {
        let selection = SelectionPanel::new(config.clone(), false);
        let mut view = Self {
            config,
            source: MapSource::new(catalog),
            aspect: AspectRatios::default(),
            scale: MapScale::default(),
            rotation_mode: RotationMode::default(),
            rotation: RotationState::default(),
            ownship: OwnshipState::default(),
            in_flight: false,
            nav_points: NavPointSet::default(),
            layers: LayerVisibility::default(),
            selection,
            map: MapProjection::default(),
            logger: LogManager::new("composite_view"),
            metrics: MetricsRecorder::new(),
        };
        view.recompute();
        view
    }

    fn recompute(&mut self) {
        self.rotation = RotationState::new(self.rotation_mode, self.ownship.heading_deg);
        self.map = MapProjection::centered_on(
            &self.aspect,
            self.scale,
            self.source.footprint_feet(),
            self.ownship.x_feet,
            self.ownship.y_feet,
            self.rotation.map,
        );
    }

    /// Swaps the map image when the theater resolves to a different asset.
    pub fn select_theater(&mut self, theater: &str) -> bool {
        if !self.source.select_theater(theater) {
            return false;
        }
        if let Some(asset) = self.source.asset() {
            self.logger.record(&format!(
                "map image changed to {} for theater {theater}",
                asset.image
            ));
        }
        self.metrics.record_map_swap();
        self.recompute();
        true
    }

    pub fn set_scale(&mut self, scale: MapScale) {
        self.scale = scale;
        self.recompute();
    }

    pub fn set_rotation_mode(&mut self, mode: RotationMode) {
        self.rotation_mode = mode;
        self.recompute();
    }

    pub fn clear_designations(&mut self) -> usize {
        let removed = self.selection.clear();
        if removed > 0 {
            self.logger.detail(&format!("cleared {removed} designations"));
            self.metrics.record_removal(removed);
        }
        removed
    }

    /// Back to the fresh "no data" state.
    pub fn reset(&mut self) {
        self.layers = LayerVisibility::default();
        self.rotation_mode = RotationMode::NorthUp;
        self.scale = MapScale::Thirty;
        self.clear_designations();
        self.in_flight = false;
        self.recompute();
    }

    pub fn set_mouse_inhibited(&mut self, inhibited: bool) {
        self.selection.set_mouse_inhibited(inhibited);
    }

    pub fn map_projection(&self) -> &MapProjection {
        &self.map
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn rotation_mode(&self) -> RotationMode {
        self.rotation_mode
    }

    pub fn scale(&self) -> MapScale {
        self.scale
    }

    pub fn layers(&self) -> LayerVisibility {
        self.layers
    }

    pub fn selection(&self) -> &SelectionPanel {
        &self.selection
    }

    pub fn designations(&self) -> &DesignationList {
        self.selection.designations()
    }

    pub fn summary(&self) -> SelectionSummary {
        self.selection.summary(&self.ownship)
    }

    pub fn current_asset(&self) -> Option<&MapAsset> {
        self.source.asset()
    }

    pub fn catalog_mut(&mut self) -> &mut MapCatalog {
        self.source.catalog_mut()
    }

    pub fn nav_points(&self) -> &NavPointSet {
        &self.nav_points
    }

    pub fn ownship(&self) -> &OwnshipState {
        &self.ownship
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn metrics(&self) -> ViewMetrics {
        self.metrics.snapshot()
    }

    fn zoom(&self) -> f64 {
        self.aspect.constraining() / REFERENCE_VIEW_PX
    }
}

impl Resizable for CompositeMapView {
    fn resize(&mut self, width: f64, height: f64) {
        self.aspect = AspectRatios::new(width, height);
        self.selection.resize(self.aspect);
        self.recompute();
    }
}

impl Tickable for CompositeMapView {
    fn tick(&mut self, telemetry: &dyn TelemetrySource) -> TickOutcome {
        self.metrics.record_tick();
        let mut outcome = TickOutcome::default();

        let in_flight = telemetry.read(keys::FLIGHT_ACTIVE).as_bool();
        if self.in_flight != in_flight {
            outcome.redraw = true;
            if !in_flight {
                self.clear_designations();
                self.logger.record("flight ended, showing no-data placeholder");
                outcome.flight_ended = true;
            }
        }
        self.in_flight = in_flight;

        let theater = telemetry.read(keys::THEATER);
        if self.select_theater(theater.as_text()) {
            outcome.map_image_changed = true;
            outcome.redraw = true;
        }

        if telemetry.read(keys::NAV_POINTS_CHANGED).as_bool() {
            let feed = telemetry.read(keys::NAV_POINTS_FEED);
            self.nav_points = NavPointSet::parse_feed(feed.as_text());
            outcome.nav_points_updated = true;
            outcome.redraw = true;
        }

        self.ownship = OwnshipState::read(telemetry);
        self.recompute();
        self.selection.refresh(&self.ownship);
        outcome.redraw |= self.in_flight;
        outcome
    }
}

impl Clickable for CompositeMapView {
    fn on_mouse_down(&mut self, point: Point) -> ClickOutcome {
        if !self.selection.is_open() {
            return ClickOutcome::Ignored(IgnoreReason::PanelHidden);
        }
        if !self.in_flight {
            return ClickOutcome::Ignored(IgnoreReason::NoTelemetry);
        }
        let outcome = self.selection.click(point, &self.ownship);
        match outcome {
            ClickOutcome::Designated(bearing) => {
                self.metrics.record_designation();
                self.logger
                    .detail(&format!("designated target at {}", bearing.label()));
            }
            ClickOutcome::Removed { index } => {
                self.metrics.record_removal(1);
                self.logger
                    .detail(&format!("removed {}", DesignationList::display_name(index)));
            }
            ClickOutcome::OutOfRange(bearing) => {
                self.metrics.record_discard();
                self.logger
                    .detail(&format!("discarded click at {}", bearing.label()));
            }
            _ => {}
        }
        outcome
    }
}

impl Lifecycle for CompositeMapView {
    fn init(&mut self) {
        self.reset();
    }

    fn teardown(&mut self) {
        self.clear_designations();
        self.nav_points = NavPointSet::default();
        self.in_flight = false;
    }
}

impl Renderable for CompositeMapView {
    fn scene(&self) -> Scene {
        let mut scene = Scene::new(self.aspect.width, self.aspect.height);
        if !self.in_flight {
            scene.push(DrawCommand::Image {
                layer: Layer::Placeholder,
                source: NO_DATA_IMAGE.to_string(),
                rect: Rect::new(0.0, 0.0, self.aspect.width, self.aspect.height),
                rotation_deg: 0.0,
                pivot: self.aspect.center(),
            });
            return scene;
        }

        let center = self.aspect.center();
        if let Some(asset) = self.source.asset() {
            scene.push(DrawCommand::Image {
                layer: Layer::Map,
                source: asset.image.clone(),
                rect: self.map.image_rect(),
                rotation_deg: self.rotation.map,
                pivot: center,
            });
        }

        let outer = self.aspect.constraining() / 2.0;
        for ring in 1..=RANGE_RINGS {
            let radius = outer * f64::from(ring) / f64::from(RANGE_RINGS);
            scene.push(DrawCommand::Ellipse {
                layer: Layer::RangeRings,
                shape: Ellipse::new(center, radius, radius),
                rotation_deg: self.rotation.rings,
                stroke: StrokeStyle::Solid,
                filled: false,
                clip: None,
            });
        }

        let style = OverlayStyle {
            show_waypoints: self.layers.waypoints,
            show_threats: self.layers.threats,
            icon_size: OverlayStyle::icon_size_for(&self.map, self.source.segment()),
            min_threat_radius_px: self.config.min_threat_radius_px,
        };
        render_nav_points(&self.nav_points, &self.map, &style, &mut scene);

        let icon_size = self.config.icon_size_px * self.zoom();
        if self.layers.bullseye {
            let (bx, by) = self.ownship.bullseye_position();
            scene.push(DrawCommand::Icon {
                layer: Layer::Bullseye,
                icon: IconKind::Bullseye,
                center: self.map.project(bx, by),
                size: icon_size,
                rotation_deg: self.rotation.map,
                clip: None,
            });
        }

        scene.push(DrawCommand::Icon {
            layer: Layer::Ownship,
            icon: IconKind::Ownship,
            center,
            size: icon_size,
            rotation_deg: self.rotation.aircraft,
            clip: None,
        });

        self.selection.render(&self.ownship, &mut scene);
        scene.finish()
    }
}

impl ActionTarget for CompositeMapView {
    fn set_action(&mut self, action: ActionId, value: ActionValue) -> MapResult<()> {
        match action {
            ActionId::HeadingUp => {
                self.set_rotation_mode(RotationMode::from_heading_up(value.expect_bool(action)?))
            }
            ActionId::MapScale => self.set_scale(MapScale::from_input(value.expect_number(action)?)),
            ActionId::BullseyeVisible => self.layers.bullseye = value.expect_bool(action)?,
            ActionId::TargetsVisible => self.selection.set_targets_visible(value.expect_bool(action)?),
            ActionId::ThreatsVisible => self.layers.threats = value.expect_bool(action)?,
            ActionId::WaypointsVisible => self.layers.waypoints = value.expect_bool(action)?,
            ActionId::SelectionPanelVisible => self.selection.set_open(value.expect_bool(action)?),
            ActionId::ClearDesignations => {
                if value.expect_bool(action)? {
                    self.clear_designations();
                }
            }
            ActionId::SelectionRingsVisible => {
                self.selection.set_rings_visible(value.expect_bool(action)?)
            }
        }
        Ok(())
    }

    fn action_value(&self, action: ActionId) -> MapResult<ActionValue> {
        Ok(match action {
            ActionId::HeadingUp => self.rotation_mode.is_heading_up().into(),
            ActionId::MapScale => self.scale.input().into(),
            ActionId::BullseyeVisible => self.layers.bullseye.into(),
            ActionId::TargetsVisible => self.selection.targets_visible().into(),
            ActionId::ThreatsVisible => self.layers.threats.into(),
            ActionId::WaypointsVisible => self.layers.waypoints.into(),
            ActionId::SelectionPanelVisible => self.selection.is_open().into(),
            ActionId::ClearDesignations => false.into(),
            ActionId::SelectionRingsVisible => self.selection.rings_visible().into(),
        })
    }
}
