use crate::actions::{ActionId, ActionTarget, ActionValue};
use crate::config::ViewConfig;
use crate::math::{AspectRatios, Point, Rect};
use crate::prelude::{
    ClickOutcome, Clickable, IgnoreReason, Lifecycle, MapError, MapResult, Renderable, Resizable,
    TickOutcome, Tickable,
};
use crate::render::{DrawCommand, Layer, Scene};
use crate::selection::{DesignationList, SelectionPanel, SelectionSummary};
use crate::sim::{keys, OwnshipState, TelemetrySource};
use crate::telemetry::{LogManager, MetricsRecorder, ViewMetrics};
use crate::view::map_source::NO_DATA_IMAGE;

/// Standalone, always-open selection disc with no background map.
#[derive(Debug)]
pub struct BullseyeView {
    aspect: AspectRatios,
    ownship: OwnshipState,
    in_flight: bool,
    selection: SelectionPanel,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl BullseyeView {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            aspect: AspectRatios::default(),
            ownship: OwnshipState::default(),
            in_flight: false,
            selection: SelectionPanel::new(config, true),
            logger: LogManager::new("bullseye_view"),
            metrics: MetricsRecorder::new(),
        }
    }

    pub fn clear_designations(&mut self) -> usize {
        let removed = self.selection.clear();
        if removed > 0 {
            self.metrics.record_removal(removed);
        }
        removed
    }

    pub fn set_mouse_inhibited(&mut self, inhibited: bool) {
        self.selection.set_mouse_inhibited(inhibited);
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

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn metrics(&self) -> ViewMetrics {
        self.metrics.snapshot()
    }
}

impl Default for BullseyeView {
    fn default() -> Self {
        Self::new(ViewConfig::bullseye())
    }
}

impl Resizable for BullseyeView {
    fn resize(&mut self, width: f64, height: f64) {
        self.aspect = AspectRatios::new(width, height);
        self.selection.resize(self.aspect);
    }
}

impl Tickable for BullseyeView {
    fn tick(&mut self, telemetry: &dyn TelemetrySource) -> TickOutcome {
        self.metrics.record_tick();
        let mut outcome = TickOutcome::default();

        let in_flight = telemetry.read(keys::FLIGHT_ACTIVE).as_bool();
        if self.in_flight != in_flight {
            outcome.redraw = true;
            if !in_flight {
                self.clear_designations();
                self.logger.record("flight ended, bullseye designations cleared");
                outcome.flight_ended = true;
            }
        }
        self.in_flight = in_flight;

        self.ownship = OwnshipState::read(telemetry);
        self.selection.refresh(&self.ownship);
        outcome.redraw |= self.in_flight;
        outcome
    }
}

impl Clickable for BullseyeView {
    fn on_mouse_down(&mut self, point: Point) -> ClickOutcome {
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
            ClickOutcome::Removed { .. } => self.metrics.record_removal(1),
            ClickOutcome::OutOfRange(_) => self.metrics.record_discard(),
            _ => {}
        }
        outcome
    }
}

impl Lifecycle for BullseyeView {
    fn init(&mut self) {
        self.clear_designations();
        self.in_flight = false;
    }

    fn teardown(&mut self) {
        self.clear_designations();
        self.in_flight = false;
    }
}

impl Renderable for BullseyeView {
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
        self.selection.render(&self.ownship, &mut scene);
        scene.finish()
    }
}

impl ActionTarget for BullseyeView {
    fn set_action(&mut self, action: ActionId, value: ActionValue) -> MapResult<()> {
        match action {
            ActionId::ClearDesignations => {
                if value.expect_bool(action)? {
                    self.clear_designations();
                }
            }
            ActionId::SelectionRingsVisible => {
                self.selection.set_rings_visible(value.expect_bool(action)?)
            }
            ActionId::TargetsVisible => self.selection.set_targets_visible(value.expect_bool(action)?),
            other => return Err(MapError::UnsupportedAction(other.name())),
        }
        Ok(())
    }

    fn action_value(&self, action: ActionId) -> MapResult<ActionValue> {
        match action {
            ActionId::ClearDesignations => Ok(ActionValue::Bool(false)),
            ActionId::SelectionRingsVisible => Ok(self.selection.rings_visible().into()),
            ActionId::TargetsVisible => Ok(self.selection.targets_visible().into()),
            other => Err(MapError::UnsupportedAction(other.name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::IconKind;
    use crate::sim::TelemetrySnapshot;

    fn live() -> TelemetrySnapshot {
        TelemetrySnapshot::new().with(keys::FLIGHT_ACTIVE, true)
    }

    fn view() -> BullseyeView {
        let mut view = BullseyeView::default();
        view.init();
        view.resize(400.0, 400.0);
        view.tick(&live());
        view
    }

    #[test]
    fn standalone_disc_uses_the_wider_span() {
        let mut view = view();
        // 100 px north covers 124 nm at the standalone scale
        match view.on_mouse_down(Point::new(200.0, 100.0)) {
            ClickOutcome::Designated(bearing) => assert_eq!(bearing.distance_nm, 124.0),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            view.on_mouse_down(Point::new(200.0, 80.0)),
            ClickOutcome::OutOfRange(_)
        ));
        assert_eq!(view.designations().len(), 1);
        assert_eq!(view.metrics().clicks_discarded, 1);
    }

    #[test]
    fn clear_action_is_edge_triggered() {
        let mut view = view();
        view.on_mouse_down(Point::new(220.0, 180.0));
        view.set_action(ActionId::ClearDesignations, false.into())
            .unwrap();
        assert_eq!(view.designations().len(), 1);
        view.set_action(ActionId::ClearDesignations, true.into())
            .unwrap();
        assert!(view.designations().is_empty());
        assert!(view.summary().latest_target.is_none());
    }

    #[test]
    fn map_actions_are_not_supported() {
        let mut view = view();
        assert!(matches!(
            view.set_action(ActionId::MapScale, 2.0.into()),
            Err(MapError::UnsupportedAction("map_scale"))
        ));
    }

    #[test]
    fn disc_is_always_drawn_while_in_flight() {
        let view = view();
        let scene = view.scene();
        assert_eq!(scene.in_layer(Layer::SelectionDisc).count(), 2);
        assert_eq!(scene.icons(IconKind::Aircraft).count(), 1);
    }
}
