use anyhow::Context;
use tacmapcore::catalog::MapCatalog;
use tacmapcore::math::Point;
use tacmapcore::selection::DesignationList;
use tacmapcore::{
    ActionId, ActionTarget, ActionValue, BullseyeView, ClickOutcome, Clickable, CompositeMapView,
    Lifecycle, Renderable, Resizable, TickOutcome, Tickable, ViewConfig, ZoomableMapViewer,
};

use crate::generator::profile::FlightProfile;
use crate::gui_bridge::model::{DesignationSummary, VisualizationModel};
use crate::workflow::config::ScenarioConfig;

/// The three views driven from one simulated flight.
#[derive(Debug)]
pub struct Session {
    config: ScenarioConfig,
    profile: FlightProfile,
    composite: CompositeMapView,
    bullseye: BullseyeView,
    viewer: ZoomableMapViewer,
    last_outcome: TickOutcome,
    status: String,
}

impl Session {
    pub fn new(config: ScenarioConfig) -> anyhow::Result<Self> {
        let catalog = MapCatalog::new(config.user_catalog()?);
        let mut composite = CompositeMapView::new(ViewConfig::composite(), catalog.clone());
        let mut bullseye = BullseyeView::new(ViewConfig::bullseye());
        let mut viewer = ZoomableMapViewer::new(ViewConfig::composite(), catalog);

        composite.init();
        bullseye.init();
        viewer.init();
        composite.resize(config.width, config.height);
        bullseye.resize(config.width, config.height);
        viewer.resize(config.width, config.height);

        composite
            .set_action(ActionId::MapScale, config.scale.into())
            .context("applying initial map scale")?;
        composite
            .set_action(ActionId::HeadingUp, config.heading_up.into())
            .context("applying initial rotation mode")?;
        for action in [
            ActionId::SelectionPanelVisible,
            ActionId::BullseyeVisible,
            ActionId::ThreatsVisible,
            ActionId::WaypointsVisible,
        ] {
            composite.set_action(action, true.into())?;
        }

        Ok(Self {
            profile: FlightProfile::new(&config),
            config,
            composite,
            bullseye,
            viewer,
            last_outcome: TickOutcome::default(),
            status: "waiting for first tick".to_string(),
        })
    }

    pub fn tick(&self) -> usize {
        self.profile.tick()
    }

    pub fn composite(&self) -> &CompositeMapView {
        &self.composite
    }

    /// Feeds one telemetry snapshot to every view, then replays the clicks
    /// and actions scripted for that tick.
    pub fn step(&mut self) -> anyhow::Result<TickOutcome> {
        let tick = self.profile.tick();
        let snapshot = self.profile.next_snapshot();
        let outcome = self.composite.tick(&snapshot);
        self.bullseye.tick(&snapshot);
        self.viewer.tick(&snapshot);

        let actions: Vec<_> = self
            .config
            .actions
            .iter()
            .filter(|scripted| scripted.tick == tick)
            .cloned()
            .collect();
        for scripted in actions {
            self.apply_action(&scripted.action, scripted.value)
                .with_context(|| format!("scripted action at tick {tick}"))?;
        }
        let clicks: Vec<_> = self
            .config
            .clicks
            .iter()
            .filter(|scripted| scripted.tick == tick)
            .map(|scripted| Point::new(scripted.x, scripted.y))
            .collect();
        for point in clicks {
            self.click(point);
        }

        if outcome.flight_ended {
            self.status = "flight ended".to_string();
        } else if self.composite.in_flight() {
            self.status = format!("tick {tick} in flight");
        }
        self.last_outcome = outcome;
        Ok(outcome)
    }

    pub fn click(&mut self, point: Point) -> ClickOutcome {
        let outcome = self.composite.on_mouse_down(point);
        log::debug!("click at ({:.0}, {:.0}) -> {outcome:?}", point.x, point.y);
        outcome
    }

    /// Applies a named action to the composite view, and to the bullseye
    /// view when it supports the action.
    pub fn apply_action(&mut self, name: &str, value: ActionValue) -> anyhow::Result<()> {
        let action: ActionId = name.parse()?;
        self.composite
            .set_action(action, value)
            .with_context(|| format!("applying {name}"))?;
        if matches!(
            action,
            ActionId::ClearDesignations
                | ActionId::SelectionRingsVisible
                | ActionId::TargetsVisible
        ) {
            self.bullseye.set_action(action, value)?;
        }
        Ok(())
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.composite.resize(width, height);
        self.bullseye.resize(width, height);
        self.viewer.resize(width, height);
    }

    pub fn model(&self) -> VisualizationModel {
        let designations = self
            .composite
            .designations()
            .iter()
            .enumerate()
            .map(|(index, target)| DesignationSummary {
                name: DesignationList::display_name(index),
                label: target.from_ownship.label(),
                bearing_deg: target.from_ownship.bearing_deg,
                distance_nm: target.from_ownship.distance_nm,
            })
            .collect();
        let actions = ActionId::ALL
            .into_iter()
            .filter_map(|action| {
                self.composite
                    .action_value(action)
                    .ok()
                    .map(|value| (action.name().to_string(), value))
            })
            .collect();

        VisualizationModel {
            tick: self.profile.tick(),
            status: self.status.clone(),
            in_flight: self.composite.in_flight(),
            map_image: self
                .composite
                .current_asset()
                .map(|asset| asset.image.clone()),
            scene: self.composite.scene(),
            bullseye_scene: self.bullseye.scene(),
            viewer_scene: self.viewer.scene(),
            summary: self.composite.summary(),
            designations,
            actions,
            last_outcome: self.last_outcome,
            metrics: self.composite.metrics(),
        }
    }
}

/// Totals reported after an offline run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks: usize,
    pub designations: usize,
    pub map_swaps: usize,
    pub clicks_discarded: usize,
    pub scene_commands: usize,
}

pub struct Runner {
    config: ScenarioConfig,
}

impl Runner {
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> anyhow::Result<(Session, RunSummary)> {
        let mut session = Session::new(self.config.clone()).context("building session")?;
        for _ in 0..self.config.ticks {
            session.step()?;
        }
        let metrics = session.composite().metrics();
        let summary = RunSummary {
            ticks: metrics.ticks,
            designations: session.composite().designations().len(),
            map_swaps: metrics.map_swaps,
            clicks_discarded: metrics.clicks_discarded,
            scene_commands: session.composite().scene().commands().len(),
        };
        Ok((session, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::{ScriptedAction, ScriptedClick};

    fn scenario() -> ScenarioConfig {
        ScenarioConfig {
            width: 400.0,
            height: 400.0,
            ticks: 6,
            clicks: vec![
                ScriptedClick { tick: 1, x: 200.0, y: 120.0 },
                ScriptedClick { tick: 2, x: 260.0, y: 200.0 },
            ],
            actions: vec![ScriptedAction {
                tick: 4,
                action: "heading_up".to_string(),
                value: ActionValue::Bool(true),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn runner_executes_scripted_scenario() {
        let (session, summary) = Runner::new(scenario()).execute().unwrap();
        assert_eq!(summary.ticks, 6);
        assert_eq!(summary.designations, 2);
        assert_eq!(summary.map_swaps, 1);
        assert!(session.composite().rotation_mode().is_heading_up());
        let model = session.model();
        assert_eq!(model.designations.len(), 2);
        assert_eq!(model.map_image.as_deref(), Some("Images/Maps/korea.png"));
        assert!(model.in_flight);
    }

    #[test]
    fn landing_clears_designations() {
        let config = ScenarioConfig {
            landing_tick: Some(4),
            ..scenario()
        };
        let (session, _) = Runner::new(config).execute().unwrap();
        assert!(session.composite().designations().is_empty());
        assert_eq!(session.model().status, "flight ended");
    }

    #[test]
    fn unknown_action_name_is_an_error() {
        let mut session = Session::new(scenario()).unwrap();
        assert!(session.apply_action("barrel_roll", true.into()).is_err());
        session.apply_action("clear_designations", true.into()).unwrap();
    }
}
