use serde::{Deserialize, Serialize};

use crate::config::ViewConfig;
use crate::math::{
    bearing_and_distance_nm, AspectRatios, BearingRange, Ellipse, Point, SelectionProjection,
};
use crate::prelude::{ClickOutcome, IgnoreReason};
use crate::render::{
    render_selection_labels, render_target_lines, DrawCommand, IconKind, Layer, Scene,
    StrokeStyle,
};
use crate::selection::designation::DesignationList;
use crate::sim::OwnshipState;

/// Remote-aircraft icons sit just inside the disc edge.
const REMOTE_ICON_EDGE: f64 = 0.92;

/// Values shown in the two always-visible summary boxes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectionSummary {
    pub ownship: BearingRange,
    pub latest_target: Option<BearingRange>,
}

/// Bullseye-centred disc: designation state, click handling and drawing.
#[derive(Debug, Clone)]
pub struct SelectionPanel {
    config: ViewConfig,
    projection: SelectionProjection,
    designations: DesignationList,
    open: bool,
    show_targets: bool,
    show_rings: bool,
    inhibit_mouse_action: bool,
}

impl SelectionPanel {
    pub fn new(config: ViewConfig, open: bool) -> Self {
        let projection = SelectionProjection::new(AspectRatios::default(), config.selection_base_scale);
        Self {
            config,
            projection,
            designations: DesignationList::default(),
            open,
            show_targets: true,
            show_rings: true,
            inhibit_mouse_action: false,
        }
    }

    pub fn resize(&mut self, aspect: AspectRatios) {
        self.projection = SelectionProjection::new(aspect, self.config.selection_base_scale);
        self.designations.reproject(&self.projection);
    }

    pub fn projection(&self) -> &SelectionProjection {
        &self.projection
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn targets_visible(&self) -> bool {
        self.show_targets
    }

    pub fn set_targets_visible(&mut self, visible: bool) {
        self.show_targets = visible;
    }

    pub fn rings_visible(&self) -> bool {
        self.show_rings
    }

    pub fn set_rings_visible(&mut self, visible: bool) {
        self.show_rings = visible;
    }

    fn targets_displayed(&self) -> bool {
        self.open && self.show_targets
    }

    pub fn designations(&self) -> &DesignationList {
        &self.designations
    }

    pub fn clear(&mut self) -> usize {
        self.designations.clear()
    }

    pub fn refresh(&mut self, ownship: &OwnshipState) {
        self.designations.refresh(ownship);
    }

    /// Held by the host while a redraw may re-enter the input handler.
    pub fn set_mouse_inhibited(&mut self, inhibited: bool) {
        self.inhibit_mouse_action = inhibited;
    }

    pub fn ownship_in_range(&self, ownship: &OwnshipState) -> bool {
        ownship.from_bullseye().distance_nm <= self.config.in_range_nm
    }

    pub fn summary(&self, ownship: &OwnshipState) -> SelectionSummary {
        SelectionSummary {
            ownship: ownship.from_bullseye(),
            latest_target: self
                .designations
                .latest()
                .filter(|_| self.targets_displayed())
                .map(|target| target.from_ownship),
        }
    }

    /// Hit-tests existing designations, otherwise designates the clicked
    /// point if it lies inside the disc and within acceptance range.
    pub fn click(&mut self, point: Point, ownship: &OwnshipState) -> ClickOutcome {
        if self.inhibit_mouse_action {
            return ClickOutcome::Ignored(IgnoreReason::Busy);
        }
        self.designate(point, ownship)
    }

    fn designate(&mut self, point: Point, ownship: &OwnshipState) -> ClickOutcome {
        if self.targets_displayed() {
            let hit_radius = self.config.hit_radius_px * self.projection.zoom();
            if let Some(index) = self.designations.hit_test(point, hit_radius) {
                self.designations.remove(index);
                return ClickOutcome::Removed { index };
            }
        }

        if !self.projection.disc().contains(point) {
            return ClickOutcome::Ignored(IgnoreReason::OutsideDisc);
        }

        let (dx_feet, dy_feet) = self.projection.screen_to_bullseye(point);
        let from_ownship = bearing_and_distance_nm(
            dx_feet - ownship.bullseye_dx_feet,
            dy_feet - ownship.bullseye_dy_feet,
        );
        if from_ownship.distance_nm > self.config.designation_range_nm {
            return ClickOutcome::OutOfRange(from_ownship);
        }

        self.designations
            .insert_front(dx_feet, dy_feet, &self.projection, ownship);
        ClickOutcome::Designated(from_ownship)
    }

    pub fn render(&self, ownship: &OwnshipState, scene: &mut Scene) {
        if !self.open {
            return;
        }
        let disc = self.projection.disc();
        let icon_size = self.config.icon_size_px * self.projection.zoom();

        scene.push(DrawCommand::Ellipse {
            layer: Layer::SelectionDisc,
            shape: disc,
            rotation_deg: 0.0,
            stroke: StrokeStyle::Solid,
            filled: true,
            clip: None,
        });
        scene.push(DrawCommand::icon(
            Layer::SelectionDisc,
            IconKind::Bullseye,
            disc.center,
            icon_size,
        ));

        if self.show_rings && self.config.selection_ring_step_nm > 0.0 {
            let mut ring_nm = self.config.selection_ring_step_nm;
            while ring_nm <= self.config.in_range_nm {
                let radius = self.projection.nm_to_pixels(ring_nm);
                scene.push(DrawCommand::Ellipse {
                    layer: Layer::SelectionRings,
                    shape: Ellipse::new(disc.center, radius, radius),
                    rotation_deg: 0.0,
                    stroke: StrokeStyle::Dashed,
                    filled: false,
                    clip: Some(disc),
                });
                ring_nm += self.config.selection_ring_step_nm;
            }
        }

        let ownship_at = self
            .projection
            .bullseye_to_screen(ownship.bullseye_dx_feet, ownship.bullseye_dy_feet);
        if self.ownship_in_range(ownship) {
            scene.push(DrawCommand::Icon {
                layer: Layer::Ownship,
                icon: IconKind::Aircraft,
                center: ownship_at,
                size: icon_size,
                rotation_deg: ownship.heading_deg,
                clip: Some(disc),
            });
        } else {
            let bearing = ownship.from_bullseye().bearing_deg;
            let (sin, cos) = bearing.to_radians().sin_cos();
            let edge = disc.center.offset(
                sin * disc.radius_x * REMOTE_ICON_EDGE,
                -cos * disc.radius_y * REMOTE_ICON_EDGE,
            );
            scene.push(DrawCommand::Icon {
                layer: Layer::Ownship,
                icon: IconKind::RemoteAircraft,
                center: edge,
                size: icon_size,
                rotation_deg: bearing,
                clip: Some(disc),
            });
        }

        let targets: Vec<(Point, BearingRange)> = if self.targets_displayed() {
            self.designations
                .iter()
                .map(|target| (target.screen, target.from_ownship))
                .collect()
        } else {
            Vec::new()
        };

        render_target_lines(
            ownship_at,
            targets.iter().map(|(screen, _)| *screen),
            disc,
            scene,
        );
        for target in self.designations.iter().filter(|_| self.targets_displayed()) {
            scene.push(DrawCommand::Icon {
                layer: Layer::Targets,
                icon: IconKind::Target,
                center: target.screen,
                size: icon_size,
                rotation_deg: 0.0,
                clip: Some(target.clip),
            });
        }

        let summary = self.summary(ownship);
        render_selection_labels(
            summary.ownship,
            summary.latest_target,
            &targets,
            disc,
            self.config.label_offset_px * self.projection.zoom(),
            scene,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::units::FEET_PER_NAUTICAL_MILE;

    fn panel() -> SelectionPanel {
        let mut panel = SelectionPanel::new(ViewConfig::composite(), true);
        panel.resize(AspectRatios::new(400.0, 400.0));
        panel
    }

    #[test]
    fn click_inside_range_designates_at_front() {
        let mut panel = panel();
        let outcome = panel.click(Point::new(200.0, 100.0), &OwnshipState::default());
        match outcome {
            ClickOutcome::Designated(bearing) => {
                assert_eq!(bearing.bearing_deg, 0.0);
                assert_eq!(bearing.distance_nm, 62.0);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(panel.designations().len(), 1);
    }

    #[test]
    fn clicking_an_existing_icon_removes_it() {
        let mut panel = panel();
        let ownship = OwnshipState::default();
        panel.click(Point::new(250.0, 150.0), &ownship);
        let outcome = panel.click(Point::new(253.0, 152.0), &ownship);
        assert_eq!(outcome, ClickOutcome::Removed { index: 0 });
        assert!(panel.designations().is_empty());
    }

    #[test]
    fn clicks_beyond_acceptance_range_are_dropped() {
        let mut panel = panel();
        let ownship = OwnshipState {
            bullseye_dy_feet: -50.0 * FEET_PER_NAUTICAL_MILE,
            ..Default::default()
        };
        let outcome = panel.click(Point::new(200.0, 40.0), &ownship);
        assert!(matches!(outcome, ClickOutcome::OutOfRange(b) if b.distance_nm > 125.0));
        assert!(panel.designations().is_empty());
    }

    #[test]
    fn inhibited_panel_ignores_clicks() {
        let mut panel = panel();
        panel.set_mouse_inhibited(true);
        assert_eq!(
            panel.click(Point::new(200.0, 150.0), &OwnshipState::default()),
            ClickOutcome::Ignored(IgnoreReason::Busy)
        );
        assert!(panel.designations().is_empty());

        panel.set_mouse_inhibited(false);
        assert!(matches!(
            panel.click(Point::new(200.0, 150.0), &OwnshipState::default()),
            ClickOutcome::Designated(_)
        ));
        assert_eq!(panel.designations().len(), 1);
    }

    #[test]
    fn remote_icon_when_ownship_far_from_bullseye() {
        let panel = panel();
        let far = OwnshipState {
            bullseye_dx_feet: 200.0 * FEET_PER_NAUTICAL_MILE,
            ..Default::default()
        };
        let mut scene = Scene::new(400.0, 400.0);
        panel.render(&far, &mut scene);
        assert_eq!(scene.icons(IconKind::RemoteAircraft).count(), 1);
        assert_eq!(scene.icons(IconKind::Aircraft).count(), 0);
    }

    #[test]
    fn hidden_targets_layer_hides_icons_lines_and_summary() {
        let mut panel = panel();
        let ownship = OwnshipState::default();
        panel.click(Point::new(200.0, 120.0), &ownship);
        panel.set_targets_visible(false);
        let mut scene = Scene::new(400.0, 400.0);
        panel.render(&ownship, &mut scene);
        assert_eq!(scene.icons(IconKind::Target).count(), 0);
        assert_eq!(scene.in_layer(Layer::TargetLines).count(), 0);
        assert!(panel.summary(&ownship).latest_target.is_none());
        assert_eq!(panel.designations().len(), 1);
    }
}
