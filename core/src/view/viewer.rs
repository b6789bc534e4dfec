use serde::{Deserialize, Serialize};

use crate::catalog::{MapAsset, MapCatalog};
use crate::config::ViewConfig;
use crate::math::{AspectRatios, MapProjection, Point};
use crate::navpoints::NavPointSet;
use crate::prelude::{
    ClickOutcome, Clickable, IgnoreReason, Lifecycle, Renderable, Resizable, TickOutcome,
    Tickable,
};
use crate::render::{render_nav_points, DrawCommand, Layer, OverlayStyle, Scene};
use crate::sim::{keys, TelemetrySource};
use crate::telemetry::{LogManager, MetricsRecorder, ViewMetrics};
use crate::view::map_source::MapSource;

/// Magnification applied by a tap on the base view.
pub const VIEWER_ZOOM_FACTOR: f64 = 4.0;

const BASE_FOCUS: (f64, f64) = (0.5, 0.5);

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ViewerZoom {
    #[default]
    Base,
    /// Crop centred on `focus`, given as a fraction of the image.
    Zoomed { focus: (f64, f64) },
}

/// North-up static map with tap-to-zoom. No selection disc, no rotation.
#[derive(Debug)]
pub struct ZoomableMapViewer {
    config: ViewConfig,
    source: MapSource,
    aspect: AspectRatios,
    nav_points: NavPointSet,
    zoom: ViewerZoom,
    visible: bool,
    projection: MapProjection,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl ZoomableMapViewer {
    pub fn new(config: ViewConfig, catalog: MapCatalog) -> Self {
        let mut viewer = Self {
            config,
            source: MapSource::new(catalog),
            aspect: AspectRatios::default(),
            nav_points: NavPointSet::default(),
            zoom: ViewerZoom::Base,
            visible: true,
            projection: MapProjection::default(),
            logger: LogManager::new("map_viewer"),
            metrics: MetricsRecorder::new(),
        };
        viewer.recompute();
        viewer
    }

    fn recompute(&mut self) {
        let (factor, focus) = match self.zoom {
            ViewerZoom::Base => (1.0, BASE_FOCUS),
            ViewerZoom::Zoomed { focus } => (VIEWER_ZOOM_FACTOR, focus),
        };
        self.projection =
            MapProjection::fitted(&self.aspect, self.source.footprint_feet(), factor, focus);
    }

    /// Brings a dismissed viewer back at base zoom.
    pub fn show(&mut self) {
        self.visible = true;
        self.zoom = ViewerZoom::Base;
        self.recompute();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn zoom(&self) -> ViewerZoom {
        self.zoom
    }

    pub fn projection(&self) -> &MapProjection {
        &self.projection
    }

    pub fn select_theater(&mut self, theater: &str) -> bool {
        if !self.source.select_theater(theater) {
            return false;
        }
        self.metrics.record_map_swap();
        self.zoom = ViewerZoom::Base;
        self.recompute();
        true
    }

    pub fn current_asset(&self) -> Option<&MapAsset> {
        self.source.asset()
    }

    pub fn nav_points(&self) -> &NavPointSet {
        &self.nav_points
    }

    pub fn metrics(&self) -> ViewMetrics {
        self.metrics.snapshot()
    }
}

impl Default for ZoomableMapViewer {
    fn default() -> Self {
        Self::new(ViewConfig::default(), MapCatalog::default())
    }
}

/// Keeps a zoomed crop inside the image.
fn clamp_focus(fraction: (f64, f64)) -> (f64, f64) {
    let half = 0.5 / VIEWER_ZOOM_FACTOR;
    (
        fraction.0.clamp(half, 1.0 - half),
        fraction.1.clamp(half, 1.0 - half),
    )
}

impl Resizable for ZoomableMapViewer {
    fn resize(&mut self, width: f64, height: f64) {
        self.aspect = AspectRatios::new(width, height);
        self.recompute();
    }
}

impl Tickable for ZoomableMapViewer {
    fn tick(&mut self, telemetry: &dyn TelemetrySource) -> TickOutcome {
        self.metrics.record_tick();
        let mut outcome = TickOutcome::default();

        let theater = telemetry.read(keys::THEATER);
        if self.select_theater(theater.as_text()) {
            self.logger
                .record(&format!("viewer map changed for theater {}", theater.as_text()));
            outcome.map_image_changed = true;
            outcome.redraw = true;
        }
        if telemetry.read(keys::NAV_POINTS_CHANGED).as_bool() {
            self.nav_points = NavPointSet::parse_feed(telemetry.read(keys::NAV_POINTS_FEED).as_text());
            outcome.nav_points_updated = true;
            outcome.redraw = true;
        }
        outcome
    }
}

impl Clickable for ZoomableMapViewer {
    fn on_mouse_down(&mut self, point: Point) -> ClickOutcome {
        if !self.visible {
            return ClickOutcome::Ignored(IgnoreReason::Hidden);
        }
        let outcome = match self.zoom {
            ViewerZoom::Zoomed { .. } => {
                self.zoom = ViewerZoom::Base;
                ClickOutcome::ZoomedOut
            }
            ViewerZoom::Base => match self.projection.image_fraction(point) {
                Some(fraction) => {
                    self.zoom = ViewerZoom::Zoomed {
                        focus: clamp_focus(fraction),
                    };
                    ClickOutcome::ZoomedIn
                }
                None => {
                    self.visible = false;
                    self.logger.detail("viewer dismissed");
                    ClickOutcome::Dismissed
                }
            },
        };
        self.recompute();
        outcome
    }
}

impl Lifecycle for ZoomableMapViewer {
    fn init(&mut self) {
        self.show();
    }

    fn teardown(&mut self) {
        self.nav_points = NavPointSet::default();
        self.zoom = ViewerZoom::Base;
        self.visible = false;
    }
}

impl Renderable for ZoomableMapViewer {
    fn scene(&self) -> Scene {
        let mut scene = Scene::new(self.aspect.width, self.aspect.height);
        if !self.visible {
            return scene;
        }
        if let Some(asset) = self.source.asset() {
            scene.push(DrawCommand::Image {
                layer: Layer::Map,
                source: asset.image.clone(),
                rect: self.projection.image_rect(),
                rotation_deg: 0.0,
                pivot: self.projection.center(),
            });
        }
        let style = OverlayStyle {
            show_waypoints: true,
            show_threats: true,
            icon_size: OverlayStyle::icon_size_for(&self.projection, self.source.segment()),
            min_threat_radius_px: self.config.min_threat_radius_px,
        };
        render_nav_points(&self.nav_points, &self.projection, &style, &mut scene);
        scene.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::IconKind;
    use crate::sim::TelemetrySnapshot;

    fn viewer() -> ZoomableMapViewer {
        let mut viewer = ZoomableMapViewer::default();
        viewer.init();
        viewer.resize(600.0, 400.0);
        viewer.tick(&TelemetrySnapshot::new().with(keys::THEATER, "Korea"));
        viewer
    }

    #[test]
    fn base_view_fits_the_constraining_dimension() {
        let viewer = viewer();
        let rect = viewer.projection().image_rect();
        assert_eq!(rect.width, 400.0);
        assert_eq!(rect.x, 100.0);
        assert_eq!(rect.y, 0.0);
    }

    #[test]
    fn tap_zooms_in_and_any_second_tap_zooms_out() {
        let mut viewer = viewer();
        assert_eq!(viewer.on_mouse_down(Point::new(300.0, 200.0)), ClickOutcome::ZoomedIn);
        assert_eq!(viewer.zoom(), ViewerZoom::Zoomed { focus: (0.5, 0.5) });
        assert_eq!(viewer.projection().map_pixel_size(), 1600.0);
        assert_eq!(viewer.on_mouse_down(Point::new(5.0, 5.0)), ClickOutcome::ZoomedOut);
        assert_eq!(viewer.zoom(), ViewerZoom::Base);
        assert!(viewer.is_visible());
    }

    #[test]
    fn zoom_focus_stays_inside_the_image() {
        let mut viewer = viewer();
        viewer.on_mouse_down(Point::new(101.0, 1.0));
        match viewer.zoom() {
            ViewerZoom::Zoomed { focus } => assert_eq!(focus, (0.125, 0.125)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn click_outside_the_map_dismisses() {
        let mut viewer = viewer();
        assert_eq!(viewer.on_mouse_down(Point::new(20.0, 200.0)), ClickOutcome::Dismissed);
        assert!(!viewer.is_visible());
        assert!(viewer.scene().is_empty());
        assert_eq!(
            viewer.on_mouse_down(Point::new(300.0, 200.0)),
            ClickOutcome::Ignored(IgnoreReason::Hidden)
        );
        viewer.show();
        assert!(viewer.is_visible());
    }

    #[test]
    fn overlay_draws_waypoints_without_rotation() {
        let mut viewer = viewer();
        let feed = "0:0,0,1600000,1500000\n1:0,0,1700000,1550000";
        let snapshot = TelemetrySnapshot::new()
            .with(keys::THEATER, "Korea")
            .with(keys::NAV_POINTS_CHANGED, true)
            .with(keys::NAV_POINTS_FEED, feed);
        assert!(viewer.tick(&snapshot).nav_points_updated);
        let scene = viewer.scene();
        assert_eq!(scene.icons(IconKind::Waypoint).count(), 2);
        assert_eq!(scene.in_layer(Layer::Map).count(), 1);
    }
}
