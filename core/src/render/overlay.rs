use crate::catalog::SegmentClass;
use crate::math::MapProjection;
use crate::navpoints::{NavPointKind, NavPointSet};
use crate::render::{DrawCommand, IconKind, Layer, Scene, StrokeStyle};

const POINT_ONLY_RADIUS_PX: f64 = 2.0;
const THREAT_LABEL_GAP_PX: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub show_waypoints: bool,
    pub show_threats: bool,
    pub icon_size: f64,
    pub min_threat_radius_px: f64,
}

impl OverlayStyle {
    /// Icon edge proportional to one map segment at the current zoom.
    pub fn icon_size_for(projection: &MapProjection, segment: SegmentClass) -> f64 {
        (projection.map_pixel_size() / f64::from(segment.segments()) * 0.5).clamp(6.0, 24.0)
    }
}

/// Threat rings and labels, the dashed route, and waypoint/mark/position icons.
pub fn render_nav_points(
    points: &NavPointSet,
    projection: &MapProjection,
    style: &OverlayStyle,
    scene: &mut Scene,
) {
    if style.show_threats {
        for threat in points.used(NavPointKind::PreplannedThreat) {
            let center = projection.project(threat.x_feet, threat.y_feet);
            let radius = projection.feet_to_pixels(threat.radius_feet);
            if radius > style.min_threat_radius_px {
                scene.push(DrawCommand::circle(
                    Layer::Overlay,
                    center,
                    radius,
                    StrokeStyle::Solid,
                ));
            } else {
                scene.push(DrawCommand::Dot {
                    layer: Layer::Overlay,
                    center,
                    radius: POINT_ONLY_RADIUS_PX,
                });
            }
            if !threat.name.is_empty() {
                let below = radius.max(POINT_ONLY_RADIUS_PX) + THREAT_LABEL_GAP_PX;
                scene.push(DrawCommand::label(
                    Layer::Overlay,
                    threat.name.clone(),
                    center.offset(0.0, below),
                    true,
                ));
            }
        }
    }

    if !style.show_waypoints {
        return;
    }

    let route: Vec<_> = points
        .route()
        .map(|point| projection.project(point.x_feet, point.y_feet))
        .collect();
    for leg in route.windows(2) {
        scene.push(DrawCommand::Line {
            layer: Layer::Overlay,
            from: leg[0],
            to: leg[1],
            stroke: StrokeStyle::Dashed,
            clip: None,
        });
    }

    let icons = [
        (NavPointKind::Waypoint, IconKind::Waypoint),
        (NavPointKind::Mark, IconKind::Mark),
        (NavPointKind::PositionPoint, IconKind::PositionPoint),
    ];
    for (kind, icon) in icons {
        for point in points.used(kind) {
            scene.push(DrawCommand::icon(
                Layer::Overlay,
                icon,
                projection.project(point.x_feet, point.y_feet),
                style.icon_size,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::AspectRatios;

    fn projection() -> MapProjection {
        MapProjection::fitted(&AspectRatios::new(400.0, 400.0), 3_358_700.0, 1.0, (0.5, 0.5))
    }

    fn style(show_waypoints: bool, show_threats: bool) -> OverlayStyle {
        OverlayStyle {
            show_waypoints,
            show_threats,
            icon_size: 10.0,
            min_threat_radius_px: 3.0,
        }
    }

    const FEED: &str = "\
0:WP,0,1000000,1000000
1:WP,0,1100000,1100000
2:WP,0,1200000,1200000
4:WP,0,1300000,1300000
0:SA-10,2,900000,900000,,SA-10,250000
1:MANPAD,2,950000,950000,,SA-18,5000
";

    #[test]
    fn large_threats_get_rings_small_ones_dots() {
        let points = NavPointSet::parse_feed(FEED);
        let mut scene = Scene::new(400.0, 400.0);
        render_nav_points(&points, &projection(), &style(false, true), &mut scene);

        let rings = scene
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Ellipse { .. }))
            .count();
        let dots = scene
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Dot { .. }))
            .count();
        assert_eq!((rings, dots), (1, 1));
        assert_eq!(scene.label_texts(), vec!["SA-10", "SA-18"]);
    }

    #[test]
    fn route_lines_break_at_first_gap_but_icons_do_not() {
        let points = NavPointSet::parse_feed(FEED);
        let mut scene = Scene::new(400.0, 400.0);
        render_nav_points(&points, &projection(), &style(true, false), &mut scene);

        let dashed = scene
            .commands()
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    DrawCommand::Line {
                        stroke: StrokeStyle::Dashed,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(dashed, 2);
        assert_eq!(scene.icons(IconKind::Waypoint).count(), 4);
    }

    #[test]
    fn hidden_layers_draw_nothing() {
        let points = NavPointSet::parse_feed(FEED);
        let mut scene = Scene::new(400.0, 400.0);
        render_nav_points(&points, &projection(), &style(false, false), &mut scene);
        assert!(scene.is_empty());
    }
}
