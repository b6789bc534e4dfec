use crate::math::{BearingRange, Ellipse, Point};
use crate::render::{Align, DrawCommand, Layer, Scene};

/// Beyond this fraction of the disc radius labels are pulled towards the centre.
const EDGE_FRACTION: f64 = 0.7;
const SUMMARY_LINE_PX: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub anchor: Point,
    pub align: Align,
}

/// Puts a target label beside its icon without covering it: right/left by
/// the east/west half of the bearing, above/below by the north/south half,
/// and inwards on both axes once the icon sits near the disc edge.
pub fn label_anchor(
    icon: Point,
    bearing_deg: f64,
    center: Point,
    radius_px: f64,
    offset: f64,
) -> LabelPlacement {
    let mut right = bearing_deg < 180.0;
    let mut above = !(90.0..270.0).contains(&bearing_deg);

    if radius_px > 0.0 && icon.distance_to(center) > radius_px * EDGE_FRACTION {
        right = icon.x <= center.x;
        above = icon.y >= center.y;
    }

    let dx = if right { offset } else { -offset };
    let dy = if above { -offset } else { offset };
    LabelPlacement {
        anchor: icon.offset(dx, dy),
        align: if right { Align::Left } else { Align::Right },
    }
}

pub fn target_label(index: usize, bearing: &BearingRange) -> String {
    format!("{:02} {}", index + 1, bearing.label())
}

/// The two summary boxes (ownship from bullseye, most recent target from
/// ownship) plus one box per target.
pub fn render_selection_labels(
    ownship: BearingRange,
    latest_target: Option<BearingRange>,
    targets: &[(Point, BearingRange)],
    disc: Ellipse,
    offset: f64,
    scene: &mut Scene,
) {
    let corner = disc
        .center
        .offset(-disc.radius_x, -disc.radius_y + SUMMARY_LINE_PX);
    scene.push(DrawCommand::label(
        Layer::Labels,
        format!("BE {}", ownship.label()),
        corner,
        true,
    ));
    let latest = latest_target
        .map(|target| target.label())
        .unwrap_or_else(|| "---/---".to_string());
    scene.push(DrawCommand::label(
        Layer::Labels,
        format!("T01 {latest}"),
        corner.offset(0.0, SUMMARY_LINE_PX),
        true,
    ));

    for (index, (icon, bearing)) in targets.iter().enumerate() {
        let placement = label_anchor(*icon, bearing.bearing_deg, disc.center, disc.radius_x, offset);
        scene.push(DrawCommand::Label {
            layer: Layer::Labels,
            text: target_label(index, bearing),
            anchor: placement.anchor,
            align: placement.align,
            boxed: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Point = Point::new(200.0, 200.0);

    #[test]
    fn inner_targets_label_by_bearing_quadrant() {
        let ne = label_anchor(Point::new(210.0, 190.0), 45.0, CENTER, 200.0, 10.0);
        assert_eq!(ne.anchor, Point::new(220.0, 180.0));
        assert_eq!(ne.align, Align::Left);

        let sw = label_anchor(Point::new(190.0, 210.0), 225.0, CENTER, 200.0, 10.0);
        assert_eq!(sw.anchor, Point::new(180.0, 220.0));
        assert_eq!(sw.align, Align::Right);
    }

    #[test]
    fn edge_targets_label_towards_centre() {
        let placement = label_anchor(Point::new(370.0, 200.0), 45.0, CENTER, 200.0, 10.0);
        assert_eq!(placement.align, Align::Right);
        assert!(placement.anchor.x < 370.0);
    }

    #[test]
    fn summary_shows_placeholder_without_targets() {
        let mut scene = Scene::new(400.0, 400.0);
        let disc = Ellipse::new(CENTER, 200.0, 200.0);
        render_selection_labels(BearingRange::default(), None, &[], disc, 10.0, &mut scene);
        assert_eq!(scene.label_texts(), vec!["BE 000/0", "T01 ---/---"]);
    }

    #[test]
    fn targets_are_numbered_from_one() {
        let bearing = BearingRange {
            bearing_deg: 90.0,
            distance_nm: 42.0,
        };
        assert_eq!(target_label(0, &bearing), "01 090/42");
    }
}
