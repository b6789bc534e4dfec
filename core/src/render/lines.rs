use crate::math::{Ellipse, Point};
use crate::render::{DrawCommand, Layer, Scene, StrokeStyle};

/// Dashed line from the ownship's disc position to each designated target.
pub fn render_target_lines(
    origin: Point,
    targets: impl IntoIterator<Item = Point>,
    clip: Ellipse,
    scene: &mut Scene,
) {
    for target in targets {
        scene.push(DrawCommand::Line {
            layer: Layer::TargetLines,
            from: origin,
            to: target,
            stroke: StrokeStyle::Dashed,
            clip: Some(clip),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_line_per_target() {
        let mut scene = Scene::new(100.0, 100.0);
        let clip = Ellipse::new(Point::new(50.0, 50.0), 50.0, 50.0);
        render_target_lines(
            Point::new(50.0, 50.0),
            [Point::new(10.0, 10.0), Point::new(90.0, 20.0)],
            clip,
            &mut scene,
        );
        assert_eq!(scene.in_layer(Layer::TargetLines).count(), 2);
    }
}
