//! Headless draw-command model emitted by the views and painted by a host.

pub mod lines;
pub mod overlay;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::math::{Ellipse, Point, Rect};

pub use lines::render_target_lines;
pub use overlay::{render_nav_points, OverlayStyle};
pub use text::{label_anchor, render_selection_labels, LabelPlacement};

/// Paint order, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Layer {
    Map,
    RangeRings,
    Overlay,
    Bullseye,
    Ownship,
    SelectionDisc,
    SelectionRings,
    TargetLines,
    Targets,
    Labels,
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrokeStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconKind {
    Ownship,
    Bullseye,
    Aircraft,
    RemoteAircraft,
    Target,
    Waypoint,
    Mark,
    PositionPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Image {
        layer: Layer,
        source: String,
        rect: Rect,
        rotation_deg: f64,
        pivot: Point,
    },
    Ellipse {
        layer: Layer,
        shape: Ellipse,
        rotation_deg: f64,
        stroke: StrokeStyle,
        filled: bool,
        clip: Option<Ellipse>,
    },
    Dot {
        layer: Layer,
        center: Point,
        radius: f64,
    },
    Line {
        layer: Layer,
        from: Point,
        to: Point,
        stroke: StrokeStyle,
        clip: Option<Ellipse>,
    },
    Label {
        layer: Layer,
        text: String,
        anchor: Point,
        align: Align,
        boxed: bool,
    },
    Icon {
        layer: Layer,
        icon: IconKind,
        center: Point,
        size: f64,
        rotation_deg: f64,
        clip: Option<Ellipse>,
    },
}

impl DrawCommand {
    pub fn layer(&self) -> Layer {
        match self {
            DrawCommand::Image { layer, .. }
            | DrawCommand::Ellipse { layer, .. }
            | DrawCommand::Dot { layer, .. }
            | DrawCommand::Line { layer, .. }
            | DrawCommand::Label { layer, .. }
            | DrawCommand::Icon { layer, .. } => *layer,
        }
    }

    pub fn circle(layer: Layer, center: Point, radius: f64, stroke: StrokeStyle) -> Self {
        DrawCommand::Ellipse {
            layer,
            shape: Ellipse::new(center, radius, radius),
            rotation_deg: 0.0,
            stroke,
            filled: false,
            clip: None,
        }
    }

    pub fn icon(layer: Layer, icon: IconKind, center: Point, size: f64) -> Self {
        DrawCommand::Icon {
            layer,
            icon,
            center,
            size,
            rotation_deg: 0.0,
            clip: None,
        }
    }

    pub fn label(layer: Layer, text: impl Into<String>, anchor: Point, boxed: bool) -> Self {
        DrawCommand::Label {
            layer,
            text: text.into(),
            anchor,
            align: Align::Left,
            boxed,
        }
    }
}

/// Ordered draw list for one frame of one view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Stable sort by layer; insertion order is kept within a layer.
    pub fn finish(mut self) -> Self {
        self.commands.sort_by_key(DrawCommand::layer);
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn in_layer(&self, layer: Layer) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |command| command.layer() == layer)
    }

    pub fn label_texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn icons(&self, kind: IconKind) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(move |command| {
            matches!(command, DrawCommand::Icon { icon, .. } if *icon == kind)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_orders_by_layer_and_keeps_insertion_order() {
        let mut scene = Scene::new(10.0, 10.0);
        scene.push(DrawCommand::label(Layer::Labels, "b", Point::default(), false));
        scene.push(DrawCommand::icon(
            Layer::Map,
            IconKind::Ownship,
            Point::default(),
            4.0,
        ));
        scene.push(DrawCommand::label(Layer::Labels, "c", Point::default(), false));
        let scene = scene.finish();
        assert_eq!(scene.commands()[0].layer(), Layer::Map);
        assert_eq!(scene.label_texts(), vec!["b", "c"]);
    }

    #[test]
    fn commands_serialize_with_kind_tag() {
        let command = DrawCommand::Dot {
            layer: Layer::Overlay,
            center: Point::new(1.0, 2.0),
            radius: 2.0,
        };
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["kind"], "dot");
    }
}
