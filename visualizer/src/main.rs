use iced::{
    mouse, time,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, LineDash, Path, Stroke},
        column, row, scrollable, text, Column, Container, Row,
    },
    Alignment, Color, Element, Length, Point, Rectangle, Renderer, Subscription, Task, Theme,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, f32::consts::TAU, time::Duration};
use tacmapcore::render::{Align, DrawCommand, IconKind, Layer, Scene, StrokeStyle};
use tacmapcore::selection::SelectionSummary;
use tacmapcore::telemetry::ViewMetrics;
use tacmapcore::{math, ActionId, ActionValue};

const BRIDGE: &str = "http://127.0.0.1:9000";
const ELLIPSE_SEGMENTS: usize = 72;
const LABEL_SIZE: f32 = 12.0;

fn main() -> iced::Result {
    iced::application(Visualizer::boot, Visualizer::update, Visualizer::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Visualizer) -> String {
    "Tactical Map Visualizer".into()
}

fn application_subscription(_: &Visualizer) -> Subscription<Message> {
    time::every(Duration::from_millis(250)).map(|_| Message::Tick)
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Dark
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewKind {
    Composite,
    Bullseye,
    Viewer,
}

#[derive(Debug)]
struct Visualizer {
    payload: Option<VisualizationPayload>,
    view: ViewKind,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    PayloadFetched(Result<VisualizationPayload, String>),
    SelectView(ViewKind),
    MapClicked(Point),
    ClickPosted(Result<String, String>),
    SetAction(ActionId, ActionValue),
    ActionPosted(Result<String, String>),
}

impl Visualizer {
    fn boot() -> (Self, Task<Message>) {
        (
            Visualizer {
                payload: None,
                view: ViewKind::Composite,
                status: "Waiting for telemetry...".into(),
                history: Vec::new(),
            },
            Task::perform(fetch_payload(), Message::PayloadFetched),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => Task::perform(fetch_payload(), Message::PayloadFetched),
            Message::PayloadFetched(Ok(payload)) => {
                state.status = format!(
                    "Tick {}: {} ({} designations)",
                    payload.tick,
                    payload.status,
                    payload.designations.len()
                );
                state.payload = Some(payload);
                Task::none()
            }
            Message::PayloadFetched(Err(err)) => {
                state.status = format!("Telemetry error: {err}");
                Task::none()
            }
            Message::SelectView(view) => {
                state.view = view;
                Task::none()
            }
            Message::MapClicked(point) => {
                if state.view != ViewKind::Composite {
                    return Task::none();
                }
                Task::perform(post_click(point), Message::ClickPosted)
            }
            Message::ClickPosted(Ok(outcome)) => {
                state.push_history(format!("Click: {outcome}"));
                Task::perform(fetch_payload(), Message::PayloadFetched)
            }
            Message::SetAction(action, value) => {
                Task::perform(post_action(action, value), Message::ActionPosted)
            }
            Message::ActionPosted(Ok(message)) => {
                state.push_history(message);
                Task::perform(fetch_payload(), Message::PayloadFetched)
            }
            Message::ClickPosted(Err(err)) | Message::ActionPosted(Err(err)) => {
                state.status = format!("Bridge error: {err}");
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let actions = state
            .payload
            .as_ref()
            .map(|payload| payload.actions.clone())
            .unwrap_or_default();

        let view_buttons = row![
            button("Composite").on_press(Message::SelectView(ViewKind::Composite)),
            button("Bullseye").on_press(Message::SelectView(ViewKind::Bullseye)),
            button("Viewer").on_press(Message::SelectView(ViewKind::Viewer)),
        ]
        .spacing(6);

        let scale_buttons = row![
            button("60 nm").on_press(Message::SetAction(ActionId::MapScale, 1.0.into())),
            button("30 nm").on_press(Message::SetAction(ActionId::MapScale, 2.0.into())),
            button("15 nm").on_press(Message::SetAction(ActionId::MapScale, 3.0.into())),
        ]
        .spacing(6);

        let toggles = ActionId::ALL
            .into_iter()
            .filter(|action| !action.is_numeric() && *action != ActionId::ClearDesignations)
            .fold(Column::new().spacing(4), |col, action| {
                let current = matches!(actions.get(action.name()), Some(ActionValue::Bool(true)));
                let label = format!("{}: {}", action.name(), if current { "on" } else { "off" });
                col.push(
                    button(text(label).size(13))
                        .on_press(Message::SetAction(action, (!current).into()))
                        .width(Length::Fill),
                )
            });

        let summary = state
            .payload
            .as_ref()
            .map(|payload| summary_lines(&payload.summary))
            .unwrap_or_default();

        let designation_list = match &state.payload {
            Some(payload) if !payload.designations.is_empty() => payload.designations.iter().fold(
                Column::new().spacing(4),
                |col, target| col.push(text(format!("{} {}", target.name, target.label)).size(12)),
            ),
            _ => Column::new().push(text("No designations").size(12)),
        };

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let metrics = state
            .payload
            .as_ref()
            .map(|payload| metrics_line(&payload.metrics))
            .unwrap_or_else(|| "Metrics: n/a".into());

        let control_column = column![
            text("Controls").size(26),
            view_buttons,
            scale_buttons,
            toggles,
            button("Clear designations")
                .on_press(Message::SetAction(ActionId::ClearDesignations, true.into()))
                .padding(10),
            text(&state.status).size(14),
            text(metrics).size(12),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(320.0));

        let scene = state
            .payload
            .as_ref()
            .map(|payload| match state.view {
                ViewKind::Composite => payload.scene.clone(),
                ViewKind::Bullseye => payload.bullseye_scene.clone(),
                ViewKind::Viewer => payload.viewer_scene.clone(),
            })
            .unwrap_or_default();
        let (width, height) = (scene.width.max(1.0) as f32, scene.height.max(1.0) as f32);
        let map = Canvas::new(SceneCanvas { scene })
            .width(Length::Fixed(width))
            .height(Length::Fixed(height));

        let summary_row = summary
            .into_iter()
            .fold(Row::new().spacing(16), |row, line| row.push(text(line).size(16)));

        let display_column = column![
            text("Tactical map").size(26),
            summary_row,
            map,
            text("Designations").size(16),
            Container::new(scrollable(designation_list).height(Length::Fixed(120.0))).padding(6),
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(90.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![control_column, display_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

fn summary_lines(summary: &SelectionSummary) -> Vec<String> {
    vec![
        format!("BE {}", summary.ownship.label()),
        format!(
            "T01 {}",
            summary
                .latest_target
                .map(|target| target.label())
                .unwrap_or_else(|| "---/---".into())
        ),
    ]
}

fn metrics_line(metrics: &ViewMetrics) -> String {
    format!(
        "Ticks {} | designated {} | removed {} | discarded {} | map swaps {}",
        metrics.ticks,
        metrics.designations_created,
        metrics.designations_removed,
        metrics.clicks_discarded,
        metrics.map_swaps
    )
}

async fn fetch_payload() -> Result<VisualizationPayload, String> {
    let response = reqwest::get(format!("{BRIDGE}/payload"))
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<VisualizationPayload>()
        .await
        .map_err(|e| e.to_string())
}

async fn post_click(point: Point) -> Result<String, String> {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{BRIDGE}/click"))
        .json(&ClickRequest {
            x: f64::from(point.x),
            y: f64::from(point.y),
        })
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if status.is_success() {
        Ok(body)
    } else {
        Err(format!("{status}: {body}"))
    }
}

async fn post_action(action: ActionId, value: ActionValue) -> Result<String, String> {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{BRIDGE}/action"))
        .json(&ActionRequest {
            action: action.name().to_string(),
            value,
        })
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status().is_success() {
        Ok(format!("Action {} applied", action.name()))
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        Err(format!("{status}: {text}"))
    }
}

#[derive(Debug, Serialize)]
struct ClickRequest {
    x: f64,
    y: f64,
}

#[derive(Debug, Serialize)]
struct ActionRequest {
    action: String,
    value: ActionValue,
}

#[derive(Debug, Clone, Deserialize)]
struct DesignationEntry {
    name: String,
    label: String,
}

#[derive(Debug, Clone, Deserialize)]
struct VisualizationPayload {
    #[serde(default)]
    tick: usize,
    #[serde(default)]
    status: String,
    #[serde(default)]
    scene: Scene,
    #[serde(default)]
    bullseye_scene: Scene,
    #[serde(default)]
    viewer_scene: Scene,
    #[serde(default)]
    summary: SelectionSummary,
    #[serde(default)]
    designations: Vec<DesignationEntry>,
    #[serde(default)]
    actions: BTreeMap<String, ActionValue>,
    #[serde(default)]
    metrics: ViewMetrics,
}

fn to_iced(point: math::Point) -> Point {
    Point::new(point.x as f32, point.y as f32)
}

/// Polyline approximation of a rotated ellipse.
fn ellipse_points(shape: &math::Ellipse, rotation_deg: f64) -> Vec<Point> {
    (0..=ELLIPSE_SEGMENTS)
        .map(|step| {
            let angle = step as f64 / ELLIPSE_SEGMENTS as f64 * f64::from(TAU);
            let (sin, cos) = angle.sin_cos();
            to_iced(
                shape
                    .center
                    .offset(cos * shape.radius_x, sin * shape.radius_y)
                    .rotate_about(shape.center, rotation_deg),
            )
        })
        .collect()
}

fn visible_in(clip: &Option<math::Ellipse>, point: math::Point) -> bool {
    clip.map_or(true, |clip| clip.contains(point))
}

fn layer_color(layer: Layer) -> Color {
    match layer {
        Layer::Map => Color::from_rgb(0.3, 0.35, 0.3),
        Layer::RangeRings => Color::from_rgb(0.35, 0.35, 0.45),
        Layer::Overlay => Color::from_rgb(0.95, 0.55, 0.2),
        Layer::Bullseye | Layer::SelectionRings => Color::from_rgb(0.6, 0.6, 0.7),
        Layer::Ownship => Color::from_rgb(0.18, 0.72, 0.89),
        Layer::SelectionDisc => Color::from_rgba(0.05, 0.08, 0.12, 0.85),
        Layer::TargetLines | Layer::Targets => Color::from_rgb(0.95, 0.3, 0.3),
        Layer::Labels => Color::WHITE,
        Layer::Placeholder => Color::from_rgb(0.5, 0.5, 0.5),
    }
}

fn stroke(color: Color, style: StrokeStyle) -> Stroke<'static> {
    let base = Stroke::default().with_width(1.5).with_color(color);
    match style {
        StrokeStyle::Solid => base,
        StrokeStyle::Dashed => Stroke {
            line_dash: LineDash {
                segments: &[6.0, 4.0],
                offset: 0,
            },
            ..base
        },
    }
}

fn icon_path(icon: IconKind, center: Point, size: f32, rotation_deg: f32) -> Path {
    let half = size / 2.0;
    let (sin, cos) = rotation_deg.to_radians().sin_cos();
    let rotate = |dx: f32, dy: f32| Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos);
    match icon {
        IconKind::Ownship | IconKind::Aircraft | IconKind::RemoteAircraft => Path::new(|builder| {
            builder.move_to(rotate(0.0, -half));
            builder.line_to(rotate(half * 0.6, half));
            builder.line_to(rotate(0.0, half * 0.5));
            builder.line_to(rotate(-half * 0.6, half));
            builder.close();
        }),
        IconKind::Bullseye => Path::new(|builder| {
            builder.circle(center, half);
            builder.circle(center, half * 0.4);
        }),
        IconKind::Target | IconKind::Mark => Path::new(|builder| {
            builder.move_to(rotate(-half, -half));
            builder.line_to(rotate(half, half));
            builder.move_to(rotate(half, -half));
            builder.line_to(rotate(-half, half));
        }),
        IconKind::Waypoint | IconKind::PositionPoint => Path::new(|builder| {
            builder.move_to(rotate(0.0, -half));
            builder.line_to(rotate(half, 0.0));
            builder.line_to(rotate(0.0, half));
            builder.line_to(rotate(-half, 0.0));
            builder.close();
        }),
    }
}

/// Paints one view's draw commands in order.
#[derive(Clone)]
struct SceneCanvas {
    scene: Scene,
}

impl SceneCanvas {
    fn paint(&self, frame: &mut Frame, command: &DrawCommand) {
        let color = layer_color(command.layer());
        match command {
            DrawCommand::Image {
                source,
                rect,
                rotation_deg,
                pivot,
                ..
            } => {
                let corners = [
                    math::Point::new(rect.x, rect.y),
                    math::Point::new(rect.x + rect.width, rect.y),
                    math::Point::new(rect.x + rect.width, rect.y + rect.height),
                    math::Point::new(rect.x, rect.y + rect.height),
                ]
                .map(|corner| to_iced(corner.rotate_about(*pivot, *rotation_deg)));
                let outline = Path::new(|builder| {
                    builder.move_to(corners[0]);
                    for corner in &corners[1..] {
                        builder.line_to(*corner);
                    }
                    builder.close();
                });
                frame.fill(&outline, Color::from_rgba(0.1, 0.14, 0.1, 0.6));
                frame.stroke(&outline, stroke(color, StrokeStyle::Solid));
                frame.fill_text(canvas::Text {
                    content: source.clone(),
                    position: corners[0],
                    color,
                    size: LABEL_SIZE.into(),
                    ..canvas::Text::default()
                });
            }
            DrawCommand::Ellipse {
                shape,
                rotation_deg,
                stroke: style,
                filled,
                ..
            } => {
                let points = ellipse_points(shape, *rotation_deg);
                let path = Path::new(|builder| {
                    if let Some((first, rest)) = points.split_first() {
                        builder.move_to(*first);
                        for point in rest {
                            builder.line_to(*point);
                        }
                        builder.close();
                    }
                });
                if *filled {
                    frame.fill(&path, color);
                } else {
                    frame.stroke(&path, stroke(color, *style));
                }
            }
            DrawCommand::Dot { center, radius, .. } => {
                let dot = Path::circle(to_iced(*center), *radius as f32);
                frame.fill(&dot, color);
            }
            DrawCommand::Line {
                from,
                to,
                stroke: style,
                clip,
                ..
            } => {
                if !visible_in(clip, *from) && !visible_in(clip, *to) {
                    return;
                }
                let line = Path::line(to_iced(*from), to_iced(*to));
                frame.stroke(&line, stroke(color, *style));
            }
            DrawCommand::Label {
                text,
                anchor,
                align,
                boxed,
                ..
            } => {
                let width = text.chars().count() as f32 * LABEL_SIZE * 0.6;
                let mut position = to_iced(*anchor);
                if *align == Align::Right {
                    position.x -= width;
                }
                if *boxed {
                    frame.fill_rectangle(
                        Point::new(position.x - 2.0, position.y - 1.0),
                        iced::Size::new(width + 4.0, LABEL_SIZE + 4.0),
                        Color::from_rgba(0.0, 0.0, 0.0, 0.7),
                    );
                }
                frame.fill_text(canvas::Text {
                    content: text.clone(),
                    position,
                    color,
                    size: LABEL_SIZE.into(),
                    ..canvas::Text::default()
                });
            }
            DrawCommand::Icon {
                icon,
                center,
                size,
                rotation_deg,
                clip,
                ..
            } => {
                if !visible_in(clip, *center) {
                    return;
                }
                let path = icon_path(*icon, to_iced(*center), *size as f32, *rotation_deg as f32);
                frame.stroke(&path, stroke(color, StrokeStyle::Solid).with_width(2.0));
            }
        }
    }
}

impl canvas::Program<Message> for SceneCanvas {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        match event {
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => cursor
                .position_in(bounds)
                .map(|position| canvas::Action::publish(Message::MapClicked(position)).and_capture()),
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.02, 0.02, 0.04),
        );
        for command in self.scene.commands() {
            self.paint(&mut frame, command);
        }
        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ellipse_polyline_closes_on_itself() {
        let shape = math::Ellipse::new(math::Point::new(100.0, 100.0), 50.0, 20.0);
        let points = ellipse_points(&shape, 0.0);
        assert_eq!(points.len(), ELLIPSE_SEGMENTS + 1);
        assert!((points[0].x - 150.0).abs() < 1e-3);
        assert!((points[ELLIPSE_SEGMENTS].x - points[0].x).abs() < 1e-3);
    }

    #[test]
    fn clipped_points_outside_the_disc_are_hidden() {
        let disc = Some(math::Ellipse::new(math::Point::new(0.0, 0.0), 10.0, 10.0));
        assert!(visible_in(&disc, math::Point::new(3.0, 4.0)));
        assert!(!visible_in(&disc, math::Point::new(30.0, 4.0)));
        assert!(visible_in(&None, math::Point::new(300.0, 4.0)));
    }

    #[test]
    fn summary_uses_placeholder_without_target() {
        let lines = summary_lines(&SelectionSummary::default());
        assert_eq!(lines[1], "T01 ---/---");
    }
}
