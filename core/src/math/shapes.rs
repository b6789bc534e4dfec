use serde::{Deserialize, Serialize};

/// Screen-space point in pixels; `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Rotates clockwise (screen convention) around `pivot`.
    pub fn rotate_about(self, pivot: Point, degrees: f64) -> Self {
        if degrees == 0.0 {
            return self;
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Self::new(
            pivot.x + dx * cos - dy * sin,
            pivot.y + dx * sin + dy * cos,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Axis-aligned ellipse, used both as a drawable and as a clip mask.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Ellipse {
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
}

impl Ellipse {
    pub const fn new(center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self {
            center,
            radius_x,
            radius_y,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        if self.radius_x <= 0.0 || self.radius_y <= 0.0 {
            return false;
        }
        let nx = (point.x - self.center.x) / self.radius_x;
        let ny = (point.y - self.center.y) / self.radius_y;
        nx * nx + ny * ny <= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::assert_close;

    #[test]
    fn rotating_north_point_clockwise_lands_east() {
        let pivot = Point::new(100.0, 100.0);
        let rotated = Point::new(100.0, 50.0).rotate_about(pivot, 90.0);
        assert_close(rotated.x, 150.0);
        assert_close(rotated.y, 100.0);
    }

    #[test]
    fn ellipse_rejects_points_outside_either_axis() {
        let ellipse = Ellipse::new(Point::new(0.0, 0.0), 10.0, 5.0);
        assert!(ellipse.contains(Point::new(9.0, 0.0)));
        assert!(!ellipse.contains(Point::new(0.0, 6.0)));
        assert!(!Ellipse::new(Point::default(), 0.0, 0.0).contains(Point::default()));
    }
}
