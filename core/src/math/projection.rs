//! Projections from world feet to view pixels for the map tape and the
//! bullseye selection disc.

use serde::{Deserialize, Serialize};

use crate::math::aspect::AspectRatios;
use crate::math::scale::MapScale;
use crate::math::shapes::{Ellipse, Point, Rect};
use crate::math::units::{
    feet_to_map_units_x, feet_to_map_units_y, feet_to_nautical_miles, nautical_miles_to_feet,
};

/// Nautical miles spanned by the constraining dimension of a selection disc
/// at base scale 1.0.
pub const SELECTION_SPAN_NM: f64 = 320.0;

/// Edge length of the view the pixel constants (hit radius, icon sizes) are
/// tuned for.
pub const REFERENCE_VIEW_PX: f64 = 400.0;

/// Placement of the map image inside a view.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MapProjection {
    center: Point,
    footprint_feet: f64,
    map_pixel_size: f64,
    offset: Point,
    rotation_deg: f64,
}

impl MapProjection {
    /// Tape sized so the scale's nautical-mile width fills the constraining
    /// dimension, panned so `(x_feet, y_feet)` sits at the view centre.
    pub fn centered_on(
        aspect: &AspectRatios,
        scale: MapScale,
        footprint_feet: f64,
        x_feet: f64,
        y_feet: f64,
        rotation_deg: f64,
    ) -> Self {
        let center = aspect.center();
        if aspect.is_degenerate() || footprint_feet <= 0.0 {
            return Self {
                center,
                footprint_feet: footprint_feet.max(0.0),
                map_pixel_size: 0.0,
                offset: center,
                rotation_deg,
            };
        }

        let fraction = feet_to_nautical_miles(footprint_feet) / scale.tape_width_nm();
        let (nx, ny) = aspect.to_normalized(fraction, fraction);
        let (map_pixel_size, _) = aspect.normalized_to_pixels(nx, ny);

        let mx = feet_to_map_units_x(x_feet, footprint_feet, map_pixel_size);
        let my = feet_to_map_units_y(y_feet, footprint_feet, map_pixel_size);

        Self {
            center,
            footprint_feet,
            map_pixel_size,
            offset: center.offset(-mx, -my),
            rotation_deg,
        }
    }

    /// Whole map fitted into the constraining dimension and magnified by
    /// `zoom`, with the image fraction `focus` placed at the view centre.
    pub fn fitted(aspect: &AspectRatios, footprint_feet: f64, zoom: f64, focus: (f64, f64)) -> Self {
        let center = aspect.center();
        let map_pixel_size = aspect.constraining() * zoom.max(0.0);
        Self {
            center,
            footprint_feet: footprint_feet.max(0.0),
            map_pixel_size,
            offset: center.offset(-focus.0 * map_pixel_size, -focus.1 * map_pixel_size),
            rotation_deg: 0.0,
        }
    }

    pub fn project(&self, x_feet: f64, y_feet: f64) -> Point {
        let mx = feet_to_map_units_x(x_feet, self.footprint_feet, self.map_pixel_size);
        let my = feet_to_map_units_y(y_feet, self.footprint_feet, self.map_pixel_size);
        self.offset
            .offset(mx, my)
            .rotate_about(self.center, self.rotation_deg)
    }

    pub fn feet_to_pixels(&self, feet: f64) -> f64 {
        if self.footprint_feet <= 0.0 {
            return 0.0;
        }
        feet / self.footprint_feet * self.map_pixel_size
    }

    pub fn pixels_per_nm(&self) -> f64 {
        self.feet_to_pixels(nautical_miles_to_feet(1.0))
    }

    /// Unrotated image bounds.
    pub fn image_rect(&self) -> Rect {
        Rect::new(
            self.offset.x,
            self.offset.y,
            self.map_pixel_size,
            self.map_pixel_size,
        )
    }

    /// Position of an unrotated screen point as a fraction of the image, if
    /// it falls on the image.
    pub fn image_fraction(&self, point: Point) -> Option<(f64, f64)> {
        if self.map_pixel_size <= 0.0 || !self.image_rect().contains(point) {
            return None;
        }
        Some((
            (point.x - self.offset.x) / self.map_pixel_size,
            (point.y - self.offset.y) / self.map_pixel_size,
        ))
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn rotation_deg(&self) -> f64 {
        self.rotation_deg
    }

    pub fn map_pixel_size(&self) -> f64 {
        self.map_pixel_size
    }

    pub fn footprint_feet(&self) -> f64 {
        self.footprint_feet
    }
}

/// Bullseye-centred disc projection shared by the composite selection panel
/// and the standalone bullseye view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionProjection {
    aspect: AspectRatios,
    base_scale: f64,
}

impl SelectionProjection {
    pub fn new(aspect: AspectRatios, base_scale: f64) -> Self {
        Self { aspect, base_scale }
    }

    pub fn aspect(&self) -> &AspectRatios {
        &self.aspect
    }

    pub fn center(&self) -> Point {
        self.aspect.center()
    }

    pub fn span_nm(&self) -> f64 {
        if self.base_scale.is_finite() && self.base_scale > 0.0 {
            SELECTION_SPAN_NM / self.base_scale
        } else {
            SELECTION_SPAN_NM
        }
    }

    /// Screen position of a bullseye-relative displacement (feet, north-positive).
    pub fn bullseye_to_screen(&self, dx_feet: f64, dy_feet: f64) -> Point {
        let span = self.span_nm();
        let fx = feet_to_nautical_miles(dx_feet) / span;
        let fy = feet_to_nautical_miles(dy_feet) / span;
        let (nx, ny) = self.aspect.to_normalized(fx, fy);
        let (px, py) = self.aspect.normalized_to_pixels(nx, ny);
        self.center().offset(px, -py)
    }

    /// Inverse of [`Self::bullseye_to_screen`].
    pub fn screen_to_bullseye(&self, point: Point) -> (f64, f64) {
        if self.aspect.is_degenerate() {
            return (0.0, 0.0);
        }
        let center = self.center();
        let (nx, ny) = self
            .aspect
            .pixels_to_normalized(point.x - center.x, center.y - point.y);
        let (fx, fy) = self.aspect.from_normalized(nx, ny);
        let span = self.span_nm();
        (
            nautical_miles_to_feet(fx * span),
            nautical_miles_to_feet(fy * span),
        )
    }

    pub fn nm_to_pixels(&self, nautical_miles: f64) -> f64 {
        nautical_miles / self.span_nm() * self.aspect.constraining()
    }

    /// Clip ellipse of the disc; circular in pixels for any aspect.
    pub fn disc(&self) -> Ellipse {
        let (nx, ny) = self.aspect.to_normalized(0.5, 0.5);
        let (rx, ry) = self.aspect.normalized_to_pixels(nx, ny);
        Ellipse::new(self.center(), rx, ry)
    }

    /// Pixel constants scale with the rendered size of the control.
    pub fn zoom(&self) -> f64 {
        self.aspect.constraining() / REFERENCE_VIEW_PX
    }
}
