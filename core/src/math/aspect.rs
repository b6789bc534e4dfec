use serde::{Deserialize, Serialize};

/// Width/height ratios of a view, recomputed on every resize.
///
/// A distance expressed as a fraction of the constraining (smaller) dimension
/// is turned into normalised units per axis; scaling the non-constraining axis
/// by the matching ratio makes one nautical mile the same number of pixels
/// horizontally and vertically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectRatios {
    pub width: f64,
    pub height: f64,
    pub height_over_width: f64,
    pub width_over_height: f64,
}

impl Default for AspectRatios {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

fn sanitize(extent: f64) -> f64 {
    if extent.is_finite() && extent > 0.0 {
        extent
    } else {
        0.0
    }
}

impl AspectRatios {
    pub fn new(width: f64, height: f64) -> Self {
        let width = sanitize(width);
        let height = sanitize(height);
        let (height_over_width, width_over_height) = if width > 0.0 && height > 0.0 {
            (height / width, width / height)
        } else {
            (1.0, 1.0)
        };
        Self {
            width,
            height,
            height_over_width,
            width_over_height,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn constraining(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn width_constrains(&self) -> bool {
        self.width <= self.height
    }

    pub fn center(&self) -> crate::math::Point {
        crate::math::Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Fractions of the constraining dimension to per-axis normalised units.
    pub fn to_normalized(&self, fx: f64, fy: f64) -> (f64, f64) {
        if self.width_constrains() {
            (fx, fy * self.width_over_height)
        } else {
            (fx * self.height_over_width, fy)
        }
    }

    pub fn from_normalized(&self, nx: f64, ny: f64) -> (f64, f64) {
        if self.width_constrains() {
            (nx, ny * self.height_over_width)
        } else {
            (nx * self.width_over_height, ny)
        }
    }

    pub fn normalized_to_pixels(&self, nx: f64, ny: f64) -> (f64, f64) {
        (nx * self.width, ny * self.height)
    }

    pub fn pixels_to_normalized(&self, px: f64, py: f64) -> (f64, f64) {
        if self.is_degenerate() {
            return (0.0, 0.0);
        }
        (px / self.width, py / self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::assert_close;

    #[test]
    fn equal_fractions_render_as_equal_pixels_on_wide_view() {
        let aspect = AspectRatios::new(800.0, 400.0);
        let (nx, ny) = aspect.to_normalized(0.25, 0.25);
        let (px, py) = aspect.normalized_to_pixels(nx, ny);
        assert_close(px, 100.0);
        assert_close(py, 100.0);
    }

    #[test]
    fn equal_fractions_render_as_equal_pixels_on_tall_view() {
        let aspect = AspectRatios::new(300.0, 600.0);
        let (nx, ny) = aspect.to_normalized(0.5, 0.5);
        let (px, py) = aspect.normalized_to_pixels(nx, ny);
        assert_close(px, 150.0);
        assert_close(py, 150.0);
        let (fx, fy) = aspect.from_normalized(nx, ny);
        assert_close(fx, 0.5);
        assert_close(fy, 0.5);
    }

    #[test]
    fn zero_extent_keeps_ratios_finite() {
        let aspect = AspectRatios::new(0.0, 250.0);
        assert!(aspect.is_degenerate());
        assert_eq!(aspect.height_over_width, 1.0);
        assert_eq!(aspect.width_over_height, 1.0);
        assert_eq!(aspect.pixels_to_normalized(10.0, 10.0), (0.0, 0.0));

        let nan = AspectRatios::new(f64::NAN, f64::INFINITY);
        assert!(nan.is_degenerate());
        assert!(nan.height_over_width.is_finite());
    }
}
