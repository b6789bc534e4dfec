use serde::{Deserialize, Serialize};

use crate::math::units::feet_to_nautical_miles;

/// Compass bearing in degrees for a displacement (`dx` east, `dy` north),
/// normalised into `[0, 360)`.
pub fn bearing(dx: f64, dy: f64) -> f64 {
    let mut degrees = dx.atan2(dy).to_degrees();
    if degrees < 0.0 {
        degrees += 360.0;
    }
    if degrees >= 360.0 {
        degrees -= 360.0;
    }
    degrees
}

/// Length of a displacement rounded to the nearest whole unit.
///
/// Midpoints round to even, matching the label formatting of the host panel.
pub fn distance(dx: f64, dy: f64) -> f64 {
    dx.hypot(dy).round_ties_even()
}

/// Bearing and rounded distance (nm) for a displacement given in feet.
pub fn bearing_and_distance_nm(dx_feet: f64, dy_feet: f64) -> BearingRange {
    let dx = feet_to_nautical_miles(dx_feet);
    let dy = feet_to_nautical_miles(dy_feet);
    if dx == 0.0 && dy == 0.0 {
        return BearingRange::default();
    }
    BearingRange {
        bearing_deg: bearing(dx, dy),
        distance_nm: distance(dx, dy),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BearingRange {
    pub bearing_deg: f64,
    pub distance_nm: f64,
}

impl BearingRange {
    /// `BBB/R` label text, bearing rounded to whole degrees.
    pub fn label(&self) -> String {
        let bearing = (self.bearing_deg.round() as i64).rem_euclid(360);
        format!("{:03}/{}", bearing, self.distance_nm as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::assert_close;

    #[test]
    fn cardinal_bearings() {
        assert_close(bearing(0.0, 10.0), 0.0);
        assert_close(bearing(10.0, 0.0), 90.0);
        assert_close(bearing(0.0, -10.0), 180.0);
        assert_close(bearing(-10.0, 0.0), 270.0);
    }

    #[test]
    fn bearing_stays_below_360_for_negative_zero_edge() {
        let b = bearing(-1e-300, 10.0);
        assert!((0.0..360.0).contains(&b));
    }

    #[test]
    fn distance_rounds_rather_than_truncates() {
        assert_eq!(distance(0.0, 10.0), 10.0);
        assert_eq!(distance(3.0, 4.0), 5.0);
        assert_eq!(distance(0.0, 9.7), 10.0);
        assert_eq!(distance(0.0, 2.5), 2.0);
    }

    #[test]
    fn stationary_displacement_reports_zero_bearing() {
        let br = bearing_and_distance_nm(0.0, 0.0);
        assert_eq!(br, BearingRange::default());
    }

    #[test]
    fn label_pads_bearing() {
        let br = BearingRange {
            bearing_deg: 45.2,
            distance_nm: 12.0,
        };
        assert_eq!(br.label(), "045/12");
        let wrap = BearingRange {
            bearing_deg: 359.7,
            distance_nm: 3.0,
        };
        assert_eq!(wrap.label(), "000/3");
    }
}
