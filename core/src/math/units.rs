//! Unit conversions between simulator feet, nautical miles and map pixels.

/// Feet per nautical mile as used by the simulator feed.
pub const FEET_PER_NAUTICAL_MILE: f64 = 6076.0;

pub fn feet_to_nautical_miles(feet: f64) -> f64 {
    feet / FEET_PER_NAUTICAL_MILE
}

pub fn nautical_miles_to_feet(nautical_miles: f64) -> f64 {
    nautical_miles * FEET_PER_NAUTICAL_MILE
}

/// Scales a world X position (feet) into the currently rendered map image.
pub fn feet_to_map_units_x(pos_feet: f64, footprint_feet: f64, map_pixel_size: f64) -> f64 {
    if footprint_feet <= 0.0 {
        return 0.0;
    }
    pos_feet / footprint_feet * map_pixel_size
}

/// Y is measured from the far edge: the image origin is the north-top corner
/// while the feed counts Y from the opposite edge.
pub fn feet_to_map_units_y(pos_feet: f64, footprint_feet: f64, map_pixel_size: f64) -> f64 {
    if footprint_feet <= 0.0 {
        return 0.0;
    }
    (footprint_feet - pos_feet) / footprint_feet * map_pixel_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::assert_close;

    #[test]
    fn one_nautical_mile_is_6076_feet() {
        assert_close(feet_to_nautical_miles(6076.0), 1.0);
        assert_close(nautical_miles_to_feet(2.5), 15_190.0);
    }

    #[test]
    fn map_units_invert_the_y_axis() {
        assert_close(feet_to_map_units_x(250.0, 1000.0, 400.0), 100.0);
        assert_close(feet_to_map_units_y(250.0, 1000.0, 400.0), 300.0);
        assert_close(feet_to_map_units_y(1000.0, 1000.0, 400.0), 0.0);
    }

    #[test]
    fn zero_footprint_maps_to_origin() {
        assert_eq!(feet_to_map_units_x(10.0, 0.0, 400.0), 0.0);
        assert_eq!(feet_to_map_units_y(10.0, 0.0, 400.0), 0.0);
    }
}
