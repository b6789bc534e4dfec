pub mod aspect;
pub mod polar;
pub mod projection;
pub mod rotation;
pub mod scale;
pub mod shapes;
pub mod units;

pub use aspect::AspectRatios;
pub use polar::{bearing, bearing_and_distance_nm, distance, BearingRange};
pub use projection::{MapProjection, SelectionProjection};
pub use rotation::{RotationMode, RotationState};
pub use scale::MapScale;
pub use shapes::{Ellipse, Point, Rect};
pub use units::{feet_to_map_units_x, feet_to_map_units_y, feet_to_nautical_miles};

#[cfg(test)]
pub(crate) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
