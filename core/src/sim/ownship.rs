use serde::{Deserialize, Serialize};

use crate::math::{bearing_and_distance_nm, BearingRange};
use crate::sim::keys;
use crate::sim::value::TelemetrySource;

/// Ownship readings retained between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OwnshipState {
    pub heading_deg: f64,
    pub x_feet: f64,
    pub y_feet: f64,
    /// Ownship minus bullseye, feet.
    pub bullseye_dx_feet: f64,
    pub bullseye_dy_feet: f64,
}

impl OwnshipState {
    pub fn read(source: &dyn TelemetrySource) -> Self {
        Self {
            heading_deg: source.read(keys::HEADING).as_f64(),
            x_feet: source.read(keys::OWNSHIP_X).as_f64(),
            y_feet: source.read(keys::OWNSHIP_Y).as_f64(),
            bullseye_dx_feet: source.read(keys::BULLSEYE_DX).as_f64(),
            bullseye_dy_feet: source.read(keys::BULLSEYE_DY).as_f64(),
        }
    }

    /// World position of the bullseye.
    pub fn bullseye_position(&self) -> (f64, f64) {
        (
            self.x_feet - self.bullseye_dx_feet,
            self.y_feet - self.bullseye_dy_feet,
        )
    }

    /// Ownship bearing/range from the bullseye.
    pub fn from_bullseye(&self) -> BearingRange {
        bearing_and_distance_nm(self.bullseye_dx_feet, self.bullseye_dy_feet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TelemetrySnapshot;

    #[test]
    fn disconnected_source_yields_zeros() {
        let state = OwnshipState::read(&TelemetrySnapshot::new());
        assert_eq!(state, OwnshipState::default());
    }

    #[test]
    fn bullseye_position_subtracts_delta() {
        let state = OwnshipState {
            x_feet: 500.0,
            y_feet: 900.0,
            bullseye_dx_feet: 100.0,
            bullseye_dy_feet: -100.0,
            ..Default::default()
        };
        assert_eq!(state.bullseye_position(), (400.0, 1000.0));
    }
}
