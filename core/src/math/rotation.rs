use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RotationMode {
    #[default]
    NorthUp,
    HeadingUp,
}

impl RotationMode {
    pub fn from_heading_up(heading_up: bool) -> Self {
        if heading_up {
            RotationMode::HeadingUp
        } else {
            RotationMode::NorthUp
        }
    }

    pub fn is_heading_up(self) -> bool {
        self == RotationMode::HeadingUp
    }
}

/// Rotation (degrees, clockwise) applied to each rotating layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RotationState {
    pub map: f64,
    pub overlay: f64,
    pub rings: f64,
    pub aircraft: f64,
}

impl RotationState {
    /// Derives every layer rotation from the mode and current heading in one step.
    pub fn new(mode: RotationMode, heading_deg: f64) -> Self {
        let heading = if heading_deg.is_finite() {
            heading_deg
        } else {
            0.0
        };
        match mode {
            RotationMode::NorthUp => Self {
                map: 0.0,
                overlay: 0.0,
                rings: 0.0,
                aircraft: heading,
            },
            RotationMode::HeadingUp => Self {
                map: -heading,
                overlay: -heading,
                rings: -heading,
                aircraft: 0.0,
            },
        }
    }
}
