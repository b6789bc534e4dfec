use serde::{Deserialize, Serialize};

/// Nautical miles spanned by the view at multiplier 1.
pub const BASE_TAPE_WIDTH_NM: f64 = 60.0;

/// Map zoom: multiplier 1, 2 or 4 over the 60 nm base tape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MapScale {
    Sixty,
    #[default]
    Thirty,
    Fifteen,
}

impl MapScale {
    /// Maps the numeric action input (`1|2|3`) onto a scale. Anything else,
    /// including an uninitialised zero, falls back to multiplier 2.
    pub fn from_input(input: f64) -> Self {
        if input == 1.0 {
            MapScale::Sixty
        } else if input == 3.0 {
            MapScale::Fifteen
        } else {
            MapScale::Thirty
        }
    }

    pub fn input(self) -> f64 {
        match self {
            MapScale::Sixty => 1.0,
            MapScale::Thirty => 2.0,
            MapScale::Fifteen => 3.0,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            MapScale::Sixty => 1.0,
            MapScale::Thirty => 2.0,
            MapScale::Fifteen => 4.0,
        }
    }

    pub fn tape_width_nm(self) -> f64 {
        BASE_TAPE_WIDTH_NM / self.multiplier()
    }
}
