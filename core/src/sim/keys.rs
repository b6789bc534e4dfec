/// `(device, name)` pair addressing one telemetry value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TelemetryKey {
    pub device: &'static str,
    pub name: &'static str,
}

impl TelemetryKey {
    pub const fn new(device: &'static str, name: &'static str) -> Self {
        Self { device, name }
    }
}

pub const FLIGHT_ACTIVE: TelemetryKey = TelemetryKey::new("Flight Data", "In Flight");
pub const HEADING: TelemetryKey = TelemetryKey::new("HSI", "Current Heading");
pub const OWNSHIP_X: TelemetryKey = TelemetryKey::new("Flight Data", "Ownship X");
pub const OWNSHIP_Y: TelemetryKey = TelemetryKey::new("Flight Data", "Ownship Y");
pub const BULLSEYE_DX: TelemetryKey = TelemetryKey::new("Bullseye", "Delta X");
pub const BULLSEYE_DY: TelemetryKey = TelemetryKey::new("Bullseye", "Delta Y");
pub const THEATER: TelemetryKey = TelemetryKey::new("Map", "Theater Name");
pub const NAV_POINTS_CHANGED: TelemetryKey = TelemetryKey::new("Nav Points", "Changed");
pub const NAV_POINTS_FEED: TelemetryKey = TelemetryKey::new("Nav Points", "Feed");
