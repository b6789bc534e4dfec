//! Narrow read interface onto the simulator's exported telemetry.

pub mod keys;
pub mod ownship;
pub mod value;

pub use keys::TelemetryKey;
pub use ownship::OwnshipState;
pub use value::{TelemetrySnapshot, TelemetrySource, TelemetryValue};
