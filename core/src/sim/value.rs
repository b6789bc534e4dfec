use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::sim::keys::TelemetryKey;

/// A telemetry reading. `Empty` is returned for unknown keys or a
/// disconnected source and reads as `false` / `0` / `""`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum TelemetryValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl TelemetryValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, TelemetryValue::Empty)
    }

    pub fn as_bool(&self) -> bool {
        match self {
            TelemetryValue::Empty => false,
            TelemetryValue::Bool(value) => *value,
            TelemetryValue::Number(value) => *value != 0.0 && value.is_finite(),
            TelemetryValue::Text(text) => {
                let text = text.trim();
                text.eq_ignore_ascii_case("true") || text == "1"
            }
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            TelemetryValue::Empty => 0.0,
            TelemetryValue::Bool(value) => f64::from(u8::from(*value)),
            TelemetryValue::Number(value) if value.is_finite() => *value,
            TelemetryValue::Number(_) => 0.0,
            TelemetryValue::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .unwrap_or(0.0),
        }
    }

    pub fn as_text(&self) -> &str {
        match self {
            TelemetryValue::Text(text) => text,
            _ => "",
        }
    }
}

impl From<bool> for TelemetryValue {
    fn from(value: bool) -> Self {
        TelemetryValue::Bool(value)
    }
}

impl From<f64> for TelemetryValue {
    fn from(value: f64) -> Self {
        TelemetryValue::Number(value)
    }
}

impl From<&str> for TelemetryValue {
    fn from(value: &str) -> Self {
        TelemetryValue::Text(value.to_string())
    }
}

impl From<String> for TelemetryValue {
    fn from(value: String) -> Self {
        TelemetryValue::Text(value)
    }
}

/// Source of telemetry readings, tolerant of absent keys.
pub trait TelemetrySource {
    fn get(&self, device: &str, name: &str) -> TelemetryValue;

    fn read(&self, key: TelemetryKey) -> TelemetryValue {
        self.get(key.device, key.name)
    }
}

/// In-memory set of readings for one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    values: HashMap<String, HashMap<String, TelemetryValue>>,
}

impl TelemetrySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: TelemetryKey, value: impl Into<TelemetryValue>) -> &mut Self {
        self.values
            .entry(key.device.to_string())
            .or_default()
            .insert(key.name.to_string(), value.into());
        self
    }

    pub fn with(mut self, key: TelemetryKey, value: impl Into<TelemetryValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl TelemetrySource for TelemetrySnapshot {
    fn get(&self, device: &str, name: &str) -> TelemetryValue {
        self.values
            .get(device)
            .and_then(|names| names.get(name))
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::keys;

    #[test]
    fn missing_keys_read_as_empty_sentinel() {
        let snapshot = TelemetrySnapshot::new();
        let value = snapshot.read(keys::HEADING);
        assert!(value.is_empty());
        assert!(!value.as_bool());
        assert_eq!(value.as_f64(), 0.0);
        assert_eq!(value.as_text(), "");
    }

    #[test]
    fn typed_accessors_coerce_defensively() {
        assert_eq!(TelemetryValue::from("12.5").as_f64(), 12.5);
        assert_eq!(TelemetryValue::from("abc").as_f64(), 0.0);
        assert_eq!(TelemetryValue::Number(f64::NAN).as_f64(), 0.0);
        assert!(TelemetryValue::from("TRUE").as_bool());
        assert!(TelemetryValue::Number(1.0).as_bool());
    }

    #[test]
    fn snapshot_returns_set_values() {
        let snapshot = TelemetrySnapshot::new()
            .with(keys::HEADING, 270.0)
            .with(keys::THEATER, "Korea");
        assert_eq!(snapshot.read(keys::HEADING).as_f64(), 270.0);
        assert_eq!(snapshot.read(keys::THEATER).as_text(), "Korea");
    }
}
