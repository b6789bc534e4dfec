use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tacmapcore::catalog::{UserCatalog, UserMapSlot, USER_MAP_SLOTS};
use tacmapcore::math::units::FEET_PER_NAUTICAL_MILE;
use tacmapcore::ActionValue;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnshipStart {
    pub x_feet: f64,
    pub y_feet: f64,
    pub heading_deg: f64,
    pub speed_knots: f64,
    /// Maximum heading change per tick, degrees.
    pub heading_jitter_deg: f64,
}

impl Default for OwnshipStart {
    fn default() -> Self {
        Self {
            x_feet: 1_500_000.0,
            y_feet: 1_600_000.0,
            heading_deg: 45.0,
            speed_knots: 420.0,
            heading_jitter_deg: 1.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BullseyeConfig {
    pub x_feet: f64,
    pub y_feet: f64,
}

impl Default for BullseyeConfig {
    fn default() -> Self {
        Self {
            x_feet: 1_500_000.0,
            y_feet: 1_600_000.0 + 30.0 * FEET_PER_NAUTICAL_MILE,
        }
    }
}

/// Mouse-down on the composite view at `tick`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptedClick {
    pub tick: usize,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptedAction {
    pub tick: usize,
    pub action: String,
    pub value: ActionValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub width: f64,
    pub height: f64,
    pub theater: String,
    pub scale: f64,
    pub heading_up: bool,
    pub ticks: usize,
    /// Tick at which the simulator reports the flight as over.
    pub landing_tick: Option<usize>,
    pub tick_interval_ms: u64,
    pub seed: u64,
    pub ownship: OwnshipStart,
    pub bullseye: BullseyeConfig,
    pub waypoints: usize,
    pub threats: usize,
    pub clicks: Vec<ScriptedClick>,
    pub actions: Vec<ScriptedAction>,
    pub user_maps: Vec<UserMapSlot>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            theater: "Korea".to_string(),
            scale: 2.0,
            heading_up: false,
            ticks: 60,
            landing_tick: None,
            tick_interval_ms: 250,
            seed: 7,
            ownship: OwnshipStart::default(),
            bullseye: BullseyeConfig::default(),
            waypoints: 6,
            threats: 3,
            clicks: Vec::new(),
            actions: Vec::new(),
            user_maps: Vec::new(),
        }
    }
}

impl ScenarioConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading scenario {}", path_ref.display()))?;
        let config: ScenarioConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing scenario {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn user_catalog(&self) -> anyhow::Result<UserCatalog> {
        if self.user_maps.len() > USER_MAP_SLOTS {
            log::warn!(
                "scenario lists {} user maps, only the first {USER_MAP_SLOTS} are used",
                self.user_maps.len()
            );
        }
        let mut catalog = UserCatalog::default();
        for (index, slot) in self.user_maps.iter().take(USER_MAP_SLOTS).enumerate() {
            catalog
                .set_slot(index, slot.clone())
                .with_context(|| format!("storing user map slot {index}"))?;
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: ScenarioConfig = serde_yaml::from_str("ticks: 5\n").unwrap();
        assert_eq!(cfg.ticks, 5);
        assert_eq!(cfg.theater, "Korea");
        assert_eq!(cfg.ownship, OwnshipStart::default());
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"theater: Balkans\nscale: 3\nclicks:\n  - {tick: 2, x: 320, y: 200}\nactions:\n  - {tick: 1, action: heading_up, value: true}\nuser_maps:\n  - {image_path: maps/custom.png, display_name: \"Custom, CST\", segment_128: true}\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = ScenarioConfig::load(&path).unwrap();
        assert_eq!(cfg.theater, "Balkans");
        assert_eq!(cfg.clicks.len(), 1);
        assert_eq!(cfg.actions[0].value, ActionValue::Bool(true));
        let catalog = cfg.user_catalog().unwrap();
        assert_eq!(catalog.slot(0).unwrap().image_path, "maps/custom.png");
    }

    #[test]
    fn unreadable_file_reports_path() {
        let err = ScenarioConfig::load("/nonexistent/scenario.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/scenario.yaml"));
    }
}
