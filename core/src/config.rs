use serde::{Deserialize, Serialize};

/// Selection-disc base scale of the composite view's panel.
pub const COMPOSITE_SELECTION_SCALE: f64 = 1.200 * 1.075;
/// Selection-disc base scale of the standalone bullseye view.
pub const BULLSEYE_SELECTION_SCALE: f64 = 0.600 * 1.075;

/// Per-view tunables. Pixel values are for a 400 px control and scale with
/// the rendered size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub selection_base_scale: f64,
    pub hit_radius_px: f64,
    pub designation_range_nm: f64,
    pub in_range_nm: f64,
    pub selection_ring_step_nm: f64,
    pub min_threat_radius_px: f64,
    pub label_offset_px: f64,
    pub icon_size_px: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::composite()
    }
}

impl ViewConfig {
    pub fn composite() -> Self {
        Self {
            selection_base_scale: COMPOSITE_SELECTION_SCALE,
            hit_radius_px: 8.0,
            designation_range_nm: 125.0,
            in_range_nm: 120.0,
            selection_ring_step_nm: 40.0,
            min_threat_radius_px: 3.0,
            label_offset_px: 10.0,
            icon_size_px: 16.0,
        }
    }

    pub fn bullseye() -> Self {
        Self {
            selection_base_scale: BULLSEYE_SELECTION_SCALE,
            ..Self::composite()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullseye_scale_is_half_the_composite_scale() {
        let composite = ViewConfig::composite();
        let bullseye = ViewConfig::bullseye();
        assert!((composite.selection_base_scale - 2.0 * bullseye.selection_base_scale).abs() < 1e-12);
        assert_eq!(composite.designation_range_nm, 125.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: ViewConfig = serde_json::from_str(r#"{"hit_radius_px": 12.0}"#).unwrap();
        assert_eq!(config.hit_radius_px, 12.0);
        assert_eq!(config.selection_base_scale, COMPOSITE_SELECTION_SCALE);
    }
}
