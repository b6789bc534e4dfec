use crate::catalog::{MapAsset, MapCatalog, SegmentClass};

/// Placeholder shown while the simulator reports no flight.
pub const NO_DATA_IMAGE: &str = "Images/Maps/no_data.png";

/// Catalog plus the asset currently on screen.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    catalog: MapCatalog,
    asset: Option<MapAsset>,
}

impl MapSource {
    pub fn new(catalog: MapCatalog) -> Self {
        Self {
            catalog,
            asset: None,
        }
    }

    /// Returns `true` only when the resolved image differs from the one
    /// displayed. Unknown theaters keep the current asset.
    pub fn select_theater(&mut self, theater: &str) -> bool {
        let Some(resolved) = self.catalog.resolve(theater) else {
            return false;
        };
        let changed = self
            .asset
            .as_ref()
            .map_or(true, |current| current.image != resolved.image);
        if changed {
            self.asset = Some(resolved);
        }
        changed
    }

    pub fn asset(&self) -> Option<&MapAsset> {
        self.asset.as_ref()
    }

    pub fn segment(&self) -> SegmentClass {
        self.asset
            .as_ref()
            .map(|asset| asset.segment)
            .unwrap_or_default()
    }

    pub fn footprint_feet(&self) -> f64 {
        self.segment().footprint_feet()
    }

    pub fn catalog(&self) -> &MapCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut MapCatalog {
        &mut self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SEGMENTS_128_FOOTPRINT_FEET;

    #[test]
    fn selecting_same_theater_twice_is_idempotent() {
        let mut source = MapSource::default();
        assert!(source.select_theater("Korea"));
        assert!(!source.select_theater("KTO"));
        assert!(!source.select_theater("korea kto"));
    }

    #[test]
    fn unknown_theater_keeps_current_asset() {
        let mut source = MapSource::default();
        source.select_theater("Nordic");
        assert!(!source.select_theater("Nowhere"));
        assert_eq!(source.footprint_feet(), SEGMENTS_128_FOOTPRINT_FEET);
    }
}
