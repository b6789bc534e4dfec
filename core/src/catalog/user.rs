use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::catalog::{MapAsset, SegmentClass};
use crate::prelude::{MapError, MapResult};

pub const USER_MAP_SLOTS: usize = 8;
const USER_MAP_ID_BASE: u32 = 100;

/// One persisted user map: image path, comma-separated theater aliases and
/// the segment-size flag.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserMapSlot {
    pub image_path: String,
    pub display_name: String,
    pub segment_128: bool,
}

impl UserMapSlot {
    pub fn is_configured(&self) -> bool {
        !self.image_path.trim().is_empty() && !self.display_name.trim().is_empty()
    }

    fn aliases(&self) -> Vec<String> {
        self.display_name
            .split(',')
            .map(str::trim)
            .filter(|alias| !alias.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserMapField {
    ImagePath,
    DisplayName,
    Segment128,
}

impl UserMapField {
    pub fn name(self) -> &'static str {
        match self {
            UserMapField::ImagePath => "image_path",
            UserMapField::DisplayName => "display_name",
            UserMapField::Segment128 => "segment_128",
        }
    }
}

impl FromStr for UserMapField {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image_path" => Ok(UserMapField::ImagePath),
            "display_name" => Ok(UserMapField::DisplayName),
            "segment_128" => Ok(UserMapField::Segment128),
            other => Err(MapError::UnknownField(other.to_string())),
        }
    }
}

/// The eight user-defined map slots, addressed by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCatalog {
    slots: Vec<UserMapSlot>,
}

impl Default for UserCatalog {
    fn default() -> Self {
        Self {
            slots: vec![UserMapSlot::default(); USER_MAP_SLOTS],
        }
    }
}

impl UserCatalog {
    fn check(index: usize) -> MapResult<()> {
        if index < USER_MAP_SLOTS {
            Ok(())
        } else {
            Err(MapError::SlotOutOfRange(index, USER_MAP_SLOTS))
        }
    }

    pub fn slot(&self, index: usize) -> MapResult<&UserMapSlot> {
        Self::check(index)?;
        Ok(&self.slots[index])
    }

    pub fn set_slot(&mut self, index: usize, slot: UserMapSlot) -> MapResult<()> {
        Self::check(index)?;
        self.slots[index] = slot;
        Ok(())
    }

    /// Persisted string form of one field.
    pub fn field(&self, index: usize, field: UserMapField) -> MapResult<String> {
        let slot = self.slot(index)?;
        Ok(match field {
            UserMapField::ImagePath => slot.image_path.clone(),
            UserMapField::DisplayName => slot.display_name.clone(),
            UserMapField::Segment128 => slot.segment_128.to_string(),
        })
    }

    pub fn set_field(&mut self, index: usize, field: UserMapField, value: &str) -> MapResult<()> {
        Self::check(index)?;
        let slot = &mut self.slots[index];
        match field {
            UserMapField::ImagePath => slot.image_path = value.to_string(),
            UserMapField::DisplayName => slot.display_name = value.to_string(),
            UserMapField::Segment128 => {
                let value = value.trim();
                slot.segment_128 = value.eq_ignore_ascii_case("true") || value == "1";
            }
        }
        Ok(())
    }

    pub fn assets(&self) -> Vec<MapAsset> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_configured())
            .map(|(index, slot)| MapAsset {
                id: USER_MAP_ID_BASE + index as u32 + 1,
                image: slot.image_path.clone(),
                segment: SegmentClass::from_flag(slot.segment_128),
                theater_aliases: slot.aliases(),
            })
            .collect()
    }

    pub fn to_json(&self) -> MapResult<String> {
        Ok(serde_json::to_string_pretty(&self.slots)?)
    }

    /// Loads slots from JSON, padding or truncating to eight entries.
    pub fn from_json(json: &str) -> MapResult<Self> {
        let mut slots: Vec<UserMapSlot> = serde_json::from_str(json)?;
        slots.resize(USER_MAP_SLOTS, UserMapSlot::default());
        Ok(Self { slots })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_fields_read_back_as_strings() {
        let mut catalog = UserCatalog::default();
        catalog
            .set_field(0, UserMapField::ImagePath, "maps/one.png")
            .unwrap();
        catalog
            .set_field(0, "segment_128".parse().unwrap(), "True")
            .unwrap();
        assert_eq!(
            catalog.field(0, UserMapField::ImagePath).unwrap(),
            "maps/one.png"
        );
        assert_eq!(catalog.field(0, UserMapField::Segment128).unwrap(), "true");
    }

    #[test]
    fn out_of_range_slot_is_an_error() {
        let mut catalog = UserCatalog::default();
        assert!(matches!(
            catalog.set_field(8, UserMapField::DisplayName, "x"),
            Err(MapError::SlotOutOfRange(8, USER_MAP_SLOTS))
        ));
        assert!("colour".parse::<UserMapField>().is_err());
    }

    #[test]
    fn json_is_padded_to_eight_slots() {
        let catalog =
            UserCatalog::from_json(r#"[{"image_path":"a.png","display_name":"Alpha"}]"#).unwrap();
        assert_eq!(catalog.assets().len(), 1);
        assert_eq!(catalog.slot(7).unwrap(), &UserMapSlot::default());
        let json = catalog.to_json().unwrap();
        assert_eq!(UserCatalog::from_json(&json).unwrap(), catalog);
    }

    #[test]
    fn unconfigured_slots_produce_no_assets() {
        let mut catalog = UserCatalog::default();
        catalog
            .set_field(3, UserMapField::ImagePath, "only-image.png")
            .unwrap();
        assert!(catalog.assets().is_empty());
    }
}
