//! Map image catalogs: the built-in theater table plus eight user slots.

pub mod builtin;
pub mod user;

use serde::{Deserialize, Serialize};

pub use builtin::{builtin_catalog, builtin_display_names, BUILTIN_MAP_COUNT};
pub use user::{UserCatalog, UserMapField, UserMapSlot, USER_MAP_SLOTS};

/// Real-world footprint of a 64-segment theater image.
pub const SEGMENTS_64_FOOTPRINT_FEET: f64 = 3_358_700.0;
/// Real-world footprint of a 128-segment theater image.
pub const SEGMENTS_128_FOOTPRINT_FEET: f64 = 6_717_400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SegmentClass {
    #[default]
    Segments64,
    Segments128,
}

impl SegmentClass {
    pub fn from_flag(segment_128: bool) -> Self {
        if segment_128 {
            SegmentClass::Segments128
        } else {
            SegmentClass::Segments64
        }
    }

    pub fn segments(self) -> u32 {
        match self {
            SegmentClass::Segments64 => 64,
            SegmentClass::Segments128 => 128,
        }
    }

    pub fn footprint_feet(self) -> f64 {
        match self {
            SegmentClass::Segments64 => SEGMENTS_64_FOOTPRINT_FEET,
            SegmentClass::Segments128 => SEGMENTS_128_FOOTPRINT_FEET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapAsset {
    pub id: u32,
    pub image: String,
    pub segment: SegmentClass,
    pub theater_aliases: Vec<String>,
}

impl MapAsset {
    /// Case-insensitive alias match; blank names never match.
    pub fn matches(&self, theater: &str) -> bool {
        let theater = theater.trim();
        !theater.is_empty()
            && self
                .theater_aliases
                .iter()
                .any(|alias| alias.trim().eq_ignore_ascii_case(theater))
    }

    pub fn display_name(&self) -> String {
        self.theater_aliases.join(",")
    }
}

/// Built-in assets searched first, then the user slots.
#[derive(Debug, Clone)]
pub struct MapCatalog {
    builtin: Vec<MapAsset>,
    user: UserCatalog,
}

impl Default for MapCatalog {
    fn default() -> Self {
        Self::new(UserCatalog::default())
    }
}

impl MapCatalog {
    pub fn new(user: UserCatalog) -> Self {
        Self {
            builtin: builtin_catalog(),
            user,
        }
    }

    pub fn builtin(&self) -> &[MapAsset] {
        &self.builtin
    }

    pub fn user(&self) -> &UserCatalog {
        &self.user
    }

    pub fn user_mut(&mut self) -> &mut UserCatalog {
        &mut self.user
    }

    /// User aliases that also name a built-in theater and so can never resolve.
    pub fn shadowed_user_aliases(&self) -> Vec<String> {
        self.user
            .assets()
            .iter()
            .flat_map(|asset| asset.theater_aliases.iter())
            .filter(|alias| self.builtin.iter().any(|asset| asset.matches(alias)))
            .map(|alias| alias.trim().to_string())
            .collect()
    }

    pub fn resolve(&self, theater: &str) -> Option<MapAsset> {
        let user = self
            .user
            .assets()
            .into_iter()
            .find(|asset| asset.matches(theater));
        match self.builtin.iter().find(|asset| asset.matches(theater)) {
            Some(builtin) => {
                if let Some(shadowed) = user {
                    log::warn!(
                        "user map {} shadowed by built-in theater {:?}",
                        shadowed.image,
                        theater.trim()
                    );
                }
                Some(builtin.clone())
            }
            None => user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_builtin_alias_case_insensitively() {
        let catalog = MapCatalog::default();
        let asset = catalog.resolve("korea kto").expect("korea is built in");
        assert_eq!(asset.segment, SegmentClass::Segments64);
        assert!(catalog.resolve("Atlantis").is_none());
        assert!(catalog.resolve("  ").is_none());
    }

    #[test]
    fn user_slots_are_searched_after_builtins() {
        let mut user = UserCatalog::default();
        user.set_slot(
            2,
            UserMapSlot {
                image_path: "C:/maps/custom.png".into(),
                display_name: "Custom Theater, CTO".into(),
                segment_128: true,
            },
        )
        .unwrap();
        let catalog = MapCatalog::new(user);
        let asset = catalog.resolve("cto").unwrap();
        assert_eq!(asset.image, "C:/maps/custom.png");
        assert_eq!(asset.segment.footprint_feet(), SEGMENTS_128_FOOTPRINT_FEET);
    }

    #[test]
    fn builtin_wins_over_user_alias_and_collision_is_reported() {
        let mut user = UserCatalog::default();
        user.set_slot(
            0,
            UserMapSlot {
                image_path: "C:/maps/my_korea.png".into(),
                display_name: "Korea, Peninsula".into(),
                segment_128: false,
            },
        )
        .unwrap();
        let catalog = MapCatalog::new(user);
        assert_eq!(catalog.shadowed_user_aliases(), vec!["Korea".to_string()]);
        assert_eq!(catalog.resolve("korea").unwrap().image, "korea.png");
        assert_eq!(
            catalog.resolve("peninsula").unwrap().image,
            "C:/maps/my_korea.png"
        );
    }

    #[test]
    fn no_builtin_theater_name_is_claimed_twice() {
        let catalog = MapCatalog::default();
        for asset in catalog.builtin() {
            for alias in &asset.theater_aliases {
                let claims = catalog
                    .builtin()
                    .iter()
                    .filter(|other| other.matches(alias))
                    .count();
                assert_eq!(claims, 1, "alias {alias} matches {claims} assets");
            }
        }
    }
}
