use crate::catalog::{MapAsset, SegmentClass};

pub const BUILTIN_MAP_COUNT: usize = 24;

const IMAGE_ROOT: &str = "Images/Maps";

use crate::catalog::SegmentClass::{Segments128 as S128, Segments64 as S64};

const BUILTIN_MAPS: [(u32, &str, SegmentClass, &[&str]); BUILTIN_MAP_COUNT] = [
    (1, "korea.png", S64, &["Korea KTO", "Korea", "KTO"]),
    (2, "balkans.png", S64, &["Balkans", "BTO"]),
    (3, "israel.png", S64, &["Israel", "ITO"]),
    (4, "aegean.png", S64, &["Aegean", "ATO"]),
    (5, "hellas.png", S64, &["Hellas", "HTO"]),
    (6, "iberia.png", S64, &["Iberia"]),
    (7, "nordic.png", S128, &["Nordic", "NTO"]),
    (8, "ikaros.png", S64, &["Ikaros"]),
    (9, "emf.png", S128, &["EMF", "Eastern Mediterranean"]),
    (10, "desert_storm.png", S128, &["Desert Storm", "DTO"]),
    (11, "vietnam.png", S128, &["Vietnam", "POH"]),
    (12, "falklands.png", S64, &["Falklands", "South Atlantic"]),
    (13, "kuriles.png", S64, &["Kuriles"]),
    (14, "middle_east.png", S128, &["Middle East", "MTO"]),
    (15, "taiwan.png", S64, &["Taiwan"]),
    (16, "sinai.png", S64, &["Sinai"]),
    (17, "kola.png", S128, &["Kola"]),
    (18, "afghanistan.png", S128, &["Afghanistan"]),
    (19, "iraq.png", S128, &["Iraq"]),
    (20, "libya.png", S128, &["Libya"]),
    (21, "cyprus.png", S64, &["Cyprus"]),
    (22, "caucasus.png", S128, &["Caucasus"]),
    (23, "persian_gulf.png", S128, &["Persian Gulf", "PersianGulf"]),
    (24, "panama.png", S64, &["Panama"]),
];

pub fn builtin_catalog() -> Vec<MapAsset> {
    BUILTIN_MAPS
        .iter()
        .map(|(id, image, segment, aliases)| MapAsset {
            id: *id,
            image: format!("{IMAGE_ROOT}/{image}"),
            segment: *segment,
            theater_aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
        })
        .collect()
}

/// Read-only display names, one per built-in entry, in catalog order.
pub fn builtin_display_names() -> Vec<String> {
    builtin_catalog()
        .iter()
        .map(MapAsset::display_name)
        .collect()
}
