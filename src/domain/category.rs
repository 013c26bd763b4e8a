use std::fmt;

use serde::{Deserialize, Serialize};

/// 24-bit colour used by front-ends when rendering a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The three wine families a tasting can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WineCategory {
    Red,
    White,
    Rose,
}

/// Static configuration that makes a single generic form/archive
/// implementation behave as the red, white or rosé variant.
#[derive(Debug)]
pub struct CategoryProfile {
    pub category: WineCategory,
    /// Suffix appended to every field and container name (`colore_rosso`).
    pub suffix: &'static str,
    pub display_name: &'static str,
    pub title_color: Rgb,
    pub value_color: Rgb,
    pub archive_screen: &'static str,
    pub store_file: &'static str,
    pub empty_archive_message: &'static str,
}

static PROFILES: [CategoryProfile; 3] = [
    CategoryProfile {
        category: WineCategory::Red,
        suffix: "rosso",
        display_name: "Rosso",
        title_color: Rgb(0xF2, 0x73, 0x73),
        value_color: Rgb(0xE6, 0x33, 0x33),
        archive_screen: "archivio_rosso",
        store_file: "red_wine_database.json",
        empty_archive_message: "Nessun vino rosso archiviato.",
    },
    CategoryProfile {
        category: WineCategory::White,
        suffix: "bianco",
        display_name: "Bianco",
        title_color: Rgb(0xE6, 0xB3, 0x1A),
        value_color: Rgb(0xB3, 0x80, 0x00),
        archive_screen: "archivio_bianco",
        store_file: "white_wine_database.json",
        empty_archive_message: "Nessun vino bianco archiviato.",
    },
    CategoryProfile {
        category: WineCategory::Rose,
        suffix: "rosato",
        display_name: "Rosato",
        title_color: Rgb(0xD9, 0x99, 0xCC),
        value_color: Rgb(0xB3, 0x73, 0x99),
        archive_screen: "archivio_rosato",
        store_file: "pink_wine_database.json",
        empty_archive_message: "Nessun vino rosato archiviato.",
    },
];

impl WineCategory {
    pub const ALL: [WineCategory; 3] = [WineCategory::Red, WineCategory::White, WineCategory::Rose];

    pub fn profile(self) -> &'static CategoryProfile {
        match self {
            WineCategory::Red => &PROFILES[0],
            WineCategory::White => &PROFILES[1],
            WineCategory::Rose => &PROFILES[2],
        }
    }

    pub fn suffix(self) -> &'static str {
        self.profile().suffix
    }

    pub fn display_name(self) -> &'static str {
        self.profile().display_name
    }

    /// Accepts both the Italian suffixes and the English names.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "rosso" | "red" => Some(WineCategory::Red),
            "bianco" | "white" => Some(WineCategory::White),
            "rosato" | "rose" | "rosé" | "pink" => Some(WineCategory::Rose),
            _ => None,
        }
    }

    /// Appends this category's suffix to a field stem (`colore` → `colore_rosso`).
    pub fn field(self, stem: &str) -> String {
        format!("{}_{}", stem, self.suffix())
    }
}

impl fmt::Display for WineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}
