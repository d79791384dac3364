use once_cell::sync::Lazy;
use std::collections::HashMap;

/// One line of the standard first aid box contents.
///
/// Entries are static reference data; the quantities stored on persisted
/// check item rows are snapshots of these values taken at save time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub standard_quantity: i32,
}

/// Standard contents every first aid box is expected to hold.
pub const STANDARD_BOX_CONTENTS: &[CatalogEntry] = &[
    CatalogEntry {
        name: "General First Aid Guidance Card",
        standard_quantity: 1,
    },
    CatalogEntry {
        name: "Assorted Sterile Plasters",
        standard_quantity: 20,
    },
    CatalogEntry {
        name: "Safety Pins",
        standard_quantity: 6,
    },
    CatalogEntry {
        name: "Medium Sterile Dressing (12cm x 12cm)",
        standard_quantity: 6,
    },
    CatalogEntry {
        name: "Large Sterile Dressing (18cm x 18cm)",
        standard_quantity: 2,
    },
    CatalogEntry {
        name: "Sterile Eye Pad Dressing",
        standard_quantity: 2,
    },
    CatalogEntry {
        name: "Sterile Saline Alcohol Free Cleansing Wipe",
        standard_quantity: 6,
    },
    CatalogEntry {
        name: "Nitrile Examination Gloves - Large (Pair)",
        standard_quantity: 4,
    },
    CatalogEntry {
        name: "Non Sterile Non Woven Triangular Bandage",
        standard_quantity: 4,
    },
];

/// The known first aid boxes a check can be recorded against.
pub const FIRST_AID_BOXES: &[&str] = &["Back Kitchen", "Cafe", "Upstairs"];

static CONTENTS_BY_NAME: Lazy<HashMap<&'static str, i32>> = Lazy::new(|| {
    STANDARD_BOX_CONTENTS
        .iter()
        .map(|entry| (entry.name, entry.standard_quantity))
        .collect()
});

/// Standard quantity for an item, 0 for names outside the catalog.
pub fn standard_quantity(item_name: &str) -> i32 {
    CONTENTS_BY_NAME.get(item_name).copied().unwrap_or(0)
}

/// Whether `box_name` is one of the known first aid boxes.
pub fn is_known_box(box_name: &str) -> bool {
    FIRST_AID_BOXES.contains(&box_name)
}
