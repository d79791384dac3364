use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog;

/// Item values as persisted on an existing check, keyed by item name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedItem {
    pub current_quantity: i32,
    pub expiry_date: Option<String>,
    pub item_notes: String,
}

/// One row of the reconciled per-catalog-item set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledItem {
    pub item_name: String,
    pub standard_quantity: i32,
    pub current_quantity: i32,
    pub expiry_date: Option<String>,
    pub item_notes: String,
}

/// Merges persisted item rows against the full catalog.
///
/// Produces exactly one entry per catalog item, in catalog order. Items absent
/// from `persisted` get defaults (quantity 0, no expiry, no notes). Items
/// present carry their persisted values together with the *current* catalog
/// standard quantity, so a newly added catalog item shows up in every future
/// edit while finalized records keep the snapshot stored on their rows.
/// Item names match by exact case-sensitive equality.
pub fn reconcile(persisted: &HashMap<String, PersistedItem>) -> Vec<ReconciledItem> {
    catalog::STANDARD_BOX_CONTENTS
        .iter()
        .map(|entry| {
            let row = persisted.get(entry.name);
            ReconciledItem {
                item_name: entry.name.to_string(),
                standard_quantity: entry.standard_quantity,
                current_quantity: row.map(|r| r.current_quantity).unwrap_or(0),
                expiry_date: row.and_then(|r| r.expiry_date.clone()),
                item_notes: row.map(|r| r.item_notes.clone()).unwrap_or_default(),
            }
        })
        .collect()
}
