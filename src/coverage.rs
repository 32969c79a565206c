//! Coverage accounting between smells and the techniques that remedy them.
//!
//! Builds a technique→smell mapping so authors can spot techniques nothing
//! points at and smells that name no remedy. Only smell→technique links count;
//! technique→technique prerequisites are ignored here.

use crate::catalog::{CatalogStore, EntryCategory, EntryId};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Whether any smell references a technique plus the ids of those smells.
pub struct CoverageEntry {
    pub referenced: bool,
    pub smell_ids: Vec<String>,
}

/// Map every technique id to the smells that reference it.
///
/// Smell ids are deduplicated and sorted for deterministic output.
pub fn build_technique_coverage(store: &CatalogStore) -> BTreeMap<String, CoverageEntry> {
    let mut map: BTreeMap<String, CoverageEntry> = store
        .all()
        .filter(|entry| entry.category == EntryCategory::Technique)
        .map(|entry| (entry.id.0.clone(), CoverageEntry::default()))
        .collect();

    for smell in store.all().filter(|entry| entry.is_smell()) {
        for target in &smell.references {
            // Smell→smell links are not remedies.
            let Some(entry) = map.get_mut(&target.0) else {
                continue;
            };
            entry.referenced = true;
            if !entry.smell_ids.contains(&smell.id.0) {
                entry.smell_ids.push(smell.id.0.clone());
                entry.smell_ids.sort();
            }
        }
    }

    map
}

/// Smells that reference no technique, in authoring order.
pub fn unremedied_smells(store: &CatalogStore) -> Vec<EntryId> {
    store
        .all()
        .filter(|entry| entry.is_smell())
        .filter(|entry| {
            !entry.references.iter().any(|target| {
                store
                    .get(target)
                    .is_some_and(|t| t.category == EntryCategory::Technique)
            })
        })
        .map(|entry| entry.id.clone())
        .collect()
}
