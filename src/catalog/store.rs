//! Validated, immutable set of catalog entries.
//!
//! The store keeps entries in authoring order next to an id index. It is
//! strict about duplicates and links to unknown entries so callers can never
//! observe a half-valid catalog. Id spelling is the document schema's concern.

use crate::catalog::error::LoadError;
use crate::catalog::identity::EntryId;
use crate::catalog::model::Entry;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone)]
/// Catalog entries plus a derived index keyed by entry id.
pub struct CatalogStore {
    entries: Vec<Entry>,
    by_id: BTreeMap<EntryId, usize>,
}

impl CatalogStore {
    /// Validate `entries` and take ownership of them.
    ///
    /// Ids are checked in one pass so the first duplicate wins the error;
    /// references are resolved only after every id is known, which lets
    /// entries point forward and at each other.
    pub fn load<I>(entries: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = Entry>,
    {
        let entries: Vec<Entry> = entries.into_iter().collect();
        let by_id = build_index(&entries)?;
        check_references(&entries, &by_id)?;
        debug!(entries = entries.len(), "catalog store loaded");
        Ok(Self { entries, by_id })
    }

    /// Exact lookup by id.
    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Entries in authoring order. The iterator is `Clone`, so it can be
    /// restarted without going back to the store.
    pub fn all(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn build_index(entries: &[Entry]) -> Result<BTreeMap<EntryId, usize>, LoadError> {
    let mut map = BTreeMap::new();
    for (idx, entry) in entries.iter().enumerate() {
        if map.insert(entry.id.clone(), idx).is_some() {
            return Err(LoadError::DuplicateId {
                id: entry.id.clone(),
            });
        }
    }
    Ok(map)
}

fn check_references(
    entries: &[Entry],
    by_id: &BTreeMap<EntryId, usize>,
) -> Result<(), LoadError> {
    for entry in entries {
        if let Some(target) = entry.references.iter().find(|r| !by_id.contains_key(*r)) {
            return Err(LoadError::DanglingReference {
                from: entry.id.clone(),
                target: target.clone(),
            });
        }
    }
    Ok(())
}
