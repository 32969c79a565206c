//! Read-only queries over a validated `CatalogStore`.
//!
//! Every query returns entries in authoring order (or declared order for
//! references) and never ranks. References are followed exactly one hop.

use crate::catalog::error::LookupError;
use crate::catalog::identity::{EntryCategory, EntryId};
use crate::catalog::model::Entry;
use crate::catalog::store::CatalogStore;

#[derive(Debug, Clone, Copy)]
/// Borrowed query view; cheap to copy and share across threads.
pub struct CatalogLookup<'a> {
    store: &'a CatalogStore,
}

impl<'a> CatalogLookup<'a> {
    pub fn new(store: &'a CatalogStore) -> Self {
        Self { store }
    }

    /// Entries tagged `category`, in authoring order.
    pub fn by_category(&self, category: EntryCategory) -> Vec<&'a Entry> {
        self.store
            .all()
            .filter(|entry| entry.category == category)
            .collect()
    }

    /// Entries referenced by `id`, in the order they were declared.
    ///
    /// An entry with no references yields an empty list; an unknown `id` is
    /// `NotFound`.
    pub fn resolve_references(&self, id: &EntryId) -> Result<Vec<&'a Entry>, LookupError> {
        let entry = self.require(id)?;
        // Load guarantees every reference resolves.
        Ok(entry
            .references
            .iter()
            .filter_map(|target| self.store.get(target))
            .collect())
    }

    /// Entries whose references name `id`, in authoring order.
    pub fn referrers(&self, id: &EntryId) -> Result<Vec<&'a Entry>, LookupError> {
        self.require(id)?;
        Ok(self
            .store
            .all()
            .filter(|entry| entry.references.contains(id))
            .collect())
    }

    /// Case-insensitive substring match over title and body.
    ///
    /// An empty query matches everything.
    pub fn search(&self, text: &str) -> Vec<&'a Entry> {
        let needle = text.to_lowercase();
        self.store
            .all()
            .filter(|entry| {
                needle.is_empty()
                    || entry.title.to_lowercase().contains(&needle)
                    || entry.body.to_lowercase().contains(&needle)
            })
            .collect()
    }

    fn require(&self, id: &EntryId) -> Result<&'a Entry, LookupError> {
        self.store
            .get(id)
            .ok_or_else(|| LookupError::NotFound { id: id.clone() })
    }
}

impl CatalogStore {
    pub fn lookup(&self) -> CatalogLookup<'_> {
        CatalogLookup::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::thread;

    fn ids(entries: &[&Entry]) -> Vec<String> {
        entries.iter().map(|e| e.id.0.clone()).collect()
    }

    fn sample_store() -> CatalogStore {
        CatalogStore::load(vec![
            Entry::new(
                "long-method",
                "Long Method",
                EntryCategory::Smell,
                "A method contains too many lines of code.",
            )
            .with_references(["extract-method", "replace-temp-with-query"]),
            Entry::new(
                "extract-method",
                "Extract Method",
                EntryCategory::Technique,
                "Move a code fragment into a separate method.",
            ),
            Entry::new(
                "duplicate-code",
                "Duplicate Code",
                EntryCategory::Smell,
                "Two fragments look almost identical; EXTRACT the shared part.",
            )
            .with_references(["extract-method"]),
            Entry::new(
                "replace-temp-with-query",
                "Replace Temp with Query",
                EntryCategory::Technique,
                "Move an expression into its own method and call it.",
            )
            .with_references(["extract-method"]),
        ])
        .expect("sample catalog is valid")
    }

    #[test]
    fn two_entry_scenario() {
        let store = CatalogStore::load(vec![
            Entry::new("long-method", "Long Method", EntryCategory::Smell, "")
                .with_references(["extract-method"]),
            Entry::new("extract-method", "Extract Method", EntryCategory::Technique, ""),
        ])
        .expect("load succeeds");
        let lookup = store.lookup();

        let refs = lookup
            .resolve_references(&EntryId::from("long-method"))
            .unwrap();
        assert_eq!(ids(&refs), ["extract-method"]);
        assert!(
            lookup
                .resolve_references(&EntryId::from("extract-method"))
                .unwrap()
                .is_empty()
        );
        assert!(store.get(&EntryId::from("missing")).is_none());
    }

    #[test]
    fn by_category_is_partitioned_and_ordered() {
        let store = sample_store();
        let lookup = store.lookup();
        let smells = lookup.by_category(EntryCategory::Smell);
        let techniques = lookup.by_category(EntryCategory::Technique);

        assert_eq!(ids(&smells), ["long-method", "duplicate-code"]);
        assert_eq!(
            ids(&techniques),
            ["extract-method", "replace-temp-with-query"]
        );
        assert!(smells.iter().all(|e| e.category == EntryCategory::Smell));
        assert_eq!(smells.len() + techniques.len(), store.len());
    }

    #[test]
    fn resolve_references_keeps_declared_order() {
        let store = sample_store();
        let refs = store
            .lookup()
            .resolve_references(&EntryId::from("long-method"))
            .unwrap();
        assert_eq!(ids(&refs), ["extract-method", "replace-temp-with-query"]);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let store = sample_store();
        let missing = EntryId::from("feature-envy");
        assert_eq!(
            store.lookup().resolve_references(&missing).unwrap_err(),
            LookupError::NotFound {
                id: missing.clone()
            }
        );
        assert!(store.lookup().referrers(&missing).is_err());
    }

    #[test]
    fn referrers_follow_one_hop() {
        let store = sample_store();
        let referrers = store
            .lookup()
            .referrers(&EntryId::from("extract-method"))
            .unwrap();
        assert_eq!(
            ids(&referrers),
            ["long-method", "duplicate-code", "replace-temp-with-query"]
        );
        assert!(
            store
                .lookup()
                .referrers(&EntryId::from("long-method"))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn search_matches_title_or_body_case_insensitively() {
        let store = sample_store();
        let lookup = store.lookup();

        assert_eq!(
            ids(&lookup.search("")),
            [
                "long-method",
                "extract-method",
                "duplicate-code",
                "replace-temp-with-query"
            ]
        );
        assert_eq!(
            ids(&lookup.search("extract")),
            ["extract-method", "duplicate-code"]
        );
        assert_eq!(ids(&lookup.search("TEMP")), ["replace-temp-with-query"]);
        assert!(lookup.search("inheritance").is_empty());
    }

    #[test]
    fn shared_store_answers_identically_across_threads() {
        let store = Arc::new(sample_store());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || ids(&store.lookup().search("method")))
            })
            .collect();
        let expected = ids(&store.lookup().search("method"));
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
