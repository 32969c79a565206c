use crate::catalog::identity::EntryId;
use thiserror::Error;

/// Why a set of entries could not become a `CatalogStore`.
///
/// Every variant is fatal to the load attempt; no partial store is returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("duplicate entry id '{id}'")]
    DuplicateId { id: EntryId },

    #[error("entry '{from}' references unknown entry '{target}'")]
    DanglingReference { from: EntryId, target: EntryId },
}

/// Query failures raised by `CatalogLookup`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("entry '{id}' not found")]
    NotFound { id: EntryId },
}
