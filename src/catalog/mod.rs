//! Refactoring catalog wiring.
//!
//! `CatalogStore` owns a validated, immutable set of smells and techniques;
//! `CatalogLookup` answers queries over it. `source` reads the JSON document
//! format under `catalog/` and is the only part of this module that touches
//! the filesystem.

pub mod error;
pub mod identity;
pub mod lookup;
pub mod model;
pub mod source;
pub mod store;

pub use error::{LoadError, LookupError};
pub use identity::{EntryCategory, EntryId, SchemaVersion};
pub use lookup::CatalogLookup;
pub use model::{CatalogDocument, Entry, Example, load_document_from_path};
pub use source::{DEFAULT_SCHEMA_VERSION, load_catalog, load_validated_document};
pub use store::CatalogStore;
