//! Shared library for the refactoring catalog.
//!
//! The crate exposes the catalog types (entries, store, lookup), the JSON
//! document reader, and the coverage and lint passes used by the `refcat`
//! binary. Repository discovery lives here so the binary and the integration
//! tests resolve the bundled catalog the same way.

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod content_lint;
pub mod coverage;
mod schema_loader;

pub use catalog::{
    CatalogDocument, CatalogLookup, CatalogStore, DEFAULT_SCHEMA_VERSION, Entry, EntryCategory,
    EntryId, Example, LoadError, LookupError, SchemaVersion, load_catalog,
    load_document_from_path, load_validated_document,
};
pub use content_lint::lint_catalog;
pub use coverage::{CoverageEntry, build_technique_coverage, unremedied_smells};

pub const DEFAULT_CATALOG_RELATIVE_PATH: &str = "catalog/refactoring.json";
const ROOT_SENTINEL: &str = "schema/catalog.schema.json";

/// Returns true when `candidate` holds both the schema and the bundled catalog.
fn is_repo_root(candidate: &Path) -> bool {
    candidate.join(ROOT_SENTINEL).is_file()
        && candidate.join(DEFAULT_CATALOG_RELATIVE_PATH).is_file()
}

fn repo_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_repo_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_repo_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the repository root.
///
/// Honors `REFCAT_ROOT` when it points at a real checkout, then climbs up
/// from the current executable, then falls back to the build-time hint.
pub fn find_repo_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var("REFCAT_ROOT") {
        if let Some(root) = repo_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    if let Some(hint) = option_env!("REFCAT_ROOT_HINT") {
        if let Some(root) = repo_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!("Unable to locate the refcat repository root. Set REFCAT_ROOT or pass --catalog.");
}

/// Catalog path to use when the caller did not name one.
///
/// `REFCAT_CATALOG` wins over the bundled `catalog/refactoring.json`.
pub fn default_catalog_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os("REFCAT_CATALOG").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    Ok(find_repo_root()?.join(DEFAULT_CATALOG_RELATIVE_PATH))
}
