//! Reads catalog documents from disk into a validated `CatalogStore`.
//!
//! The raw JSON is checked against `schema/catalog.schema.json` first, then
//! the declared `schema_version` is matched against the versions this build
//! understands, and only then are entries handed to `CatalogStore::load`.

use crate::catalog::identity::SchemaVersion;
use crate::catalog::model::{CatalogDocument, document_from_value};
use crate::catalog::store::CatalogStore;
use crate::schema_loader::{SchemaLoadOptions, load_json_schema, read_json, validate_instance};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_SCHEMA_VERSION: &str = "refactoring_catalog_v1";
pub const CATALOG_SCHEMA_RELATIVE_PATH: &str = "schema/catalog.schema.json";

/// Load, validate, and index the catalog at `path`.
pub fn load_catalog(path: &Path) -> Result<CatalogStore> {
    let document = load_validated_document(path)?;
    let title = document.title.clone().unwrap_or_default();
    let store = CatalogStore::load(document.entries)
        .with_context(|| format!("validating catalog {}", path.display()))?;
    info!(
        path = %path.display(),
        title = %title,
        entries = store.len(),
        "loaded catalog"
    );
    Ok(store)
}

/// Schema-check and parse a document without building the store.
///
/// The file is read once; the value that passed the schema is the one parsed.
pub fn load_validated_document(path: &Path) -> Result<CatalogDocument> {
    let catalog_value = read_json(path)?;
    validate_against_schema(path, &catalog_value)?;
    let document = document_from_value(catalog_value)
        .with_context(|| format!("parsing {}", path.display()))?;
    validate_schema_version(&document.schema_version)?;
    Ok(document)
}

fn validate_schema_version(version: &SchemaVersion) -> Result<()> {
    let allowed = allowed_schema_versions();
    if !allowed.contains(&version.0) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            version.0,
            allowed
        );
    }
    Ok(())
}

fn allowed_schema_versions() -> BTreeSet<String> {
    BTreeSet::from_iter([DEFAULT_SCHEMA_VERSION.to_string()])
}

fn validate_against_schema(catalog_path: &Path, catalog_value: &Value) -> Result<()> {
    let schema_path = resolve_catalog_schema_path(catalog_path);
    let allowed = allowed_schema_versions();
    let schema = load_json_schema(
        &schema_path,
        SchemaLoadOptions {
            allowed_versions: Some(&allowed),
            ..Default::default()
        },
    )?;
    debug!(
        schema = %schema_path.display(),
        schema_version = %schema.schema_version,
        "validating catalog against schema"
    );

    validate_instance(
        &schema,
        catalog_value,
        &format!("catalog {}", catalog_path.display()),
    )
}

/// Prefer a schema shipped next to the catalog (`<root>/catalog/x.json` ->
/// `<root>/schema/...`), falling back to the crate's own copy.
fn resolve_catalog_schema_path(catalog_path: &Path) -> PathBuf {
    if let Some(base) = catalog_path.parent().and_then(|p| p.parent()) {
        let candidate = base.join(CATALOG_SCHEMA_RELATIVE_PATH);
        if candidate.is_file() {
            return candidate;
        }
    }

    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(CATALOG_SCHEMA_RELATIVE_PATH)
}
