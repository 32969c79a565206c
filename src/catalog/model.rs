//! Deserializable representation of a catalog document on disk.
//!
//! The types mirror `schema/catalog.schema.json`. `CatalogStore` consumes the
//! parsed `entries` and owns validation; nothing here checks ids or links.

use crate::catalog::identity::{EntryCategory, EntryId, SchemaVersion};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize, Serialize)]
/// Full catalog document as stored on disk.
pub struct CatalogDocument {
    pub schema_version: SchemaVersion,
    #[serde(default)]
    pub title: Option<String>,
    pub entries: Vec<Entry>,
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
/// One documented unit of knowledge: a smell or a technique.
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub category: EntryCategory,
    pub body: String,
    /// Problem/solution snippets in reading order.
    #[serde(default)]
    pub examples: Vec<Example>,
    /// Ids this entry links to, in declared order.
    #[serde(default)]
    pub references: Vec<EntryId>,
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
/// Labelled code snippet. The snippet text is opaque.
pub struct Example {
    pub label: String,
    pub snippet: String,
}

impl Entry {
    /// Minimal entry with no examples or references.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: EntryCategory,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId(id.into()),
            title: title.into(),
            category,
            body: body.into(),
            examples: Vec::new(),
            references: Vec::new(),
        }
    }

    pub fn with_references<I, S>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.references = references
            .into_iter()
            .map(|id| EntryId(id.into()))
            .collect();
        self
    }

    pub fn with_example(mut self, label: impl Into<String>, snippet: impl Into<String>) -> Self {
        self.examples.push(Example {
            label: label.into(),
            snippet: snippet.into(),
        });
        self
    }

    pub fn is_smell(&self) -> bool {
        self.category == EntryCategory::Smell
    }
}

/// Read and parse a catalog document from disk without additional validation.
pub fn load_document_from_path(path: &Path) -> Result<CatalogDocument> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let document: CatalogDocument =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(document)
}

/// Parse a document from JSON that has already been read (and usually
/// schema-checked).
pub fn document_from_value(value: Value) -> Result<CatalogDocument> {
    Ok(serde_json::from_value(value)?)
}
