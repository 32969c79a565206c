use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Versioned key for a catalog document (e.g., `refactoring_catalog_v1`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaVersion(pub String);

/// Stable slug identifying one catalog entry (e.g., `extract-method`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl EntryId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Slugs are non-empty and limited to `[A-Za-z0-9_.-]`.
    pub fn is_valid_slug(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Which half of the catalog an entry belongs to.
///
/// The set is closed: a document naming any other category fails to parse.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryCategory {
    Smell,
    Technique,
}

impl EntryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryCategory::Smell => "smell",
            EntryCategory::Technique => "technique",
        }
    }
}

impl fmt::Display for EntryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for EntryCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "smell" | "smells" => Ok(EntryCategory::Smell),
            "technique" | "techniques" => Ok(EntryCategory::Technique),
            other => Err(format!(
                "unknown category '{other}' (expected smell|technique)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_lowercase_and_rejects_unknown() {
        let json = serde_json::to_string(&EntryCategory::Technique).unwrap();
        assert_eq!(json, "\"technique\"");
        let back: EntryCategory = serde_json::from_str("\"smell\"").unwrap();
        assert_eq!(back, EntryCategory::Smell);

        let err = serde_json::from_str::<EntryCategory>("\"pattern\"");
        assert!(err.is_err(), "closed enumeration must reject other tags");
    }

    #[test]
    fn category_parses_cli_spellings() {
        assert_eq!("Smells".parse::<EntryCategory>(), Ok(EntryCategory::Smell));
        assert_eq!(
            " technique ".parse::<EntryCategory>(),
            Ok(EntryCategory::Technique)
        );
        let err = "refactor".parse::<EntryCategory>().unwrap_err();
        assert!(err.contains("refactor"));
    }

    #[test]
    fn entry_id_is_transparent_and_checks_slugs() {
        let id = EntryId::from("extract-method");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"extract-method\"");
        assert!(id.is_valid_slug());
        assert!(EntryId::from("replace_temp.with-query").is_valid_slug());
        assert!(!EntryId::from("").is_valid_slug());
        assert!(!EntryId::from("long method").is_valid_slug());
        assert!(!EntryId::from("émile").is_valid_slug());
    }
}
