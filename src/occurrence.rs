//! The unit of output: one assembled name-occurrence fact.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::name::ScientificName;

/// Whether a name is attested in literature or in the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameStatus {
    /// Attested in botanical literature.
    BookName,
    /// Attested directly in source text, with no literature cross-reference.
    LocalName,
}

impl NameStatus {
    /// Stable kebab-case label, as used in reports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            NameStatus::BookName => "book-name",
            NameStatus::LocalName => "local-name",
        }
    }
}

impl fmt::Display for NameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One assembled occurrence of a vernacular or book name.
///
/// Created exactly once per accepted combination by the assembler and never
/// mutated afterwards. The constant global area code is not a field; the
/// graph writer emits it on every record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameOccurrence {
    /// Run-scoped identifier; the first allocated is 1, never reused.
    pub id: u64,
    /// The name text as harvested.
    pub name: String,
    /// Book or local attestation.
    pub status: NameStatus,
    /// Linked taxon, when the cross-index knows one.
    pub scientific: Option<ScientificName>,
    /// Coarse area.
    pub canton: Option<String>,
    /// Fine area.
    pub locality: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_are_kebab_case() {
        assert_eq!(NameStatus::BookName.as_str(), "book-name");
        assert_eq!(NameStatus::LocalName.to_string(), "local-name");
        let json = serde_json::to_string(&NameStatus::BookName).unwrap();
        assert_eq!(json, "\"book-name\"");
    }

    #[test]
    fn occurrence_serializes_with_optional_fields() {
        let occurrence = NameOccurrence {
            id: 1,
            name: "Schnääball".into(),
            status: NameStatus::LocalName,
            scientific: Some(ScientificName::from_key("Viburnum_lantana")),
            canton: Some("Bern".into()),
            locality: None,
        };
        let json = serde_json::to_string(&occurrence).unwrap();
        assert!(json.contains("\"Viburnum_lantana\""));
        assert!(json.contains("\"locality\":null"));
        let back: NameOccurrence = serde_json::from_str(&json).unwrap();
        assert_eq!(back, occurrence);
    }
}
