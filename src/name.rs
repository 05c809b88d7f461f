//! Name normalization and formatting.
//!
//! The lexical ground floor of the pipeline: every token that enters a
//! mapping table or a graph record passes through here first. The cleanup
//! rules target OCR residue in the source corpus (roman numeral page
//! markers, stray digits and punctuation), not general text normalization.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static ROMAN_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[IVX]+$").unwrap());
static PURE_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());
static ANY_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());

/// True if the token is a roman numeral (the source uses I through XIII as
/// section markers).
#[must_use]
pub fn is_roman_token(token: &str) -> bool {
    ROMAN_TOKEN.is_match(token)
}

/// True if the string is a non-empty run of ASCII digits.
#[must_use]
pub fn is_pure_digits(s: &str) -> bool {
    PURE_DIGITS.is_match(s)
}

/// True if the token contains any digit.
#[must_use]
pub fn contains_digit(token: &str) -> bool {
    ANY_DIGIT.is_match(token)
}

/// True if the token has at least one letter and every letter is uppercase.
#[must_use]
pub fn is_all_uppercase(token: &str) -> bool {
    let mut saw_letter = false;
    for c in token.chars().filter(|c| c.is_alphabetic()) {
        saw_letter = true;
        if !c.is_uppercase() {
            return false;
        }
    }
    saw_letter
}

/// True if the token has at least one letter and every letter is lowercase.
#[must_use]
pub fn is_all_lowercase(token: &str) -> bool {
    let mut saw_letter = false;
    for c in token.chars().filter(|c| c.is_alphabetic()) {
        saw_letter = true;
        if !c.is_lowercase() {
            return false;
        }
    }
    saw_letter
}

/// Normalize one raw name string into a name token.
///
/// Drops whole tokens that are roman numerals, keeps only letters, spaces,
/// and hyphens, collapses whitespace runs, and trims. Returns an empty
/// string when nothing survives; callers must not store empty tokens.
///
/// ```
/// use vern::name::clean_name;
///
/// assert_eq!(clean_name("Schneeball II"), "Schneeball");
/// assert_eq!(clean_name("  Wolliger  Schneeball, "), "Wolliger Schneeball");
/// assert_eq!(clean_name("Immergrün"), "Immergrün");
/// ```
#[must_use]
pub fn clean_name(raw: &str) -> String {
    let kept: Vec<&str> = raw
        .split_whitespace()
        .filter(|tok| !is_roman_token(tok))
        .collect();
    let filtered: String = kept
        .join(" ")
        .chars()
        .filter(|c| c.is_alphabetic() || *c == ' ' || *c == '-')
        .collect();
    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Title-case a free-text geographic token: the first letter of each word
/// (split on spaces and hyphens) is uppercased, the rest lowercased.
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c == ' ' || c == '-' || c == '_' {
            out.push(c);
            at_word_start = true;
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Normalize a geographic unit for comparison: underscores become spaces,
/// then title-casing and trimming. Both sides of every gazetteer lookup go
/// through this, so table entries and gazetteer entries may disagree on
/// case or underscore style without breaking matches.
#[must_use]
pub fn normalize_place(s: &str) -> String {
    title_case(s.replace('_', " ").trim())
}

/// Format a geographic unit for graph output: title-cased with internal
/// spaces replaced by underscores.
#[must_use]
pub fn place_label(s: &str) -> String {
    normalize_place(s).replace(' ', "_")
}

/// A scientific (Latin) name in its canonical `Genus_epithet...` form.
///
/// The stable cross-reference key for a taxon: genus title-cased, epithets
/// lower-cased, all parts joined by underscores. Doubles as the final path
/// segment of a taxon-concept IRI.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScientificName(String);

impl ScientificName {
    /// Build from a raw Latin phrase, e.g. `"Viburnum lantana"`.
    ///
    /// Returns `None` when no alphabetic tokens survive cleanup.
    #[must_use]
    pub fn from_latin(raw: &str) -> Option<Self> {
        let cleaned = clean_name(raw);
        let mut parts = cleaned.split_whitespace();
        let genus = parts.next()?;
        let mut key = title_case(genus);
        for epithet in parts {
            key.push('_');
            key.push_str(&epithet.to_lowercase());
        }
        Some(ScientificName(key))
    }

    /// Wrap an already-formatted key read back from a mapping-table file.
    #[must_use]
    pub fn from_key(key: impl Into<String>) -> Self {
        ScientificName(key.into())
    }

    /// The formatted key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScientificName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Tests
// =============================================================================
