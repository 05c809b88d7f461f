//! Cross-index construction: the six mapping tables.
//!
//! Five primary tables are built incrementally by appending pairs parsed
//! from the Latin and geographic sources:
//!
//! ```text
//! lat_book     scientific → book names
//! lat_vern     scientific → vernacular names
//! vern_lat     vernacular → scientific names
//! vern_canton  vernacular → cantons
//! vern_loc     vernacular → localities
//! ```
//!
//! Finalization collapses every value list to a first-seen-unique set and
//! computes the two derived tables from the fully-merged primary state:
//! `book_lat` (inversion of `lat_book`) and the unified `name_lat`
//! (concatenation of `vern_lat` and `book_lat`). Derived tables are never
//! built incrementally.
//!
//! Keys iterate in lexicographic order and values in first-seen append
//! order, so everything downstream of a table walk is reproducible.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::name::ScientificName;

// =============================================================================
// Mapping Table
// =============================================================================

/// A relation from one name token to the list of its associated tokens.
///
/// Serializes as a plain JSON object (key → list of strings), which is the
/// on-disk format of the intermediate table files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl MappingTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one (key, value) pair. Both sides are trimmed; a pair with an
    /// empty side is never stored. Returns whether the pair was stored.
    pub fn append(&mut self, key: &str, value: &str) -> bool {
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            return false;
        }
        self.entries
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
        true
    }

    /// Collapse every value list to its first-seen-unique form. Appending a
    /// duplicate then calling this yields the same table as appending once.
    pub fn dedup(&mut self) {
        for values in self.entries.values_mut() {
            let mut seen = BTreeSet::new();
            values.retain(|v| seen.insert(v.clone()));
        }
    }

    /// Values for a key, empty when absent.
    #[must_use]
    pub fn get(&self, key: &str) -> &[String] {
        self.entries.get(key).map_or(&[], Vec::as_slice)
    }

    /// True if the key has at least one value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate entries in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Iterate keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invert the relation: every (key, value) pair becomes (value, key).
    #[must_use]
    pub fn invert(&self) -> MappingTable {
        let mut inverted = MappingTable::new();
        for (key, values) in self.iter() {
            for value in values {
                inverted.append(value, key);
            }
        }
        inverted
    }

    /// Concatenate with another table: all pairs of `self`, then all pairs
    /// of `other`, in their respective orders.
    #[must_use]
    pub fn concat(&self, other: &MappingTable) -> MappingTable {
        let mut merged = self.clone();
        for (key, values) in other.iter() {
            for value in values {
                merged.append(key, value);
            }
        }
        merged
    }

    /// The set of all values across all keys.
    #[must_use]
    pub fn value_set(&self) -> BTreeSet<String> {
        self.entries
            .values()
            .flat_map(|vs| vs.iter().cloned())
            .collect()
    }
}

// =============================================================================
// Cross-Index
// =============================================================================

/// The five primary tables under construction.
///
/// Owned by a single pipeline run and rebuilt fresh each invocation; call
/// [`finalize`](Self::finalize) once appending is done.
#[derive(Debug, Clone, Default)]
pub struct CrossIndex {
    /// scientific → book names.
    pub lat_book: MappingTable,
    /// scientific → vernacular names.
    pub lat_vern: MappingTable,
    /// vernacular → scientific names.
    pub vern_lat: MappingTable,
    /// vernacular → cantons.
    pub vern_canton: MappingTable,
    /// vernacular → localities.
    pub vern_loc: MappingTable,
}

impl CrossIndex {
    /// An empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a (scientific, book name) pair.
    pub fn add_book_name(&mut self, scientific: &ScientificName, book: &str) -> bool {
        self.lat_book.append(scientific.as_str(), book)
    }

    /// Record a (scientific, vernacular) pair; both directions are primary.
    pub fn add_vernacular(&mut self, scientific: &ScientificName, vernacular: &str) -> bool {
        let stored = self.lat_vern.append(scientific.as_str(), vernacular);
        if stored {
            self.vern_lat.append(vernacular, scientific.as_str());
        }
        stored
    }

    /// Record a (vernacular, canton) pair.
    pub fn add_canton(&mut self, vernacular: &str, canton: &str) -> bool {
        self.vern_canton.append(vernacular, canton)
    }

    /// Record a (vernacular, locality) pair.
    pub fn add_locality(&mut self, vernacular: &str, locality: &str) -> bool {
        self.vern_loc.append(vernacular, locality)
    }

    /// De-duplicate the primaries and compute the derived tables.
    #[must_use]
    pub fn finalize(mut self) -> FinalizedIndex {
        self.lat_book.dedup();
        self.lat_vern.dedup();
        self.vern_lat.dedup();
        self.vern_canton.dedup();
        self.vern_loc.dedup();

        let book_lat = self.lat_book.invert();
        let mut name_lat = self.vern_lat.concat(&book_lat);
        name_lat.dedup();
        let book_names = self.lat_book.value_set();

        FinalizedIndex {
            lat_book: self.lat_book,
            lat_vern: self.lat_vern,
            vern_lat: self.vern_lat,
            vern_canton: self.vern_canton,
            vern_loc: self.vern_loc,
            book_lat,
            name_lat,
            book_names,
        }
    }
}

/// The fully-merged index consulted by the assembler. Immutable after
/// construction.
#[derive(Debug, Clone)]
pub struct FinalizedIndex {
    lat_book: MappingTable,
    lat_vern: MappingTable,
    vern_lat: MappingTable,
    vern_canton: MappingTable,
    vern_loc: MappingTable,
    book_lat: MappingTable,
    name_lat: MappingTable,
    book_names: BTreeSet<String>,
}

impl FinalizedIndex {
    /// scientific → book names.
    #[must_use]
    pub fn lat_book(&self) -> &MappingTable {
        &self.lat_book
    }

    /// scientific → vernacular names.
    #[must_use]
    pub fn lat_vern(&self) -> &MappingTable {
        &self.lat_vern
    }

    /// vernacular → scientific names.
    #[must_use]
    pub fn vern_lat(&self) -> &MappingTable {
        &self.vern_lat
    }

    /// book name → scientific names (derived by inversion).
    #[must_use]
    pub fn book_lat(&self) -> &MappingTable {
        &self.book_lat
    }

    /// True if the name appears in any scientific → book names value set.
    #[must_use]
    pub fn is_book_name(&self, name: &str) -> bool {
        self.book_names.contains(name)
    }

    /// All known book names.
    pub fn book_names(&self) -> impl Iterator<Item = &str> {
        self.book_names.iter().map(String::as_str)
    }

    /// Scientific names linked to a vernacular or book name, through the
    /// unified name → scientific table.
    #[must_use]
    pub fn scientifics_for(&self, name: &str) -> &[String] {
        self.name_lat.get(name)
    }

    /// Cantons recorded for a vernacular name.
    #[must_use]
    pub fn cantons_for(&self, name: &str) -> &[String] {
        self.vern_canton.get(name)
    }

    /// Localities recorded for a vernacular name.
    #[must_use]
    pub fn localities_for(&self, name: &str) -> &[String] {
        self.vern_loc.get(name)
    }
}

// =============================================================================
// Tests
// =============================================================================
