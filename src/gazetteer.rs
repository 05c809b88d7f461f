//! Canonical canton → localities gazetteer.
//!
//! A line-oriented file, one `<locality>\t<canton>` pair per line, loaded
//! once and read-only for the pipeline's lifetime. Both sides are
//! normalized on load (underscores to spaces, title case), so membership
//! checks never depend on source casing or separator style.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::name::normalize_place;

/// The canonical canton → localities mapping.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    by_canton: BTreeMap<String, BTreeSet<String>>,
    skipped: usize,
}

impl Gazetteer {
    /// An empty gazetteer (every locality is standalone).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a gazetteer from a `<locality>\t<canton>` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::invalid_input(format!("Failed to read gazetteer {:?}: {}", path, e))
        })?;
        Ok(Self::from_lines(content.lines()))
    }

    /// Build a gazetteer from an iterator of `<locality>\t<canton>` lines.
    /// Lines without a tab or with an empty side are skipped and counted.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut gazetteer = Gazetteer::default();
        for line in lines {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            match line.split_once('\t') {
                Some((locality, canton))
                    if !locality.trim().is_empty() && !canton.trim().is_empty() =>
                {
                    gazetteer.insert(canton, locality);
                }
                _ => gazetteer.skipped += 1,
            }
        }
        gazetteer
    }

    /// Record one (canton, locality) pair, normalizing both sides.
    pub fn insert(&mut self, canton: &str, locality: &str) {
        self.by_canton
            .entry(normalize_place(canton))
            .or_default()
            .insert(normalize_place(locality));
    }

    /// True iff the canton's set contains the locality, after normalizing
    /// both sides.
    #[must_use]
    pub fn contains(&self, canton: &str, locality: &str) -> bool {
        self.by_canton
            .get(&normalize_place(canton))
            .is_some_and(|set| set.contains(&normalize_place(locality)))
    }

    /// The first canton (in lexicographic order) whose set contains the
    /// locality, if any.
    #[must_use]
    pub fn canton_of(&self, locality: &str) -> Option<&str> {
        let needle = normalize_place(locality);
        self.by_canton
            .iter()
            .find(|(_, localities)| localities.contains(&needle))
            .map(|(canton, _)| canton.as_str())
    }

    /// Cantons in lexicographic order.
    pub fn cantons(&self) -> impl Iterator<Item = &str> {
        self.by_canton.keys().map(String::as_str)
    }

    /// Localities recorded for a canton (normalized form), empty when the
    /// canton is unknown.
    pub fn localities(&self, canton: &str) -> impl Iterator<Item = &str> {
        self.by_canton
            .get(&normalize_place(canton))
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Number of cantons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_canton.len()
    }

    /// True if no canton is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_canton.is_empty()
    }

    /// Lines skipped while loading (no tab, or an empty side).
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_normalized_on_both_sides() {
        let gaz = Gazetteer::from_lines(["Wädenswil\tZürich", "Ossingen\tZürich"]);
        assert_eq!(gaz.len(), 1);
        assert!(gaz.contains("Zürich", "Wädenswil"));
        assert!(gaz.contains("zürich", "wädenswil"));
        assert!(!gaz.contains("Bern", "Wädenswil"));
    }

    #[test]
    fn underscores_compare_equal_to_spaces() {
        let gaz = Gazetteer::from_lines(["Stein am Rhein\tSchaffhausen"]);
        assert!(gaz.contains("Schaffhausen", "Stein_am_Rhein"));
        assert_eq!(gaz.canton_of("stein_am_rhein"), Some("Schaffhausen"));
    }

    #[test]
    fn malformed_lines_are_skipped_and_counted() {
        let gaz = Gazetteer::from_lines(["Wädenswil\tZürich", "no tab here", "\tZürich", "Ort\t", ""]);
        assert_eq!(gaz.len(), 1);
        assert_eq!(gaz.skipped(), 3);
    }

    #[test]
    fn canton_of_prefers_lexicographic_first() {
        let gaz = Gazetteer::from_lines(["Brugg\tAargau", "Brugg\tBern"]);
        assert_eq!(gaz.canton_of("Brugg"), Some("Aargau"));
    }

    #[test]
    fn empty_gazetteer_matches_nothing() {
        let gaz = Gazetteer::empty();
        assert!(gaz.is_empty());
        assert!(!gaz.contains("Zürich", "Wädenswil"));
        assert_eq!(gaz.canton_of("Wädenswil"), None);
    }
}
