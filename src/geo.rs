//! Canton and locality reconciliation.
//!
//! Localities harvested from historical text frequently fail to match the
//! canonical gazetteer: mis-transcribed, renamed, or outside the covered
//! cantons. The resolver accepts each unmatched (name, locality) pair once
//! as an unverified standalone fact and suppresses every later occurrence,
//! so information survives while duplicates stay bounded.

use std::collections::BTreeSet;

use crate::gazetteer::Gazetteer;

/// Outcome of reconciling one (name, locality) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoOutcome {
    /// Some canton's gazetteer set contains the locality.
    Matched,
    /// No canton matched; the pair is now registered and may be emitted
    /// once with an empty canton field.
    StandaloneAccepted,
    /// The pair was already registered; emission is suppressed.
    StandaloneDuplicate,
}

/// Validates (canton, locality) pairs and tracks standalone localities.
///
/// The gazetteer is authoritative and read-only; the standalone registry is
/// the resolver's only mutable state and lives for one pipeline run.
#[derive(Debug)]
pub struct GeoResolver<'a> {
    gazetteer: &'a Gazetteer,
    standalone: BTreeSet<(String, String)>,
}

impl<'a> GeoResolver<'a> {
    /// A resolver over the given gazetteer with an empty registry.
    #[must_use]
    pub fn new(gazetteer: &'a Gazetteer) -> Self {
        GeoResolver {
            gazetteer,
            standalone: BTreeSet::new(),
        }
    }

    /// True iff the canonical set for `canton` contains `locality`.
    #[must_use]
    pub fn is_consistent(&self, canton: &str, locality: &str) -> bool {
        self.gazetteer.contains(canton, locality)
    }

    /// Reconcile one (name, locality) pair against the gazetteer.
    ///
    /// A locality found in any canton's set is [`GeoOutcome::Matched`] and
    /// never touches the registry. Anything else registers the pair on
    /// first sight and reports a duplicate afterwards.
    pub fn classify(&mut self, name: &str, locality: &str) -> GeoOutcome {
        if self.gazetteer.canton_of(locality).is_some() {
            return GeoOutcome::Matched;
        }
        let pair = (name.to_string(), locality.to_string());
        if self.standalone.insert(pair) {
            GeoOutcome::StandaloneAccepted
        } else {
            GeoOutcome::StandaloneDuplicate
        }
    }

    /// Number of registered standalone pairs.
    #[must_use]
    pub fn standalone_len(&self) -> usize {
        self.standalone.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gazetteer() -> Gazetteer {
        Gazetteer::from_lines(["Wädenswil\tZürich", "Ossingen\tZürich", "Brienz\tBern"])
    }

    #[test]
    fn known_locality_matches_regardless_of_name() {
        let gaz = gazetteer();
        let mut resolver = GeoResolver::new(&gaz);
        assert_eq!(resolver.classify("Schnääball", "Wädenswil"), GeoOutcome::Matched);
        assert_eq!(resolver.classify("Anything", "Brienz"), GeoOutcome::Matched);
        assert_eq!(resolver.standalone_len(), 0);
    }

    #[test]
    fn unknown_locality_accepted_once_then_suppressed() {
        let gaz = gazetteer();
        let mut resolver = GeoResolver::new(&gaz);
        assert_eq!(
            resolver.classify("Gaischnäbel", "Nirgendwo"),
            GeoOutcome::StandaloneAccepted
        );
        assert_eq!(
            resolver.classify("Gaischnäbel", "Nirgendwo"),
            GeoOutcome::StandaloneDuplicate
        );
        assert_eq!(resolver.standalone_len(), 1);
    }

    #[test]
    fn registry_is_keyed_by_name_and_locality() {
        let gaz = gazetteer();
        let mut resolver = GeoResolver::new(&gaz);
        assert_eq!(
            resolver.classify("Gaischnäbel", "Nirgendwo"),
            GeoOutcome::StandaloneAccepted
        );
        // Same locality under a different name is a distinct fact.
        assert_eq!(
            resolver.classify("Wyssi Rose", "Nirgendwo"),
            GeoOutcome::StandaloneAccepted
        );
        assert_eq!(resolver.standalone_len(), 2);
    }

    #[test]
    fn consistency_check_normalizes_both_sides() {
        let gaz = gazetteer();
        let resolver = GeoResolver::new(&gaz);
        assert!(resolver.is_consistent("Zürich", "Wädenswil"));
        assert!(resolver.is_consistent("zürich", "wädenswil"));
        assert!(!resolver.is_consistent("Bern", "Wädenswil"));
    }
}
