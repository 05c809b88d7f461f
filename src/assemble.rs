//! Name-occurrence assembly.
//!
//! The assembler drives the final pipeline stage. For each source name it
//! types the name as book or local, enumerates every combination of linked
//! scientific names, recorded cantons, and recorded localities, reconciles
//! each combination's locality through the [`GeoResolver`], and emits one
//! [`NameOccurrence`] per accepted combination under a freshly allocated
//! identifier. A closing sweep assembles the book names the vernacular
//! source never attested, so every known book name receives at least an
//! attempt at a record.
//!
//! Identifiers come from one monotonic counter for the whole run, starting
//! at 1, never reused. Because the index iterates deterministically, a
//! re-run over identical inputs allocates identical identifiers.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::geo::{GeoOutcome, GeoResolver};
use crate::index::FinalizedIndex;
use crate::name::ScientificName;
use crate::occurrence::{NameOccurrence, NameStatus};

/// Policy for names with no linked scientific name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnlinkedPolicy {
    /// Emit nothing; the name surfaces only in the skip counter.
    #[default]
    Skip,
    /// Emit the record with no taxon link.
    Emit,
}

/// Counters for one assembly run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssembleStats {
    /// Names driven through [`Assembler::assemble`].
    pub source_names: usize,
    /// Records emitted with book-name status.
    pub book_records: usize,
    /// Records emitted with local-name status.
    pub local_records: usize,
    /// Book names assembled by the sweep.
    pub swept: usize,
    /// Standalone localities accepted (empty canton field).
    pub standalone_accepted: usize,
    /// Combinations suppressed as standalone duplicates.
    pub standalone_suppressed: usize,
    /// Names skipped for lack of a taxon link.
    pub skipped_unlinked: usize,
}

impl AssembleStats {
    /// Total records emitted.
    #[must_use]
    pub fn emitted(&self) -> usize {
        self.book_records + self.local_records
    }
}

impl fmt::Display for AssembleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Assembly:")?;
        writeln!(f, "  Source names: {}", self.source_names)?;
        writeln!(f, "  Book-name records: {}", self.book_records)?;
        writeln!(f, "  Local-name records: {}", self.local_records)?;
        writeln!(f, "  Swept book names: {}", self.swept)?;
        writeln!(f, "  Standalone accepted: {}", self.standalone_accepted)?;
        writeln!(f, "  Standalone suppressed: {}", self.standalone_suppressed)?;
        writeln!(f, "  Skipped (no taxon): {}", self.skipped_unlinked)?;
        Ok(())
    }
}

/// Assembles name occurrences against a finalized cross-index.
#[derive(Debug)]
pub struct Assembler<'a> {
    index: &'a FinalizedIndex,
    policy: UnlinkedPolicy,
    next_id: u64,
    found_booknames: BTreeSet<String>,
    stats: AssembleStats,
}

impl<'a> Assembler<'a> {
    /// An assembler with the default skip policy for unlinked names.
    #[must_use]
    pub fn new(index: &'a FinalizedIndex) -> Self {
        Self::with_policy(index, UnlinkedPolicy::default())
    }

    /// An assembler with an explicit unlinked-name policy.
    #[must_use]
    pub fn with_policy(index: &'a FinalizedIndex, policy: UnlinkedPolicy) -> Self {
        Assembler {
            index,
            policy,
            next_id: 0,
            found_booknames: BTreeSet::new(),
            stats: AssembleStats::default(),
        }
    }

    /// Assemble all records for one name from the vernacular source.
    ///
    /// The name's status is decided here: book-name iff it appears in any
    /// scientific → book names value set, local-name otherwise.
    pub fn assemble(
        &mut self,
        name: &str,
        resolver: &mut GeoResolver<'_>,
    ) -> Vec<NameOccurrence> {
        self.stats.source_names += 1;
        let status = if self.index.is_book_name(name) {
            self.found_booknames.insert(name.to_string());
            NameStatus::BookName
        } else {
            NameStatus::LocalName
        };
        self.assemble_with_status(name, status, resolver)
    }

    /// Assemble the book names the source never attested. Iterates the
    /// finalized scientific → book names table in key order; a book name
    /// listed under several scientifics sweeps once.
    pub fn sweep(&mut self, resolver: &mut GeoResolver<'_>) -> Vec<NameOccurrence> {
        let index = self.index;
        let pending: Vec<String> = index
            .lat_book()
            .iter()
            .flat_map(|(_, books)| books.iter())
            .filter(|book| !self.found_booknames.contains(*book))
            .cloned()
            .collect();

        let mut records = Vec::new();
        for book in pending {
            if !self.found_booknames.insert(book.clone()) {
                continue;
            }
            self.stats.swept += 1;
            records.extend(self.assemble_with_status(&book, NameStatus::BookName, resolver));
        }
        records
    }

    /// Counters so far.
    #[must_use]
    pub fn stats(&self) -> &AssembleStats {
        &self.stats
    }

    /// Finish the run, yielding the counters.
    #[must_use]
    pub fn finish(self) -> AssembleStats {
        self.stats
    }

    fn assemble_with_status(
        &mut self,
        name: &str,
        status: NameStatus,
        resolver: &mut GeoResolver<'_>,
    ) -> Vec<NameOccurrence> {
        let index = self.index;
        let scientifics = index.scientifics_for(name);
        if scientifics.is_empty() && self.policy == UnlinkedPolicy::Skip {
            self.stats.skipped_unlinked += 1;
            return Vec::new();
        }

        // An empty set contributes one absent slot, so a name lacking a
        // taxon (under the emit policy), canton, or locality still emits.
        let scientific_slots: Vec<Option<ScientificName>> = if scientifics.is_empty() {
            vec![None]
        } else {
            scientifics
                .iter()
                .map(|key| Some(ScientificName::from_key(key.clone())))
                .collect()
        };
        let canton_slots = slots(index.cantons_for(name));
        let locality_slots = slots(index.localities_for(name));

        let mut records = Vec::new();
        for scientific in &scientific_slots {
            for canton in &canton_slots {
                for locality in &locality_slots {
                    match locality {
                        None => {
                            records.push(self.emit(
                                name,
                                status,
                                scientific.clone(),
                                canton.map(str::to_string),
                                None,
                            ));
                        }
                        Some(locality) => match resolver.classify(name, locality) {
                            GeoOutcome::Matched => {
                                records.push(self.emit(
                                    name,
                                    status,
                                    scientific.clone(),
                                    canton.map(str::to_string),
                                    Some((*locality).to_string()),
                                ));
                            }
                            GeoOutcome::StandaloneAccepted => {
                                self.stats.standalone_accepted += 1;
                                records.push(self.emit(
                                    name,
                                    status,
                                    scientific.clone(),
                                    None,
                                    Some((*locality).to_string()),
                                ));
                            }
                            GeoOutcome::StandaloneDuplicate => {
                                self.stats.standalone_suppressed += 1;
                            }
                        },
                    }
                }
            }
        }
        records
    }

    fn emit(
        &mut self,
        name: &str,
        status: NameStatus,
        scientific: Option<ScientificName>,
        canton: Option<String>,
        locality: Option<String>,
    ) -> NameOccurrence {
        self.next_id += 1;
        match status {
            NameStatus::BookName => self.stats.book_records += 1,
            NameStatus::LocalName => self.stats.local_records += 1,
        }
        NameOccurrence {
            id: self.next_id,
            name: name.to_string(),
            status,
            scientific,
            canton,
            locality,
        }
    }
}

/// Combination slots for one optional field: absent when the value set is
/// empty, one slot per value otherwise.
fn slots(values: &[String]) -> Vec<Option<&str>> {
    if values.is_empty() {
        vec![None]
    } else {
        values.iter().map(|v| Some(v.as_str())).collect()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gazetteer::Gazetteer;
    use crate::index::CrossIndex;

    fn build_index(fill: impl FnOnce(&mut CrossIndex)) -> FinalizedIndex {
        let mut index = CrossIndex::new();
        fill(&mut index);
        index.finalize()
    }

    fn sci(raw: &str) -> ScientificName {
        ScientificName::from_latin(raw).unwrap()
    }

    #[test]
    fn matched_locality_emits_with_all_fields() {
        let gaz = Gazetteer::from_lines(["Wädenswil\tBern"]);
        let index = build_index(|ix| {
            ix.add_vernacular(&sci("Viburnum lantana"), "Schnääball");
            ix.add_canton("Schnääball", "Bern");
            ix.add_locality("Schnääball", "Wädenswil");
        });
        let mut resolver = GeoResolver::new(&gaz);
        let mut assembler = Assembler::new(&index);

        let records = assembler.assemble("Schnääball", &mut resolver);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id, 1);
        assert_eq!(record.status, NameStatus::LocalName);
        assert_eq!(record.scientific.as_ref().map(|s| s.as_str()), Some("Viburnum_lantana"));
        assert_eq!(record.canton.as_deref(), Some("Bern"));
        assert_eq!(record.locality.as_deref(), Some("Wädenswil"));
    }

    #[test]
    fn standalone_locality_emits_once_with_empty_canton() {
        let gaz = Gazetteer::from_lines(["Wädenswil\tBern"]);
        let index = build_index(|ix| {
            ix.add_vernacular(&sci("Geranium robertianum"), "Gaischnäbel");
            ix.add_canton("Gaischnäbel", "Bern");
            ix.add_locality("Gaischnäbel", "Nirgendwo");
        });
        let mut resolver = GeoResolver::new(&gaz);
        let mut assembler = Assembler::new(&index);

        let first = assembler.assemble("Gaischnäbel", &mut resolver);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].canton, None);
        assert_eq!(first[0].locality.as_deref(), Some("Nirgendwo"));

        let second = assembler.assemble("Gaischnäbel", &mut resolver);
        assert!(second.is_empty());

        let stats = assembler.finish();
        assert_eq!(stats.standalone_accepted, 1);
        assert_eq!(stats.standalone_suppressed, 1);
    }

    #[test]
    fn book_name_status_comes_from_the_book_table() {
        let index = build_index(|ix| {
            ix.add_book_name(&sci("Viburnum lantana"), "Schneeball");
            ix.add_book_name(&sci("Viburnum lantana"), "Wolliger Schneeball");
        });
        let gaz = Gazetteer::empty();
        let mut resolver = GeoResolver::new(&gaz);
        let mut assembler = Assembler::new(&index);

        let records = assembler.assemble("Schneeball", &mut resolver);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, NameStatus::BookName);
        // Linked through the inverted book table.
        assert_eq!(
            records[0].scientific.as_ref().map(|s| s.as_str()),
            Some("Viburnum_lantana")
        );
    }

    #[test]
    fn unlinked_name_skips_by_default_and_emits_under_policy() {
        let index = build_index(|ix| {
            ix.add_canton("Waldläuse", "Bern");
        });
        let gaz = Gazetteer::empty();

        let mut resolver = GeoResolver::new(&gaz);
        let mut assembler = Assembler::new(&index);
        assert!(assembler.assemble("Waldläuse", &mut resolver).is_empty());
        assert_eq!(assembler.stats().skipped_unlinked, 1);

        let mut resolver = GeoResolver::new(&gaz);
        let mut assembler = Assembler::with_policy(&index, UnlinkedPolicy::Emit);
        let records = assembler.assemble("Waldläuse", &mut resolver);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].scientific, None);
        assert_eq!(records[0].canton.as_deref(), Some("Bern"));
    }

    #[test]
    fn combinations_fan_out_with_monotonic_identifiers() {
        let index = build_index(|ix| {
            ix.add_vernacular(&sci("Viburnum lantana"), "Schneballe");
            ix.add_vernacular(&sci("Viburnum opulus"), "Schneballe");
            ix.add_canton("Schneballe", "Bern");
            ix.add_canton("Schneballe", "Zürich");
        });
        let gaz = Gazetteer::empty();
        let mut resolver = GeoResolver::new(&gaz);
        let mut assembler = Assembler::new(&index);

        let records = assembler.assemble("Schneballe", &mut resolver);
        assert_eq!(records.len(), 4);
        let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 2, 3, 4]);
        // No locality recorded, so the resolver was never consulted.
        assert_eq!(resolver.standalone_len(), 0);
    }

    #[test]
    fn matched_combination_does_not_backfill_a_missing_canton() {
        let gaz = Gazetteer::from_lines(["Wädenswil\tZürich"]);
        let index = build_index(|ix| {
            ix.add_vernacular(&sci("Viburnum lantana"), "schneeball");
            ix.add_locality("schneeball", "Wädenswil");
        });
        let mut resolver = GeoResolver::new(&gaz);
        let mut assembler = Assembler::new(&index);

        let records = assembler.assemble("schneeball", &mut resolver);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].canton, None);
        assert_eq!(records[0].locality.as_deref(), Some("Wädenswil"));
    }

    #[test]
    fn sweep_assembles_unattested_book_names_once() {
        let index = build_index(|ix| {
            ix.add_book_name(&sci("Viburnum lantana"), "Schneeball");
            ix.add_book_name(&sci("Viburnum lantana"), "Wolliger Schneeball");
            // The same book name under a second scientific.
            ix.add_book_name(&sci("Viburnum opulus"), "Schneeball");
        });
        let gaz = Gazetteer::empty();
        let mut resolver = GeoResolver::new(&gaz);
        let mut assembler = Assembler::new(&index);

        let attested = assembler.assemble("Wolliger Schneeball", &mut resolver);
        assert_eq!(attested.len(), 1);

        let swept = assembler.sweep(&mut resolver);
        // "Schneeball" sweeps once despite two table occurrences, and fans
        // out over both linked scientifics.
        assert_eq!(swept.len(), 2);
        assert!(swept.iter().all(|r| r.name == "Schneeball"));
        assert!(swept.iter().all(|r| r.status == NameStatus::BookName));
        assert_eq!(assembler.stats().swept, 1);

        // Everything known is now attested.
        assert!(assembler.sweep(&mut resolver).is_empty());
    }

    #[test]
    fn identifiers_continue_across_assemble_and_sweep() {
        let index = build_index(|ix| {
            ix.add_book_name(&sci("Viburnum lantana"), "Schneeball");
            ix.add_vernacular(&sci("Viburnum opulus"), "Glasrose");
        });
        let gaz = Gazetteer::empty();
        let mut resolver = GeoResolver::new(&gaz);
        let mut assembler = Assembler::new(&index);

        let first = assembler.assemble("Glasrose", &mut resolver);
        let swept = assembler.sweep(&mut resolver);
        assert_eq!(first[0].id, 1);
        assert_eq!(swept[0].id, 2);

        let stats = assembler.finish();
        assert_eq!(stats.emitted(), 2);
        assert_eq!(stats.book_records, 1);
        assert_eq!(stats.local_records, 1);
    }
}
