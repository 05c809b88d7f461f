//! Line classification for the geographic corpus scan.
//!
//! The scanned corpus extract interleaves canton headers with name lines:
//!
//! ```text
//! KANTON ZÜRICH
//! Schnääball Wädenswil
//! schneeball Wädenswil
//! wyssi rose, Chrisocher
//! 143
//! ```
//!
//! [`classify_line`] is a pure function mapping one line to a [`LineClass`].
//! The running canton context lives in an explicit [`GeoScan`] state that is
//! updated from each classification result; candidates are attributed to the
//! current canton, filtered, and accumulated as [`GeoRecord`]s.
//!
//! # Usage
//!
//! ```
//! use vern::classify::{GeoScan, LineClass};
//! use vern::stoplist::Stoplist;
//!
//! let mut scan = GeoScan::new(Stoplist::empty(), Stoplist::empty());
//! assert!(matches!(scan.observe("KANTON ZÜRICH"), LineClass::NewGeoUnit(_)));
//! scan.observe("schneeball Wädenswil");
//! let outcome = scan.finish();
//! assert_eq!(outcome.records.len(), 1);
//! assert_eq!(outcome.records[0].name, "schneeball");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::name::{contains_digit, is_all_lowercase, is_all_uppercase, is_pure_digits, is_roman_token};
use crate::stoplist::Stoplist;

/// Literal marker prefixing canton headers in the source corpus.
pub const CANTON_MARKER: &str = "KANTON ";

/// Known abbreviation marker; candidates containing it are rejected.
pub const ABBREV_MARKER: &str = "Bez.";

/// Header whose appearance marks a known OCR artifact in the source scan:
/// the candidate captured immediately before it belongs to a figure caption,
/// not to the preceding canton. See [`GeoScan::finish`].
pub const SENTINEL_HEADER: &str = "KANTON BASEL-LANDSCHAFT";

// =============================================================================
// Classification
// =============================================================================

/// Classification of one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LineClass {
    /// Blank line, pure digit string, or a single roman-numeral token.
    SkipNoise,
    /// Canton header (first token entirely uppercase); the payload is the
    /// whole header text, marker included.
    NewGeoUnit(String),
    /// One or more name candidates, split on `", "`.
    Candidates(Vec<Candidate>),
    /// A non-header, non-noise line with a single token: too short to
    /// separate a name from its context.
    Unparseable,
}

/// One shaped name candidate from a classified line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The candidate name (one word, or two for a bigram).
    pub name: String,
    /// Trailing tokens read as a fine-grained locality, if any survived
    /// the roman-numeral and digit filters.
    pub locality: Option<String>,
}

/// Classify one line of cleaned source text.
///
/// Pure shaping only: the rejection rule ([`is_rejected_name`]) and the
/// stoplists are applied by [`GeoScan`] before anything reaches a mapping
/// table.
#[must_use]
pub fn classify_line(line: &str) -> LineClass {
    let trimmed = line.trim();
    if trimmed.is_empty() || is_pure_digits(trimmed) {
        return LineClass::SkipNoise;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.len() == 1 && is_roman_token(tokens[0]) {
        return LineClass::SkipNoise;
    }

    // Header test tolerates a trailing comma left by the OCR pass.
    let header = trimmed.trim_end_matches(',').trim_end();
    if let Some(first) = header.split_whitespace().next() {
        if is_all_uppercase(first) {
            return LineClass::NewGeoUnit(header.to_string());
        }
    }

    if tokens.len() < 2 {
        return LineClass::Unparseable;
    }

    let candidates: Vec<Candidate> = trimmed
        .split(", ")
        .filter_map(candidate_from_segment)
        .collect();
    LineClass::Candidates(candidates)
}

/// Shape one comma-separated segment into a candidate.
///
/// Bigram rule: the name spans the first two tokens only when both are
/// entirely lower-case; otherwise the name is the first token and everything
/// after it is locality material. Locality tokens that are roman numerals or
/// contain digits are discarded; an empty remainder means no locality.
fn candidate_from_segment(segment: &str) -> Option<Candidate> {
    let tokens: Vec<&str> = segment.split_whitespace().collect();
    let first = tokens.first()?;

    let name_len = if tokens.len() >= 2
        && is_all_lowercase(first)
        && is_all_lowercase(tokens[1])
    {
        2
    } else {
        1
    };

    let name = tokens[..name_len].join(" ");
    let locality_tokens: Vec<&str> = tokens[name_len..]
        .iter()
        .copied()
        .filter(|t| !is_roman_token(t) && !contains_digit(t))
        .collect();
    let locality = if locality_tokens.is_empty() {
        None
    } else {
        Some(locality_tokens.join(" "))
    };

    Some(Candidate { name, locality })
}

/// True if a candidate name must be discarded: it contains the known
/// abbreviation marker, ends in a comma, or is purely numeric.
#[must_use]
pub fn is_rejected_name(name: &str) -> bool {
    name.contains(ABBREV_MARKER) || name.ends_with(',') || is_pure_digits(name)
}

// =============================================================================
// Scan state
// =============================================================================

/// One accepted candidate attributed to a canton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeoRecord {
    /// Full header text as scanned, e.g. `KANTON ZÜRICH`.
    pub canton: String,
    /// The candidate name.
    pub name: String,
    /// Fine-grained locality, when the line carried one.
    pub locality: Option<String>,
}

impl GeoRecord {
    /// The bare canton name with the `KANTON ` marker stripped; this is the
    /// form stored in mapping tables and compared against the gazetteer.
    #[must_use]
    pub fn canton_unit(&self) -> &str {
        self.canton
            .strip_prefix(CANTON_MARKER)
            .unwrap_or(&self.canton)
    }
}

/// Counters for one corpus scan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanStats {
    /// Lines observed.
    pub lines: usize,
    /// Canton header lines seen.
    pub geo_units: usize,
    /// Candidates produced by classification.
    pub candidates: usize,
    /// Candidates accepted into records.
    pub accepted: usize,
    /// Candidates discarded by the name rejection rule.
    pub rejected: usize,
    /// Candidates discarded by a stoplist.
    pub stopped: usize,
    /// Candidates seen before any canton header.
    pub orphaned: usize,
    /// Lines classified as unparseable.
    pub unparseable: usize,
    /// Records removed by the sentinel correction.
    pub corrected: usize,
    /// Accepted candidates per canton header.
    pub per_unit: BTreeMap<String, usize>,
}

impl fmt::Display for ScanStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scan:")?;
        writeln!(f, "  Lines: {}", self.lines)?;
        writeln!(f, "  Geo units: {}", self.geo_units)?;
        writeln!(f, "  Candidates: {}", self.candidates)?;
        writeln!(f, "  Accepted: {}", self.accepted)?;
        writeln!(f, "  Rejected (name shape): {}", self.rejected)?;
        writeln!(f, "  Stopped (stoplists): {}", self.stopped)?;
        writeln!(f, "  Orphaned (no canton context): {}", self.orphaned)?;
        writeln!(f, "  Unparseable lines: {}", self.unparseable)?;
        writeln!(f, "  Corrected (sentinel patch): {}", self.corrected)?;
        writeln!(f, "  Per geo unit:")?;
        for (unit, count) in &self.per_unit {
            writeln!(f, "    {}: {}", unit, count)?;
        }
        Ok(())
    }
}

/// Result of a finished scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Accepted records in source order, sentinel correction applied.
    pub records: Vec<GeoRecord>,
    /// Scan counters.
    pub stats: ScanStats,
}

/// Explicit state for a line-by-line corpus scan.
///
/// Owns the current-canton context instead of leaving it in shared mutable
/// state; every [`observe`](Self::observe) call both classifies the line and
/// advances the state, so the skip-vs-accept decision for each candidate is
/// a visible branch.
#[derive(Debug)]
pub struct GeoScan {
    geo_stop: Stoplist,
    latin_stop: Stoplist,
    current: Option<String>,
    records: Vec<GeoRecord>,
    sentinel_marks: Vec<usize>,
    stats: ScanStats,
}

impl GeoScan {
    /// Start a scan with the given stoplists.
    #[must_use]
    pub fn new(geo_stop: Stoplist, latin_stop: Stoplist) -> Self {
        GeoScan {
            geo_stop,
            latin_stop,
            current: None,
            records: Vec::new(),
            sentinel_marks: Vec::new(),
            stats: ScanStats::default(),
        }
    }

    /// Feed one line; returns its classification after updating the state.
    pub fn observe(&mut self, line: &str) -> LineClass {
        self.stats.lines += 1;
        let class = classify_line(line);
        match &class {
            LineClass::SkipNoise => {}
            LineClass::Unparseable => self.stats.unparseable += 1,
            LineClass::NewGeoUnit(name) => {
                self.stats.geo_units += 1;
                if name == SENTINEL_HEADER {
                    self.sentinel_marks.push(self.records.len());
                }
                self.current = Some(name.clone());
            }
            LineClass::Candidates(candidates) => {
                self.stats.candidates += candidates.len();
                if let Some(canton) = self.current.clone() {
                    for candidate in candidates {
                        if is_rejected_name(&candidate.name) {
                            self.stats.rejected += 1;
                        } else if self.geo_stop.contains(&candidate.name)
                            || self.latin_stop.contains(&candidate.name)
                        {
                            self.stats.stopped += 1;
                        } else {
                            self.records.push(GeoRecord {
                                canton: canton.clone(),
                                name: candidate.name.clone(),
                                locality: candidate.locality.clone(),
                            });
                            self.stats.accepted += 1;
                            *self.stats.per_unit.entry(canton.clone()).or_default() += 1;
                        }
                    }
                } else {
                    self.stats.orphaned += candidates.len();
                }
            }
        }
        class
    }

    /// Finish the scan: apply the sentinel correction and hand back records
    /// and counters.
    ///
    /// The correction is a data-quality patch for one known OCR artifact:
    /// each occurrence of [`SENTINEL_HEADER`] removes the record accumulated
    /// immediately before it. Marks are processed newest-first so earlier
    /// positions stay valid.
    #[must_use]
    pub fn finish(mut self) -> ScanOutcome {
        for &mark in self.sentinel_marks.iter().rev() {
            let idx = mark.min(self.records.len());
            if idx > 0 {
                self.records.remove(idx - 1);
                self.stats.corrected += 1;
            }
        }
        ScanOutcome {
            records: self.records,
            stats: self.stats,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
